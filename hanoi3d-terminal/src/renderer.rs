/// ASCII side-view renderer for the puzzle scene
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use hanoi3d_core::layout::{SceneLayout, LIFT_CLEARANCE, UNIT};
use hanoi3d_core::{Disc, Peg, PegState};
use nalgebra::Point3;
use std::io::Write;

const BOARD_CHAR: char = '=';
const ROD_CHAR: char = '|';
const DISC_CHAR: char = '#';

/// Colours cycled through by disc rank
const DISC_COLORS: &[Color] = &[
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Maps the scene's xy plane onto a character grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
    width: usize,
    height: usize,
}

impl Viewport {
    /// Fit the whole board plus the travel height of moving discs
    pub fn fit(layout: &SceneLayout, width: usize, height: usize) -> Self {
        let half_width = layout.board_size().x / 2.0;
        Self {
            min_x: -half_width,
            max_x: half_width,
            min_y: 0.0,
            max_y: layout.rod_height() + LIFT_CLEARANCE + UNIT,
            width,
            height,
        }
    }

    /// Project a scene point to a (column, row) cell, or `None` if it falls
    /// outside the grid
    pub fn project(&self, point: &Point3<f32>) -> Option<(usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let ndc_x = 2.0 * (point.x - self.min_x) / (self.max_x - self.min_x) - 1.0;
        let ndc_y = 2.0 * (point.y - self.min_y) / (self.max_y - self.min_y) - 1.0;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * (self.width - 1) as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * (self.height - 1) as f32;
        Some((screen_x.round() as usize, screen_y.round() as usize))
    }

    /// Number of columns covering `length` scene units
    pub fn columns(&self, length: f32) -> usize {
        (length / (self.max_x - self.min_x) * (self.width - 1) as f32).round() as usize
    }
}

/// ASCII renderer that draws rods, board and discs into terminal cells
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character at a cell, mostly for tests
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Draw the resting discs of `pegs`, leaving out `flying` which is drawn
    /// at `flying_at` instead
    pub fn render_scene(
        &mut self,
        layout: &SceneLayout,
        pegs: &PegState,
        flying: Option<(Disc, Point3<f32>)>,
    ) {
        let viewport = Viewport::fit(layout, self.width, self.height);

        let board = layout.board_size();
        self.draw_span(&viewport, &Point3::origin(), board.x / 2.0, BOARD_CHAR, Color::DarkYellow);

        for peg in Peg::ALL {
            self.draw_rod(&viewport, layout, peg);
        }

        for (disc, position) in layout.disc_positions(pegs) {
            if flying.is_some_and(|(f, _)| f == disc) {
                continue;
            }
            self.draw_disc(&viewport, layout, disc, &position);
        }

        if let Some((disc, position)) = flying {
            self.draw_disc(&viewport, layout, disc, &position);
        }
    }

    fn draw_rod(&mut self, viewport: &Viewport, layout: &SceneLayout, peg: Peg) {
        let centre = layout.rod_position(peg);
        let half = layout.rod_height() / 2.0;
        let bottom = viewport.project(&Point3::new(centre.x, centre.y - half, 0.0));
        let top = viewport.project(&Point3::new(centre.x, centre.y + half, 0.0));
        if let (Some((x, bottom_row)), Some((_, top_row))) = (bottom, top) {
            for y in top_row..bottom_row {
                self.put(x, y, ROD_CHAR, Color::Grey);
            }
        }
    }

    fn draw_disc(&mut self, viewport: &Viewport, layout: &SceneLayout, disc: Disc, at: &Point3<f32>) {
        let color = DISC_COLORS[(disc.rank() - 1) % DISC_COLORS.len()];
        self.draw_span(viewport, at, layout.disc_outer_radius(disc), DISC_CHAR, color);
    }

    /// Horizontal run of `radius` scene units either side of `centre`
    fn draw_span(&mut self, viewport: &Viewport, centre: &Point3<f32>, radius: f32, c: char, color: Color) {
        let Some((x, y)) = viewport.project(centre) else {
            return;
        };
        let half = viewport.columns(radius).max(1);
        let start = x.saturating_sub(half);
        let end = (x + half).min(self.width.saturating_sub(1));
        for col in start..=end {
            self.put(col, y, c, color);
        }
    }

    fn put(&mut self, x: usize, y: usize, c: char, color: Color) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            self.char_buffer[idx] = c;
            self.color_buffer[idx] = color;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanoi3d_core::MoveSequencer;

    fn row(renderer: &AsciiRenderer, y: usize) -> String {
        (0..renderer.width()).filter_map(|x| renderer.cell(x, y)).collect()
    }

    #[test]
    fn test_viewport_clips_outside_points() {
        let layout = SceneLayout::new(3);
        let viewport = Viewport::fit(&layout, 80, 24);
        assert_eq!(viewport.project(&Point3::new(-360.0, 0.0, 0.0)), Some((0, 23)));
        assert_eq!(viewport.project(&Point3::new(0.0, -5.0, 0.0)), None);
        assert_eq!(viewport.project(&Point3::new(1000.0, 50.0, 0.0)), None);
    }

    #[test]
    fn test_board_fills_bottom_row() {
        let seq = MoveSequencer::new(3).unwrap();
        let layout = SceneLayout::for_pegs(seq.pegs());
        let mut renderer = AsciiRenderer::new(80, 24);
        renderer.render_scene(&layout, seq.pegs(), None);
        assert!(row(&renderer, 23).chars().all(|c| c == BOARD_CHAR));
    }

    #[test]
    fn test_discs_start_on_left_rod() {
        let seq = MoveSequencer::new(3).unwrap();
        let layout = SceneLayout::for_pegs(seq.pegs());
        let mut renderer = AsciiRenderer::new(80, 24);
        renderer.render_scene(&layout, seq.pegs(), None);

        let viewport = Viewport::fit(&layout, 80, 24);
        let (left_x, _) = viewport.project(&layout.rod_position(Peg::Left)).unwrap();
        let (right_x, _) = viewport.project(&layout.rod_position(Peg::Right)).unwrap();
        let (_, bottom_disc_row) = viewport
            .project(&layout.disc_position(Peg::Left, 0))
            .unwrap();

        assert_eq!(renderer.cell(left_x, bottom_disc_row), Some(DISC_CHAR));
        assert_eq!(renderer.cell(right_x, bottom_disc_row), Some(ROD_CHAR));
    }

    #[test]
    fn test_clear_resets_buffer() {
        let seq = MoveSequencer::new(2).unwrap();
        let layout = SceneLayout::for_pegs(seq.pegs());
        let mut renderer = AsciiRenderer::new(40, 12);
        renderer.render_scene(&layout, seq.pegs(), None);
        renderer.clear();
        assert!((0..12).all(|y| row(&renderer, y).trim().is_empty()));
    }
}
