/// Terminal driver that animates the Towers of Hanoi solution
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use hanoi3d_core::minimum_moves;
use log::{error, info};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod driver;
pub mod error;
pub mod renderer;

pub use config::{HanoiConfig, Overrides, ResolvedConfig};
pub use driver::PuzzleDriver;
pub use error::AppError;
pub use renderer::AsciiRenderer;

/// Rows reserved above the scene for the status line
const STATUS_ROWS: u16 = 1;

/// Main application struct for the terminal animation
pub struct TerminalApp {
    driver: PuzzleDriver,
    renderer: AsciiRenderer,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &ResolvedConfig) -> Result<Self, AppError> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            driver: PuzzleDriver::new(config.num_discs, config.tween_time)?,
            renderer: AsciiRenderer::new(
                width as usize,
                height.saturating_sub(STATUS_ROWS) as usize,
            ),
            frame_time: Duration::from_millis(1000 / u64::from(config.fps.max(1))),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        if let Err(e) = &result {
            error!("stopping: {e}");
        }
        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.driver.update(frame_start)?;

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> Result<(), AppError> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('r') => {
                    info!("restart requested");
                    self.driver.restart()?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), AppError> {
        self.renderer.clear();
        self.renderer.render_scene(
            self.driver.layout(),
            self.driver.sequencer().pegs(),
            self.driver.flying_disc(),
        );

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, STATUS_ROWS))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let sequencer = self.driver.sequencer();
        let total = minimum_moves(sequencer.num_discs())
            .map_or_else(|| "?".to_string(), |t| t.to_string());
        let state = if sequencer.is_finished() {
            "solved"
        } else {
            "solving"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Hanoi3D | {} discs | move {}/{} | {} | FPS: {:.1} | R=Restart Q=Quit",
                sequencer.num_discs(),
                sequencer.moves_made(),
                total,
                state,
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
