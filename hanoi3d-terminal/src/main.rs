/// Hanoi3D Terminal - animated Towers of Hanoi solver
///
/// Controls:
///   - R: Restart the puzzle
///   - Q/ESC: Quit

use clap::Parser;
use hanoi3d_core::minimum_moves;
use hanoi3d_terminal::config::load_config;
use hanoi3d_terminal::{AppError, Overrides, TerminalApp};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hanoi3d", about = "Animated Towers of Hanoi in the terminal")]
struct Args {
    /// Number of discs (1-100)
    #[arg(short = 'n', long)]
    discs: Option<usize>,

    /// Milliseconds per leg of a disc's move (50-1500)
    #[arg(short, long, value_name = "MS")]
    tween_time: Option<u64>,

    /// Config file, instead of ~/.hanoi3d/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, default_value = "hanoi3d.log")]
    log_file: PathBuf,
}

fn main() {
    let args = Args::parse();

    // The alternate screen owns the terminal, so log to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    if let Err(e) = run(&args) {
        eprintln!("hanoi3d: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = load_config(args.config.as_deref())?.resolve(&Overrides {
        num_discs: args.discs,
        tween_time_ms: args.tween_time,
    });
    log::info!("Hanoi3D starting up with {:?}", config);

    if let Some(total) = minimum_moves(config.num_discs) {
        println!("Solving {} discs in {} moves (press Q to quit)...", config.num_discs, total);
    }
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&config)?;
    app.run()?;

    println!("Thank you for using Hanoi3D!");
    Ok(())
}
