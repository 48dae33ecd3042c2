/// Example: Print the full move list for a puzzle without animating it
///
/// Usage: cargo run --example print_moves -- 4

use hanoi3d_core::{HanoiError, MoveSequencer};
use std::env;

fn main() -> Result<(), HanoiError> {
    let args: Vec<String> = env::args().collect();

    let num_discs = match args.get(1).map(|a| a.parse::<usize>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("Invalid disc count {:?}: {}", args[1], e);
            return Err(HanoiError::InvalidDiscCount);
        }
        None => {
            eprintln!("Usage: {} <discs>", args[0]);
            eprintln!("\nNo disc count provided, using 3...");
            3
        }
    };

    let mut sequencer = MoveSequencer::new(num_discs)?;
    for (i, mv) in sequencer.remaining_moves().enumerate() {
        let mv = mv?;
        println!("{:>4}: disc {} from peg {} to peg {}", i + 1, mv.disc, mv.from, mv.to);
    }

    println!("Solved {} discs in {} moves", num_discs, sequencer.moves_made());
    Ok(())
}
