#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Parking Panic levels in the terminal.
//!
//! Commands are single characters: a lowercase letter slides that vehicle
//! one cell east or south, an uppercase letter one cell west or north, `*`
//! undoes the latest move, and `q` quits. Rejected moves print the engine's
//! reason and leave the lot unchanged.

mod level_format;

use std::{
    fs,
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use parking_panic_core::{
    CellCoord, Direction, MoveError, Orientation, VehicleId, WELCOME_BANNER,
};
use parking_panic_engine::{query, Session};

/// Arguments accepted by the Parking Panic command-line interface.
#[derive(Debug, Parser)]
#[command(about = "Slide vehicles until the target car reaches the exit")]
struct Args {
    /// Path to the level catalog file.
    catalog: PathBuf,
    /// 1-based number of the level to play.
    #[arg(long, default_value_t = 1)]
    level: usize,
}

/// Entry point for the Parking Panic command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let input = fs::read_to_string(&args.catalog)
        .with_context(|| format!("could not read level catalog {}", args.catalog.display()))?;
    let levels = level_format::parse_catalog(&input).context("could not parse level catalog")?;
    let definition = level_format::select_level(&levels, args.level)?.clone();
    let mut session =
        Session::load(definition).with_context(|| format!("level {} is malformed", args.level))?;

    println!("{WELCOME_BANNER}");
    println!("{}", render(&session));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("could not read a command")?;
        for command in line.trim().chars() {
            match command {
                'q' | 'Q' => return Ok(()),
                '*' => report(session.undo()),
                letter if letter.is_ascii_alphabetic() => report(slide(&mut session, letter)),
                other => println!("'{other}' is not a command"),
            }
            if session.is_solved() {
                println!("{}", render(&session));
                println!("Solved in {} steps.", session.step_count());
                return Ok(());
            }
        }
        println!("{}", render(&session));
        println!("steps: {}", session.step_count());
    }
    Ok(())
}

/// Applies the single-cell slide a letter command encodes.
///
/// Lowercase slides east or south, uppercase west or north, matching the
/// keyboard scheme of the original game.
fn slide(session: &mut Session, letter: char) -> Result<CellCoord, MoveError> {
    let id = VehicleId::new(letter.to_ascii_uppercase() as u32 - 'A' as u32);
    let Some(snapshot) = query::vehicle_view(session).get(id).copied() else {
        return Err(MoveError::UnknownVehicle { vehicle: id });
    };

    let forward = letter.is_ascii_lowercase();
    let direction = match (snapshot.orientation, forward) {
        (Orientation::Horizontal, true) => Direction::East,
        (Orientation::Horizontal, false) => Direction::West,
        (Orientation::Vertical, true) => Direction::South,
        (Orientation::Vertical, false) => Direction::North,
    };
    session.attempt_move(id, direction, 1)
}

/// Prints the engine's reason when a move was rejected.
fn report(outcome: Result<CellCoord, MoveError>) {
    if let Err(error) = outcome {
        println!("{error}");
    }
}

/// Renders the lot as letter rows; empty cells print as dots.
fn render(session: &Session) -> String {
    let view = query::occupancy_view(session);
    let (columns, rows) = view.dimensions();
    let mut board = String::new();
    for row in 0..rows {
        for column in 0..columns {
            let glyph = match view.occupant(CellCoord::new(column, row)) {
                Some(id) => vehicle_letter(id),
                None => '.',
            };
            board.push(glyph);
        }
        if row + 1 < rows {
            board.push('\n');
        }
    }
    board
}

fn vehicle_letter(id: VehicleId) -> char {
    char::from_u32('A' as u32 + id.get() % 26).unwrap_or('?')
}
