//! Map generation and session smoke bench.
//!
//! Run with: cargo bench

use std::hint::black_box;
use std::time::Instant;

use hearth::{generate_noise_map, Game, UnitKind};

const ROUNDS: u32 = 2_000;

fn main() {
    let start = Instant::now();
    for round in 0..ROUNDS {
        let grid = generate_noise_map(f64::from(round) / f64::from(ROUNDS), 15);
        black_box(grid);
    }
    let per_map = start.elapsed() / ROUNDS;
    println!("generate_noise_map 15x15: {per_map:?} per map");

    let mut game = match Game::builder(15).seed(7).build() {
        Ok(game) => game,
        Err(err) => {
            eprintln!("bench setup failed: {err}");
            return;
        }
    };
    let start = Instant::now();
    for round in 0..ROUNDS {
        let row = i64::from(round % 15);
        let _ = game.select_tile(row, 14 - row);
        game.move_settler(row, row);
        game.build_unit(UnitKind::Crossbowman);
        game.end_turn();
    }
    let per_turn = start.elapsed() / ROUNDS;
    black_box(game.snapshot());
    println!("select/move/build/end cycle: {per_turn:?} per turn");
}
