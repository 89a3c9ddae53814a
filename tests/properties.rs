use hearth::terrain::{classify, noise_value, MOUNTAIN_FROM, WATER_BELOW};
use hearth::{generate_noise_map, Coord, Game, GameError, Terrain, TerrainMode};
use proptest::prelude::*;

fn flat(size: usize) -> Game {
    Game::builder(size)
        .terrain(TerrainMode::Flat)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn noise_map_is_deterministic(seed in 0.0f64..1.0, size in 1usize..20) {
        prop_assert_eq!(generate_noise_map(seed, size), generate_noise_map(seed, size));
    }

    #[test]
    fn noise_stays_in_unit_interval(
        seed in -1_000.0f64..1_000.0,
        row in 0usize..64,
        col in 0usize..64,
    ) {
        let value = noise_value(row, col, seed);
        prop_assert!((0.0..1.0).contains(&value), "noise {} out of range", value);
        let expected = if value < WATER_BELOW {
            Terrain::Water
        } else if value < MOUNTAIN_FROM {
            Terrain::Grass
        } else {
            Terrain::Mountain
        };
        prop_assert_eq!(classify(value), expected);
    }

    #[test]
    fn last_selection_wins(a in (0i64..15, 0i64..15), b in (0i64..15, 0i64..15)) {
        let mut game = flat(15);
        game.select_tile(a.0, a.1).unwrap();
        game.select_tile(b.0, b.1).unwrap();
        let selected: Vec<_> = game
            .snapshot()
            .tiles
            .into_iter()
            .filter(|t| t.is_selected)
            .collect();
        prop_assert_eq!(selected.len(), 1);
        prop_assert_eq!((selected[0].row as i64, selected[0].col as i64), b);
    }

    #[test]
    fn selection_outside_grid_is_rejected(row in -50i64..50, col in -50i64..50) {
        prop_assume!(!(0..10).contains(&row) || !(0..10).contains(&col));
        let mut game = flat(10);
        prop_assert_eq!(
            game.select_tile(row, col),
            Err(GameError::OutOfBounds { row, col, size: 10 })
        );
        prop_assert_eq!(game.selected_tile(), None);
    }

    #[test]
    fn settler_ignores_moves_off_the_grid(row in -50i64..50, col in -50i64..50) {
        prop_assume!(!(0..10).contains(&row) || !(0..10).contains(&col));
        let mut game = flat(10);
        game.move_settler(3, 7);
        prop_assert!(!game.move_settler(row, col));
        prop_assert_eq!(game.settler(), Coord::new(3, 7));
    }

    #[test]
    fn settler_lands_exactly_where_sent(row in 0i64..10, col in 0i64..10) {
        let mut game = flat(10);
        prop_assert!(game.move_settler(row, col));
        prop_assert_eq!(game.settler(), Coord::new(row as usize, col as usize));
    }

    #[test]
    fn end_turn_counts_calls(n in 0u64..200) {
        let mut game = flat(10);
        let before = game.snapshot();
        for _ in 0..n {
            game.end_turn();
        }
        let after = game.snapshot();
        prop_assert_eq!(after.turn, n);
        prop_assert_eq!(after.tiles, before.tiles);
        prop_assert_eq!(after.settler, before.settler);
    }
}
