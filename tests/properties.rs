//! Properties of the patrol over arbitrary small grids.

use proptest::prelude::*;

use guard::{parse_grid, walk, Step, Walk};

const MARKERS: [char; 4] = ['^', '>', 'v', '<'];

/// A random grid of up to 8x8 with about a quarter of its cells blocked
/// and the guard somewhere on it.
fn puzzle() -> impl Strategy<Value = String> {
    (1usize..=8, 1usize..=8)
        .prop_flat_map(|(w, h)| {
            (
                Just(w),
                prop::collection::vec(prop::bool::weighted(0.25), w * h),
                0..w * h,
                0..MARKERS.len(),
            )
        })
        .prop_map(|(w, blocked, at, heading)| {
            let mut s = String::new();
            for (idx, b) in blocked.iter().enumerate() {
                if idx == at {
                    s.push(MARKERS[heading]);
                } else if *b {
                    s.push('#');
                } else {
                    s.push('.');
                }
                if (idx + 1) % w == 0 {
                    s.push('\n');
                }
            }
            s
        })
}

proptest! {
    #[test]
    fn steps_count_only_moves(puzzle in puzzle()) {
        let (grid, start) = parse_grid(&puzzle).unwrap();
        let mut w = Walk::new(&grid, start);
        let mut moves = 0;
        let mut places = w.distinct_places();
        while let Step::Moved { to, .. } = w.step() {
            moves += 1;
            prop_assert!(!grid.is_obstacle(to));
            prop_assert_eq!(w.guard().pos, to);
            prop_assert!(w.distinct_places() >= places);
            places = w.distinct_places();
        }
        let report = w.run();
        prop_assert_eq!(report.steps, moves);
        prop_assert!(report.distinct_places <= grid.width() * grid.height());
        prop_assert!(report.distinct_places <= report.steps + 1);
    }

    #[test]
    fn at_most_one_turn_per_step(puzzle in puzzle()) {
        let (grid, start) = parse_grid(&puzzle).unwrap();
        let mut w = Walk::new(&grid, start);
        let mut before = w.guard();
        while let Step::Moved { turned, .. } = w.step() {
            let after = w.guard();
            if turned {
                prop_assert_eq!(after.heading, before.heading.turn_right());
            } else {
                prop_assert_eq!(after.heading, before.heading);
            }
            prop_assert_eq!(grid.step_from(before.pos, after.heading), Some(after.pos));
            before = after;
        }
    }

    #[test]
    fn same_grid_same_report(puzzle in puzzle()) {
        let (grid, start) = parse_grid(&puzzle).unwrap();
        let first = walk(&grid, start);
        let (grid_again, start_again) = parse_grid(&puzzle).unwrap();
        prop_assert_eq!(&grid, &grid_again);
        prop_assert_eq!(first, walk(&grid_again, start_again));
    }
}
