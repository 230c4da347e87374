use gridworld_core::{Action, Coord, GridShape};
use gridworld_world::{create, is_terminal, step, WorldState};
use proptest::prelude::*;

fn coord_within(rows: u32, cols: u32) -> impl Strategy<Value = Coord> {
    (0..rows, 0..cols).prop_map(|(row, col)| Coord::new(row, col))
}

type ScenarioParts = (
    GridShape,
    Coord,
    Option<Coord>,
    Option<Coord>,
    Option<(Coord, Coord)>,
);

fn arb_scenario() -> impl Strategy<Value = ScenarioParts> {
    (3u32..12, 3u32..12).prop_flat_map(|(rows, cols)| {
        let pit = (coord_within(rows, cols), coord_within(rows, cols)).prop_map(|(a, b)| {
            (
                Coord::new(a.row().min(b.row()), a.col().min(b.col())),
                Coord::new(a.row().max(b.row()), a.col().max(b.col())),
            )
        });
        (
            Just(GridShape::new(rows, cols)),
            coord_within(rows, cols),
            proptest::option::of(coord_within(rows, cols)),
            proptest::option::of(coord_within(rows, cols)),
            proptest::option::of(pit),
        )
    })
}

fn arb_action() -> impl Strategy<Value = Action> {
    (0..Action::COUNT).prop_map(|index| Action::from_index(index).expect("index in range"))
}

fn build((shape, player, key, lock, pit): ScenarioParts) -> Option<WorldState> {
    create(
        shape,
        player,
        key,
        lock,
        pit.map(|(start, _)| start),
        pit.map(|(_, end)| end),
    )
    .ok()
}

fn expected_beacon(shape: GridShape, row: Option<u32>, col: Option<u32>) -> Option<Coord> {
    let coord = Coord::new(row?, col?);
    shape.contains(coord).then_some(coord)
}

proptest! {
    #[test]
    fn beacons_sit_diagonally_outside_pit_corners(scenario in arb_scenario()) {
        let Some(state) = build(scenario) else {
            return Ok(());
        };
        let shape = state.grid_shape();
        match (state.pit_start(), state.pit_end()) {
            (Some(start), Some(end)) => {
                let north = start.row().checked_sub(1);
                let south = end.row().checked_add(1);
                let west = start.col().checked_sub(1);
                let east = end.col().checked_add(1);
                prop_assert_eq!(state.nw_beacon(), expected_beacon(shape, north, west));
                prop_assert_eq!(state.ne_beacon(), expected_beacon(shape, north, east));
                prop_assert_eq!(state.sw_beacon(), expected_beacon(shape, south, west));
                prop_assert_eq!(state.se_beacon(), expected_beacon(shape, south, east));
            }
            _ => prop_assert_eq!(state.beacons().count(), 0),
        }
        prop_assert_eq!(state.has_key(), state.key().is_none());
    }

    #[test]
    fn random_walks_preserve_step_contracts(
        scenario in arb_scenario(),
        actions in proptest::collection::vec(arb_action(), 1..40),
    ) {
        let Some(mut state) = build(scenario) else {
            return Ok(());
        };

        for action in actions {
            let terminal = state.is_in_pit() || (state.has_key() && state.lock().is_none());
            prop_assert_eq!(is_terminal(&state), terminal);
            if terminal {
                prop_assert!(step(&state, action).is_err());
                break;
            }

            let snapshot = state.clone();
            let next = step(&state, action).expect("non-terminal state accepts actions");
            prop_assert_eq!(&state, &snapshot);
            prop_assert_eq!(&step(&state, action).expect("repeatable"), &next);
            prop_assert!(next.grid_shape().contains(next.player()));
            prop_assert!(next.player().manhattan_distance(state.player()) <= 1);
            if action.direction().is_none() {
                prop_assert_eq!(next.player(), state.player());
            }
            state = next;
        }
    }

    #[test]
    fn bumps_are_idempotent(scenario in arb_scenario(), action in arb_action()) {
        let Some(state) = build(scenario) else {
            return Ok(());
        };
        if is_terminal(&state) {
            return Ok(());
        }
        let first = step(&state, action).expect("non-terminal");
        if first == state {
            let second = step(&state, action).expect("non-terminal");
            prop_assert_eq!(second, state);
        }
    }
}
