use meal_map::projection::project_id;
use meal_map::{
    PanDirection, ViewportCommand, ViewportEngine, ViewportState, compute_visible,
    derive_coordinates,
};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = PanDirection> {
    prop_oneof![
        Just(PanDirection::Up),
        Just(PanDirection::Down),
        Just(PanDirection::Left),
        Just(PanDirection::Right),
    ]
}

fn command() -> impl Strategy<Value = ViewportCommand> {
    prop_oneof![
        Just(ViewportCommand::ZoomIn),
        Just(ViewportCommand::ZoomOut),
        Just(ViewportCommand::Reset),
        direction().prop_map(ViewportCommand::Pan),
    ]
}

fn engine_after(commands: &[ViewportCommand]) -> ViewportEngine {
    let mut engine = ViewportEngine::new();
    for &command in commands {
        engine.apply(command);
    }
    engine
}

fn ids() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[a-z0-9-]{1,16}", 0..32)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn coordinates_depend_only_on_id(mut ids in ids()) {
        let forward = derive_coordinates(&ids);
        ids.reverse();
        let backward = derive_coordinates(&ids);
        prop_assert_eq!(&forward, &backward);
        for id in &ids {
            prop_assert_eq!(forward[id], project_id(id));
        }
    }

    #[test]
    fn coordinates_stay_within_radius_band(id in "\\PC{0,24}") {
        let distance = project_id(&id).distance_from_origin();
        prop_assert!((5.0 - 1e-9..=44.0 + 1e-9).contains(&distance), "distance {}", distance);
    }

    #[test]
    fn zoom_stays_within_limits(commands in proptest::collection::vec(command(), 0..64)) {
        let zoom = engine_after(&commands).state().zoom();
        prop_assert!((1.0..=4.0).contains(&zoom), "zoom {}", zoom);
    }

    #[test]
    fn opposite_pans_restore_offset(
        start_x in -1.0e6..1.0e6f64,
        start_y in -1.0e6..1.0e6f64,
        commands in proptest::collection::vec(command(), 0..32),
        direction in direction(),
    ) {
        let mut engine = ViewportEngine::new();
        engine.set_pan(start_x, start_y).unwrap();
        for &command in commands.iter().filter(|c| **c != ViewportCommand::Reset) {
            engine.apply(command);
        }
        let before = engine.state().pan_offset();
        engine.pan(direction);
        engine.pan(direction.opposite());
        let after = engine.state().pan_offset();
        prop_assert_eq!(after.x.to_bits(), before.x.to_bits());
        prop_assert_eq!(after.y.to_bits(), before.y.to_bits());
    }

    #[test]
    fn pans_accumulate_linearly(direction in direction(), count in 0usize..50) {
        let mut engine = ViewportEngine::new();
        for _ in 0..count {
            engine.pan(direction);
        }
        let (dx, dy) = direction.unit();
        let offset = engine.state().pan_offset();
        prop_assert_eq!(offset.x, dx * 20.0 * count as f64);
        prop_assert_eq!(offset.y, dy * 20.0 * count as f64);
    }

    #[test]
    fn reset_is_idempotent(commands in proptest::collection::vec(command(), 0..32)) {
        let mut engine = engine_after(&commands);
        engine.reset();
        prop_assert_eq!(engine.state(), ViewportState::INITIAL);
        engine.reset();
        prop_assert_eq!(engine.state(), ViewportState::INITIAL);
    }

    #[test]
    fn identity_transform_shows_everything(ids in ids()) {
        let coordinates = derive_coordinates(&ids);
        let visible = compute_visible(&ids, &coordinates, &ViewportState::new());
        prop_assert_eq!(visible.len(), ids.len());
    }

    #[test]
    fn visibility_is_deterministic(
        ids in ids(),
        commands in proptest::collection::vec(command(), 0..32),
    ) {
        let state = engine_after(&commands).state();
        let coordinates = derive_coordinates(&ids);
        let first = compute_visible(&ids, &coordinates, &state);
        let second = compute_visible(&ids, &derive_coordinates(&ids), &state);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn visible_preserves_input_order(
        ids in ids(),
        commands in proptest::collection::vec(command(), 0..16),
    ) {
        let mut engine = engine_after(&commands);
        let visible = engine.visible(&ids);
        let positions: Vec<usize> = visible
            .iter()
            .map(|id| ids.iter().position(|candidate| candidate == *id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn eight_zoom_ins_reach_max_and_a_ninth_stays() {
    let mut engine = ViewportEngine::new();
    for _ in 0..8 {
        engine.zoom_in();
    }
    assert_eq!(engine.state().zoom(), 4.0);
    engine.zoom_in();
    assert_eq!(engine.state().zoom(), 4.0);
}

#[test]
fn zoom_out_from_identity_stays_at_one() {
    let mut engine = ViewportEngine::new();
    for _ in 0..10 {
        engine.zoom_out();
    }
    assert_eq!(engine.state().zoom(), 1.0);
}

#[test]
fn far_entity_leaves_view_at_max_zoom_while_near_one_stays() {
    // Golden positions: "a" is 41 units from the origin, "d" is 8.
    let entities = ["a", "d"];
    let coordinates = derive_coordinates(&entities);
    assert!((coordinates["a"].distance_from_origin() - 41.0).abs() < 1e-9);
    assert!((coordinates["d"].distance_from_origin() - 8.0).abs() < 1e-9);

    let mut engine = ViewportEngine::new();
    assert_eq!(engine.visible(&entities), vec![&"a", &"d"]);
    for _ in 0..6 {
        engine.zoom_in();
    }
    assert_eq!(engine.visible(&entities), vec![&"d"]);
}
