use mapframe::prelude::*;

/// Pin 20x30 dp anchored at its bottom center
fn pin(id: &'static str, x: f64, y: f64) -> TouchCandidate<&'static str> {
    TouchCandidate::new(id, ScreenRect::new(x - 10.0, y - 30.0, x + 10.0, y), Point::new(x, y))
}

/// `ids` stacked to the right of the tap, nearest first
fn stack(ids: &[&'static str]) -> Vec<TouchCandidate<&'static str>> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| pin(id, 100.0 + i as f64 * 3.0, 110.0))
        .collect()
}

const TAP: Point = Point { x: 100.0, y: 100.0 };

#[test]
fn test_repeated_taps_cycle_through_stack() {
    let mut helper = SelectionDisambiguator::new();
    let candidates = stack(&["A", "B", "C"]);

    let picks: Vec<_> = (0..4).filter_map(|_| helper.select_marker(TAP, &candidates)).collect();
    assert_eq!(picks, vec!["A", "B", "C", "A"]);
}

#[test]
fn test_cycle_order_follows_distance_not_input_order() {
    let mut helper = SelectionDisambiguator::new();
    let candidates = vec![pin("far", 120.0, 110.0), pin("near", 101.0, 110.0), pin("mid", 110.0, 110.0)];

    let picks: Vec<_> = (0..3).filter_map(|_| helper.select_marker(TAP, &candidates)).collect();
    assert_eq!(picks, vec!["near", "mid", "far"]);
}

#[test]
fn test_tap_on_other_cluster_starts_fresh() {
    let mut helper = SelectionDisambiguator::new();
    let candidates = vec![
        pin("A", 100.0, 110.0),
        pin("B", 104.0, 110.0),
        pin("D", 400.0, 410.0),
        pin("E", 404.0, 410.0),
    ];

    assert_eq!(helper.select_marker(TAP, &candidates), Some("A"));
    assert_eq!(helper.select_marker(Point::new(400.0, 400.0), &candidates), Some("D"));
    // Back on the first cluster: its history was replaced, so it starts over
    assert_eq!(helper.select_marker(TAP, &candidates), Some("A"));
}

#[test]
fn test_similarity_at_threshold_is_a_new_cluster() {
    let mut helper = SelectionDisambiguator::new();

    // 4 of 5 touched markers repeat: similarity 0.8 is not above the threshold
    assert_eq!(helper.select_marker(TAP, &stack(&["A", "B", "C", "D", "X"])), Some("A"));
    assert_eq!(helper.select_marker(TAP, &stack(&["A", "B", "C", "D", "Y"])), Some("A"));
}

#[test]
fn test_similarity_above_threshold_keeps_cycling() {
    let mut helper = SelectionDisambiguator::new();

    // 5 of 6 repeat: similarity 0.83
    assert_eq!(helper.select_marker(TAP, &stack(&["A", "B", "C", "D", "E", "X"])), Some("A"));
    assert_eq!(helper.select_marker(TAP, &stack(&["A", "B", "C", "D", "E", "Y"])), Some("B"));
}

#[test]
fn test_touch_threshold_comes_from_config() {
    let far_pin = vec![pin("A", 150.0, 100.0)];

    let mut default_helper = SelectionDisambiguator::new();
    assert_eq!(default_helper.select_marker(TAP, &far_pin), None);

    let mut generous = SelectionDisambiguator::with_config(SelectionConfig {
        touch_threshold_dp: 48.0,
        ..SelectionConfig::default()
    });
    assert_eq!(generous.select_marker(TAP, &far_pin), Some("A"));
}

#[test]
fn test_reset_forgets_history() {
    let mut helper = SelectionDisambiguator::new();
    let candidates = stack(&["A", "B"]);
    assert_eq!(helper.select_marker(TAP, &candidates), Some("A"));
    helper.reset();
    assert_eq!(helper.select_marker(TAP, &candidates), Some("A"));
    assert_eq!(helper.select_marker(TAP, &candidates), Some("B"));
}
