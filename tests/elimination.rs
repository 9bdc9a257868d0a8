//! Integration tests for single-elimination tree building.

use bracket_topology::{
    build_elimination_tree, summarize, EliminationConfig, FinishingPositionRange, IdSource,
    MatchUp, Node,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn range_of(match_ups: &[MatchUp], round_number: u32) -> FinishingPositionRange {
    match_ups
        .iter()
        .find(|m| m.round_number == round_number)
        .and_then(|m| m.finishing_position_range)
        .unwrap()
}

fn range(winner: [u32; 2], loser: [u32; 2]) -> FinishingPositionRange {
    FinishingPositionRange { winner, loser }
}

#[test]
fn eight_draw_has_three_halving_rounds_with_ranges() {
    init_logging();
    let tree = build_elimination_tree(&EliminationConfig::new(8), &mut IdSource::new());

    assert_eq!(tree.rounds_count, 3);
    assert_eq!(tree.match_ups.len(), 7);
    let summary = summarize(&tree.match_ups, false);
    let counts: Vec<u32> = summary
        .round_numbers
        .iter()
        .map(|r| summary.match_ups_count(*r).unwrap())
        .collect();
    assert_eq!(counts, vec![4, 2, 1]);

    assert_eq!(range_of(&tree.match_ups, 1), range([1, 4], [5, 8]));
    assert_eq!(range_of(&tree.match_ups, 2), range([1, 2], [3, 4]));
    assert_eq!(range_of(&tree.match_ups, 3), range([1, 1], [2, 2]));
    let finishing_rounds: Vec<_> = tree.match_ups.iter().map(|m| m.finishing_round).collect();
    assert_eq!(
        finishing_rounds,
        vec![Some(3), Some(3), Some(3), Some(3), Some(2), Some(2), Some(1)]
    );
}

#[test]
fn two_draw_is_a_single_final() {
    let tree = build_elimination_tree(&EliminationConfig::new(2), &mut IdSource::new());

    assert_eq!(tree.rounds_count, 1);
    assert_eq!(tree.match_ups.len(), 1);
    let final_match_up = &tree.match_ups[0];
    assert_eq!(final_match_up.finishing_round, Some(1));
    assert_eq!(final_match_up.draw_positions, [Some(1), Some(2)]);
    assert_eq!(
        final_match_up.finishing_position_range,
        Some(range([1, 1], [2, 2]))
    );
}

#[test]
fn invalid_sizes_give_empty_result() {
    init_logging();
    for draw_size in [0, 1, 3, 6, 12] {
        let tree = build_elimination_tree(&EliminationConfig::new(draw_size), &mut IdSource::new());
        assert!(tree.is_empty(), "draw size {draw_size} should be rejected");
        assert_eq!(tree.rounds_count, 0);
        assert!(tree.match_ups.is_empty());
    }
}

#[test]
fn first_round_pairs_sequential_positions_later_rounds_are_open() {
    let tree = build_elimination_tree(&EliminationConfig::new(8), &mut IdSource::new());
    let first_round: Vec<_> = tree
        .match_ups
        .iter()
        .filter(|m| m.round_number == 1)
        .map(|m| (m.round_position, m.draw_positions))
        .collect();
    assert_eq!(
        first_round,
        vec![
            (Some(1), [Some(1), Some(2)]),
            (Some(2), [Some(3), Some(4)]),
            (Some(3), [Some(5), Some(6)]),
            (Some(4), [Some(7), Some(8)]),
        ]
    );
    assert!(tree
        .match_ups
        .iter()
        .filter(|m| m.round_number > 1)
        .all(|m| m.draw_positions == [None, None]));
}

#[test]
fn qualifying_positions_truncate_the_tree() {
    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(4),
            ..EliminationConfig::new(16)
        },
        &mut IdSource::new(),
    );

    assert_eq!(tree.rounds_count, 4);
    assert_eq!(tree.round_limit, Some(2));
    assert_eq!(tree.match_ups.len(), 12);
    assert!(tree.match_ups.iter().all(|m| m.round_number <= 2));

    let round_two = tree.match_ups.iter().find(|m| m.round_number == 2).unwrap();
    assert_eq!(round_two.finishing_round, Some(1));
    assert_eq!(round_two.finishing_position_range, Some(range([4, 4], [5, 8])));
    assert_eq!(range_of(&tree.match_ups, 1), range([4, 8], [9, 16]));
}

#[test]
fn qualifying_rounds_draw_size_up_to_a_divisible_power_of_two() {
    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(8),
            ..EliminationConfig::new(12)
        },
        &mut IdSource::new(),
    );
    assert_eq!(tree.draw_size, 16);
    assert_eq!(tree.round_limit, Some(1));
    assert_eq!(tree.match_ups.len(), 8);
}

#[test]
fn qualifying_without_divisible_power_of_two_is_empty() {
    init_logging();
    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(5),
            ..EliminationConfig::new(12)
        },
        &mut IdSource::new(),
    );
    assert!(tree.is_empty());
}

#[test]
fn qualifying_multiple_keeps_non_power_of_two_size() {
    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(3),
            ..EliminationConfig::new(12)
        },
        &mut IdSource::new(),
    );
    assert_eq!(tree.draw_size, 12);
    assert_eq!(tree.round_limit, Some(2));
    assert_eq!(tree.match_ups.len(), 9);
}

#[test]
fn qualifier_count_missed_by_halving_is_empty() {
    init_logging();
    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(4),
            ..EliminationConfig::new(12)
        },
        &mut IdSource::new(),
    );
    assert!(tree.is_empty());
    assert_eq!(tree.draw.root, None);

    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(3),
            ..EliminationConfig::new(16)
        },
        &mut IdSource::new(),
    );
    assert!(tree.is_empty());
}

#[test]
fn odd_qualifying_round_counts_the_rounds_to_a_final() {
    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(3),
            ..EliminationConfig::new(12)
        },
        &mut IdSource::new(),
    );
    assert_eq!(tree.rounds_count, 4);
    assert_eq!(tree.draw.round_number, Some(2));
    assert_eq!(tree.draw.root, None);
    let finishing_rounds: Vec<_> = [1, 2]
        .iter()
        .map(|r| {
            tree.match_ups
                .iter()
                .find(|m| m.round_number == *r)
                .and_then(|m| m.finishing_round)
        })
        .collect();
    assert_eq!(finishing_rounds, vec![Some(2), Some(1)]);
}

#[test]
fn truncated_rounds_take_no_ids() {
    let mut ids = IdSource::sequential("q", 15);
    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(4),
            ..EliminationConfig::new(16)
        },
        &mut ids,
    );
    assert_eq!(tree.match_ups.len(), 12);
    assert_eq!(ids.remaining(), 3);
}

#[test]
fn explicit_round_limit_offsets_finishing_rounds() {
    let tree = build_elimination_tree(
        &EliminationConfig {
            round_limit: Some(2),
            ..EliminationConfig::new(32)
        },
        &mut IdSource::new(),
    );
    assert_eq!(tree.rounds_count, 5);
    assert_eq!(tree.match_ups.len(), 24);
    let round_one = tree.match_ups.iter().find(|m| m.round_number == 1).unwrap();
    let round_two = tree.match_ups.iter().find(|m| m.round_number == 2).unwrap();
    assert_eq!(round_one.finishing_round, Some(2));
    assert_eq!(round_two.finishing_round, Some(1));
}

#[test]
fn ids_come_from_the_queue_in_round_order() {
    let mut ids = IdSource::sequential("m", 7);
    let tree = build_elimination_tree(&EliminationConfig::new(8), &mut ids);

    let match_up_ids: Vec<_> = tree.match_ups.iter().map(|m| m.match_up_id.as_str()).collect();
    assert_eq!(match_up_ids, vec!["m1", "m2", "m3", "m4", "m5", "m6", "m7"]);
    assert_eq!(ids.remaining(), 0);
}

#[test]
fn id_prefix_gives_readable_ids_without_consuming_the_queue() {
    let mut ids = IdSource::sequential("unused", 3);
    let tree = build_elimination_tree(
        &EliminationConfig {
            id_prefix: Some("main".to_string()),
            ..EliminationConfig::new(4)
        },
        &mut ids,
    );
    let match_up_ids: Vec<_> = tree.match_ups.iter().map(|m| m.match_up_id.as_str()).collect();
    assert_eq!(match_up_ids, vec!["main-1-1", "main-1-2", "main-2-1"]);
    assert_eq!(ids.remaining(), 3);
}

#[test]
fn identical_queues_give_identical_trees() {
    let config = EliminationConfig::new(16);
    let first = build_elimination_tree(&config, &mut IdSource::sequential("x", 15));
    let second = build_elimination_tree(&config, &mut IdSource::sequential("x", 15));
    assert_eq!(
        serde_json::to_string(&first.match_ups).unwrap(),
        serde_json::to_string(&second.match_ups).unwrap()
    );
}

#[test]
fn root_node_is_the_final_and_threads_back_to_positions() {
    let tree = build_elimination_tree(&EliminationConfig::new(4), &mut IdSource::new());
    let final_id = tree
        .match_ups
        .iter()
        .find(|m| m.round_number == 2)
        .map(|m| m.match_up_id.clone())
        .unwrap();

    assert_eq!(tree.draw.root_match_up_id(), Some(final_id.as_str()));
    assert_eq!(tree.draw.round_number, Some(2));

    let root = tree.draw.root.unwrap();
    let [left, right] = tree.draw.tree.children(root).unwrap();
    assert_eq!(tree.draw.tree.round_number(left), Some(1));
    assert_eq!(tree.draw.tree.round_number(right), Some(1));
    let [first, second] = tree.draw.tree.children(left).unwrap();
    assert_eq!(
        tree.draw.tree.node(first),
        Some(&Node::Position {
            draw_position: Some(1),
            fed: None
        })
    );
    assert_eq!(tree.draw.tree.draw_position(second), Some(2));
}

#[test]
fn config_deserializes_from_camel_case_json() {
    let config: EliminationConfig =
        serde_json::from_str(r#"{"drawSize":16,"qualifyingPositions":4,"idPrefix":"q"}"#).unwrap();
    assert_eq!(config.draw_size, 16);
    assert_eq!(config.qualifying_positions, Some(4));
    assert_eq!(config.id_prefix.as_deref(), Some("q"));
    assert_eq!(config.finishing_position_offset, 0);
}
