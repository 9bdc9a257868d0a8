//! Single-elimination trees, optionally truncated for qualifying stages.

use crate::logic::finishing::{add_finishing_rounds, FinishingConfig};
use crate::logic::tree::{build_round, DrawRoot, DrawTree, MatchUpSettings};
use crate::models::{IdSource, MatchUp, MatchUpType};
use serde::Deserialize;

/// Configuration for [`build_elimination_tree`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EliminationConfig {
    pub draw_size: u32,
    /// Number of qualifiers this tree must produce.
    pub qualifying_positions: Option<u32>,
    pub qualifying_round_number: Option<u32>,
    /// Stop emitting after this round.
    pub round_limit: Option<u32>,
    pub finishing_position_offset: u32,
    pub finishing_position_limit: Option<u32>,
    pub match_up_type: Option<MatchUpType>,
    pub is_mock: Option<bool>,
    pub id_prefix: Option<String>,
}

impl EliminationConfig {
    pub fn new(draw_size: u32) -> Self {
        Self {
            draw_size,
            ..Self::default()
        }
    }
}

/// A built elimination tree. Empty (no matchUps, zero rounds) when the
/// configuration was invalid; check [`EliminationTree::is_empty`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EliminationTree {
    pub match_ups: Vec<MatchUp>,
    pub rounds_count: u32,
    pub round_limit: Option<u32>,
    /// Draw size after qualifying adjustment.
    pub draw_size: u32,
    pub draw: DrawRoot,
}

impl EliminationTree {
    pub fn is_empty(&self) -> bool {
        self.match_ups.is_empty() && self.rounds_count == 0
    }
}

/// Build a single-elimination tree.
///
/// 1. Reject draw sizes below 2.
/// 2. With qualifying positions, round a non-power-of-two size that does not
///    divide into qualifiers up to a power of two that does.
/// 3. Pair positions round by round, fixing the round limit to the round that
///    leaves exactly `qualifying_positions` nodes, and stop past the limit.
/// 4. Give up with an empty tree if a round to be paired has an odd node
///    count or the qualifier count is never reached.
/// 5. Count the rounds a full tree would have and annotate finishing ranges.
pub fn build_elimination_tree(config: &EliminationConfig, ids: &mut IdSource) -> EliminationTree {
    let Some(draw_size) = effective_draw_size(config) else {
        return EliminationTree::default();
    };

    let settings = MatchUpSettings {
        match_up_type: config.match_up_type,
        is_mock: config.is_mock,
        id_prefix: config.id_prefix.as_deref(),
    };
    let mut tree = DrawTree::new();
    let mut match_ups = Vec::new();

    let mut nodes = tree.push_positions(1, draw_size);
    let mut round_number = 1;
    let mut round_limit = config.round_limit.or(config.qualifying_round_number);
    let mut qualified = false;

    while nodes.len() > 1 {
        if round_number > 1 && config.qualifying_positions == Some(nodes.len() as u32) {
            round_limit = Some(round_number - 1);
            qualified = true;
        }
        if round_limit.is_some_and(|limit| round_number > limit) {
            break;
        }
        if nodes.len() % 2 != 0 {
            log::warn!(
                "round {} of a {}-draw would pair {} nodes; no tree built",
                round_number,
                draw_size,
                nodes.len()
            );
            return EliminationTree::default();
        }
        nodes = build_round(&mut tree, &nodes, round_number, &settings, ids, &mut match_ups);
        round_number += 1;
    }

    if let Some(qualifiers) = config.qualifying_positions.filter(|_| !qualified) {
        log::warn!(
            "a {}-draw never narrows to {} qualifiers; no tree built",
            draw_size,
            qualifiers
        );
        return EliminationTree::default();
    }

    let built_rounds = round_number - 1;
    let rounds_count = built_rounds + rounds_to_final(nodes.len() as u32);

    let report = add_finishing_rounds(
        &mut match_ups,
        &FinishingConfig {
            rounds_count,
            round_limit,
            finishing_position_offset: config.finishing_position_offset,
            finishing_position_limit: config.finishing_position_limit,
            ..FinishingConfig::default()
        },
    );
    if !report.is_complete() {
        log::warn!(
            "{} matchUps of a {}-draw left without finishing ranges",
            report.unannotated.len(),
            draw_size
        );
    }

    EliminationTree {
        match_ups,
        rounds_count,
        round_limit,
        draw_size,
        draw: DrawRoot {
            root: nodes.first().copied().filter(|_| nodes.len() == 1),
            round_number: Some(built_rounds),
            tree,
        },
    }
}

/// Draw size the tree is built for, or `None` if the configuration is unusable.
fn effective_draw_size(config: &EliminationConfig) -> Option<u32> {
    let draw_size = config.draw_size;
    if draw_size < 2 {
        log::warn!("draw size {} is too small for an elimination tree", draw_size);
        return None;
    }
    if draw_size.is_power_of_two() {
        return Some(draw_size);
    }
    match config.qualifying_positions {
        Some(qualifiers) if qualifiers > 0 && draw_size % qualifiers == 0 => Some(draw_size),
        Some(qualifiers) if qualifiers > 0 => {
            let rounded = next_power_of_two_multiple(draw_size, qualifiers);
            if rounded.is_none() {
                log::warn!(
                    "no power of two at or above {} yields {} qualifiers",
                    draw_size,
                    qualifiers
                );
            }
            rounded
        }
        _ => {
            log::warn!(
                "draw size {} is not a power of two and has no qualifying context",
                draw_size
            );
            None
        }
    }
}

/// Rounds still needed to bring `nodes` down to a single winner.
fn rounds_to_final(mut nodes: u32) -> u32 {
    let mut rounds = 0;
    while nodes > 1 {
        nodes = nodes.div_ceil(2);
        rounds += 1;
    }
    rounds
}

fn next_power_of_two_multiple(draw_size: u32, qualifiers: u32) -> Option<u32> {
    let mut candidate = draw_size.checked_next_power_of_two()?;
    while candidate % qualifiers != 0 {
        candidate = candidate.checked_mul(2)?;
    }
    Some(candidate)
}
