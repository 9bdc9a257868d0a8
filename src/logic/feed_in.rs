//! Feed-in trees: a power-of-two base bracket with fresh positions merged in
//! alongside advancing winners at scheduled rounds.

use crate::logic::finishing::{add_finishing_rounds, FinishingConfig};
use crate::logic::round_summary::summarize;
use crate::logic::tree::{build_round, DrawRoot, DrawTree, MatchUpSettings, Node, NodeId};
use crate::models::{
    DrawPosition, FeedProfile, IdSource, MatchUp, MatchUpType, TopologyError,
};
use serde::Deserialize;

/// Configuration for [`build_feed_in_tree`].
///
/// Either `draw_size` (feed rounds chosen greedily to reach it) or
/// `base_draw_size` with an explicit schedule (`feed_rounds`, `skip_rounds`,
/// `feeds_from_final`) must be given.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedInConfig {
    pub draw_size: Option<u32>,
    pub base_draw_size: Option<u32>,
    /// Number of feed rounds to keep after skipping.
    pub feed_rounds: Option<u32>,
    /// Leading feed levels to leave unfed.
    pub skip_rounds: u32,
    /// Feed only this many levels, counted back from the final.
    pub feeds_from_final: Option<u32>,
    /// A consolation never feeds its own final.
    pub is_consolation: bool,
    /// Feed rounds (by round number) whose positions arrive over a link.
    pub link_fed_round_numbers: Vec<u32>,
    /// Feed rounds (by finishing round) whose positions arrive over a link.
    pub link_fed_finishing_round_numbers: Vec<u32>,
    pub finishing_position_offset: u32,
    pub finishing_position_limit: Option<u32>,
    /// Ranges sized by `2 * matchUpsCount` instead of the matchUps still to play.
    pub lucky: bool,
    pub fmlc: bool,
    pub match_up_type: Option<MatchUpType>,
    pub is_mock: Option<bool>,
    pub id_prefix: Option<String>,
}

/// One scheduled feed round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeedRound {
    pub round_number: u32,
    pub match_ups_count: u32,
    /// 1-based index among feed rounds.
    pub fed: u32,
    pub link_fed: bool,
    /// Placement bias for arrivals, alternating with `fed`.
    pub feed_profile: FeedProfile,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeedInTree {
    pub match_ups: Vec<MatchUp>,
    pub rounds_count: u32,
    /// Positions numbered by this structure: base plus own feed positions.
    pub draw_size: u32,
    pub base_draw_size: u32,
    /// Feed positions numbered by this structure (link-fed slots excluded).
    pub positions_fed: u32,
    pub feed_rounds: Vec<FeedRound>,
    pub draw: DrawRoot,
}

impl FeedInTree {
    pub fn feed_round_numbers(&self) -> Vec<u32> {
        self.feed_rounds.iter().map(|f| f.round_number).collect()
    }
}

#[derive(Clone, Copy, Debug)]
enum RoundPlan {
    Halving,
    Feed { level: u32, fed: u32, link_fed: bool },
}

/// Build a feed-in tree.
///
/// Base positions are numbered `positions_fed + 1 ..= positions_fed + base`;
/// each own-numbered feed round takes the block directly below the lowest
/// position handed out so far, so the last feed round ends at position 1.
pub fn build_feed_in_tree(config: &FeedInConfig, ids: &mut IdSource) -> Result<FeedInTree, TopologyError> {
    let base_draw_size = base_draw_size(config)?;
    let levels = feed_levels(base_draw_size);
    let fed_levels = feed_schedule(config, base_draw_size, &levels);
    let plan = round_plan(config, &levels, &fed_levels);
    let rounds_count = plan.len() as u32;
    let expected = levels.len() as u32 + fed_levels.iter().filter(|f| **f).count() as u32;

    let positions_fed: u32 = plan
        .iter()
        .map(|step| match step {
            RoundPlan::Feed { level, link_fed: false, .. } => *level,
            _ => 0,
        })
        .sum();

    let settings = MatchUpSettings {
        match_up_type: config.match_up_type,
        is_mock: config.is_mock,
        id_prefix: config.id_prefix.as_deref(),
    };
    let mut tree = DrawTree::new();
    let mut match_ups = Vec::new();
    let mut feed_rounds = Vec::new();
    let mut nodes = tree.push_positions(positions_fed + 1, base_draw_size);
    let mut lowest_allocated = positions_fed + 1;

    for (step, round_number) in plan.iter().zip(1u32..) {
        nodes = match *step {
            RoundPlan::Halving => {
                build_round(&mut tree, &nodes, round_number, &settings, ids, &mut match_ups)
            }
            RoundPlan::Feed { level, fed, link_fed } => {
                let arms: Vec<Option<DrawPosition>> = if link_fed {
                    vec![None; level as usize]
                } else {
                    lowest_allocated -= level;
                    (lowest_allocated..lowest_allocated + level).map(Some).collect()
                };
                feed_rounds.push(FeedRound {
                    round_number,
                    match_ups_count: level,
                    fed,
                    link_fed,
                    feed_profile: FeedProfile::alternating(fed),
                });
                build_feed_round(
                    &mut tree,
                    &nodes,
                    &arms,
                    fed,
                    round_number,
                    &settings,
                    ids,
                    &mut match_ups,
                )
            }
        };
    }

    let built = summarize(&match_ups, false).round_numbers.len() as u32;
    if built != expected || rounds_count != expected {
        log::error!(
            "feed-in tree of base {} built {} rounds, expected {}",
            base_draw_size,
            built,
            expected
        );
        return Err(TopologyError::RoundCountMismatch { expected, built });
    }

    let report = add_finishing_rounds(
        &mut match_ups,
        &FinishingConfig {
            rounds_count,
            round_limit: None,
            finishing_position_offset: config.finishing_position_offset,
            finishing_position_limit: config.finishing_position_limit,
            positions_fed: Some(positions_fed),
            lucky: config.lucky,
            fmlc: config.fmlc,
        },
    );
    if !report.is_complete() {
        log::warn!(
            "{} feed-in matchUps left without finishing ranges",
            report.unannotated.len()
        );
    }

    Ok(FeedInTree {
        match_ups,
        rounds_count,
        draw_size: base_draw_size + positions_fed,
        base_draw_size,
        positions_fed,
        feed_rounds,
        draw: DrawRoot {
            root: nodes.first().copied(),
            round_number: Some(rounds_count),
            tree,
        },
    })
}

fn base_draw_size(config: &FeedInConfig) -> Result<u32, TopologyError> {
    let base = match (config.base_draw_size, config.draw_size) {
        (Some(base), _) => base,
        (None, Some(draw_size)) => largest_power_of_two_at_most(draw_size),
        (None, None) => return Err(TopologyError::MissingDrawSize),
    };
    if base < 2 || !base.is_power_of_two() {
        return Err(TopologyError::InvalidDrawSize(base));
    }
    Ok(base)
}

fn largest_power_of_two_at_most(draw_size: u32) -> u32 {
    if draw_size == 0 {
        return 0;
    }
    let nearest = draw_size.checked_next_power_of_two().unwrap_or(1 << 31);
    if nearest > draw_size {
        nearest / 2
    } else {
        nearest
    }
}

/// Node counts reached after each halving of the base: `base/2, base/4, …, 1`.
fn feed_levels(base_draw_size: u32) -> Vec<u32> {
    std::iter::successors(Some(base_draw_size / 2), |level| Some(level / 2))
        .take_while(|level| *level >= 1)
        .collect()
}

fn feed_schedule(config: &FeedInConfig, base_draw_size: u32, levels: &[u32]) -> Vec<bool> {
    let explicit =
        config.feed_rounds.is_some() || config.feeds_from_final.is_some() || config.skip_rounds > 0;

    if let (Some(draw_size), false) = (config.draw_size, explicit) {
        let mut budget = draw_size.saturating_sub(base_draw_size);
        let schedule = levels
            .iter()
            .map(|&level| {
                let fed = budget >= level;
                if fed {
                    budget -= level;
                }
                fed
            })
            .collect();
        if budget > 0 {
            log::warn!(
                "{} positions of draw size {} cannot be fed into base {}",
                budget,
                draw_size,
                base_draw_size
            );
        }
        return schedule;
    }

    let candidates = if config.is_consolation {
        levels.len().saturating_sub(1)
    } else {
        levels.len()
    };
    let skip = match config.feeds_from_final {
        Some(from_final) => candidates.saturating_sub(from_final as usize),
        None => config.skip_rounds as usize,
    };
    let take = config.feed_rounds.map_or(usize::MAX, |f| f as usize);
    log::debug!(
        "feed schedule: {} candidate levels, skipping {}, keeping at most {}",
        candidates,
        skip,
        take
    );
    (0..levels.len())
        .map(|i| i < candidates && i >= skip && i - skip < take)
        .collect()
}

fn round_plan(config: &FeedInConfig, levels: &[u32], fed_levels: &[bool]) -> Vec<RoundPlan> {
    let mut plan = vec![RoundPlan::Halving];
    let mut fed = 0;
    for (&level, &is_fed) in levels.iter().zip(fed_levels) {
        if is_fed {
            fed += 1;
            plan.push(RoundPlan::Feed {
                level,
                fed,
                link_fed: false,
            });
        }
        if level > 1 {
            plan.push(RoundPlan::Halving);
        }
    }

    let rounds_count = plan.len() as u32;
    for (step, round_number) in plan.iter_mut().zip(1u32..) {
        if let RoundPlan::Feed { link_fed, .. } = step {
            let finishing_round = rounds_count + 1 - round_number;
            *link_fed = config.link_fed_round_numbers.contains(&round_number)
                || config
                    .link_fed_finishing_round_numbers
                    .contains(&finishing_round);
        }
    }
    plan
}

/// Pair a new feed arm with every incoming node; the arm takes the first slot.
#[allow(clippy::too_many_arguments)]
fn build_feed_round(
    tree: &mut DrawTree,
    nodes: &[NodeId],
    arms: &[Option<DrawPosition>],
    fed: u32,
    round_number: u32,
    settings: &MatchUpSettings<'_>,
    ids: &mut IdSource,
    match_ups: &mut Vec<MatchUp>,
) -> Vec<NodeId> {
    nodes
        .iter()
        .zip(arms)
        .zip(1u32..)
        .map(|((&node, &draw_position), round_position)| {
            let arm = tree.push(Node::Position {
                draw_position,
                fed: Some(fed),
            });
            let mut match_up = settings.match_up(
                ids,
                round_number,
                round_position,
                [draw_position, tree.draw_position(node)],
            );
            match_up.feed_round = Some(true);
            let parent = Node::MatchUp {
                match_up_id: match_up.match_up_id.clone(),
                round_number,
                round_position,
                children: [arm, node],
            };
            match_ups.push(match_up);
            tree.push(parent)
        })
        .collect()
}
