//! Composite draws: every structure and link for one draw type, assembled
//! from the tree builders and the link generator.

use crate::logic::elimination::{build_elimination_tree, EliminationConfig, EliminationTree};
use crate::logic::feed_in::{build_feed_in_tree, FeedInConfig};
use crate::logic::links::{double_elimination_links, feed_in_links, promotion_link, PromotionSource};
use crate::logic::playoffs::{generate_playoff_structures, PlayoffConfig, PlayoffNaming};
use crate::models::{
    DrawTopology, DrawType, IdSource, MatchUpType, Stage, Structure, TopologyError,
};
use serde::Deserialize;

/// A qualifying stage feeding the main structure.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualifyingConfig {
    pub draw_size: u32,
    pub qualifying_positions: u32,
}

/// Configuration for [`generate_draw_topology`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawConfig {
    pub draw_type: DrawType,
    pub draw_size: u32,
    pub qualifying: Option<QualifyingConfig>,
    pub match_up_type: Option<MatchUpType>,
    pub is_mock: Option<bool>,
    /// Prefix for readable matchUp ids: `{prefix}-{structure}-{round}-{position}`.
    pub id_prefix: Option<String>,
}

impl DrawConfig {
    pub fn new(draw_type: DrawType, draw_size: u32) -> Self {
        Self {
            draw_type,
            draw_size,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        serde_json::from_str(json).map_err(|e| TopologyError::InvalidConfig(e.to_string()))
    }

    fn prefix(&self, abbreviation: &str) -> Option<String> {
        self.id_prefix
            .as_ref()
            .map(|prefix| format!("{prefix}-{abbreviation}"))
    }

    fn elimination(&self, draw_size: u32, abbreviation: &str) -> EliminationConfig {
        EliminationConfig {
            draw_size,
            match_up_type: self.match_up_type,
            is_mock: self.is_mock,
            id_prefix: self.prefix(abbreviation),
            ..EliminationConfig::default()
        }
    }

    fn feed_in(&self, abbreviation: &str) -> FeedInConfig {
        FeedInConfig {
            match_up_type: self.match_up_type,
            is_mock: self.is_mock,
            id_prefix: self.prefix(abbreviation),
            ..FeedInConfig::default()
        }
    }
}

/// Generate every structure and link of a draw.
///
/// With a qualifying stage, the qualifying structure is generated first and
/// linked into round 1 of the main structure.
pub fn generate_draw_topology(config: &DrawConfig, ids: &mut IdSource) -> Result<DrawTopology, TopologyError> {
    let qualifying = config
        .qualifying
        .as_ref()
        .map(|qualifying| qualifying_structure(config, qualifying, ids))
        .transpose()?;

    let draw = match config.draw_type {
        DrawType::SingleElimination => single_elimination(config, ids)?,
        DrawType::FeedIn => feed_in(config, ids)?,
        DrawType::FeedInChampionship | DrawType::FeedInChampionshipToSf => {
            feed_in_championship(config, 2, ids)?
        }
        DrawType::FeedInChampionshipToQf => feed_in_championship(config, 4, ids)?,
        DrawType::FeedInChampionshipToR16 => feed_in_championship(config, 8, ids)?,
        DrawType::FirstMatchLoserConsolation => first_match_loser_consolation(config, ids)?,
        DrawType::DoubleElimination => double_elimination(config, ids)?,
        DrawType::Compass => playoffs(config, PlayoffNaming::Compass, ids)?,
        DrawType::Olympic => playoffs(config, PlayoffNaming::Olympic, ids)?,
    };
    log::debug!(
        "{:?} draw of {}: {} structures, {} links",
        config.draw_type,
        config.draw_size,
        draw.structures.len(),
        draw.links.len()
    );

    let Some(qualifying) = qualifying else {
        return Ok(draw);
    };
    let main = draw
        .structures
        .iter()
        .find(|s| s.stage == Stage::Main)
        .ok_or(TopologyError::MissingStructureId {
            role: "targetStructureId",
        })?;
    let link = promotion_link(&qualifying, main, PromotionSource::Qualifying)?;
    let mut topology = DrawTopology {
        structures: vec![qualifying],
        links: Vec::new(),
    };
    topology.merge(draw);
    topology.links.push(link);
    Ok(topology)
}

fn qualifying_structure(
    config: &DrawConfig,
    qualifying: &QualifyingConfig,
    ids: &mut IdSource,
) -> Result<Structure, TopologyError> {
    let invalid = TopologyError::InvalidQualifyingPositions {
        draw_size: qualifying.draw_size,
        qualifying_positions: qualifying.qualifying_positions,
    };
    let tree = build_elimination_tree(
        &EliminationConfig {
            qualifying_positions: Some(qualifying.qualifying_positions),
            ..config.elimination(qualifying.draw_size, "Q")
        },
        ids,
    );
    let round_limit = match (tree.is_empty(), tree.round_limit) {
        (false, Some(limit)) if limit < tree.rounds_count => limit,
        _ => return Err(invalid),
    };
    Ok(
        Structure::new(ids.next_id(), "Qualifying", Stage::Qualifying, tree.match_ups)
            .with_round_limit(Some(round_limit))
            .with_qualifying_round_number(Some(round_limit)),
    )
}

fn main_tree(config: &DrawConfig, ids: &mut IdSource) -> Result<EliminationTree, TopologyError> {
    let tree = build_elimination_tree(&config.elimination(config.draw_size, "M"), ids);
    if tree.is_empty() {
        return Err(TopologyError::InvalidDrawSize(config.draw_size));
    }
    Ok(tree)
}

fn single_elimination(config: &DrawConfig, ids: &mut IdSource) -> Result<DrawTopology, TopologyError> {
    let tree = main_tree(config, ids)?;
    let main = Structure::new(ids.next_id(), "Main", Stage::Main, tree.match_ups);
    Ok(DrawTopology {
        structures: vec![main],
        links: Vec::new(),
    })
}

fn feed_in(config: &DrawConfig, ids: &mut IdSource) -> Result<DrawTopology, TopologyError> {
    if config.draw_size < 2 {
        return Err(TopologyError::InvalidDrawSize(config.draw_size));
    }
    let tree = build_feed_in_tree(
        &FeedInConfig {
            draw_size: Some(config.draw_size),
            ..config.feed_in("M")
        },
        ids,
    )?;
    let main = Structure::new(ids.next_id(), "Main", Stage::Main, tree.match_ups);
    Ok(DrawTopology {
        structures: vec![main],
        links: Vec::new(),
    })
}

/// Feed-in championship: main round losers feed a consolation structure,
/// down to the round whose losers number `smallest_fed_level`.
fn feed_in_championship(
    config: &DrawConfig,
    smallest_fed_level: u32,
    ids: &mut IdSource,
) -> Result<DrawTopology, TopologyError> {
    let draw_size = config.draw_size;
    if draw_size < 4 || !draw_size.is_power_of_two() {
        return Err(TopologyError::InvalidDrawSize(draw_size));
    }
    let tree = main_tree(config, ids)?;
    let main = Structure::new(ids.next_id(), "Main", Stage::Main, tree.match_ups);

    // Consolation levels after its first round: draw_size/4, draw_size/8, …, 2.
    let fed_levels: Vec<u32> = std::iter::successors(Some(draw_size / 4), |level| Some(level / 2))
        .take_while(|level| *level >= smallest_fed_level.max(2))
        .collect();
    let entrants = draw_size / 2 + fed_levels.iter().sum::<u32>();

    let consolation_tree = build_feed_in_tree(
        &FeedInConfig {
            base_draw_size: Some(draw_size / 2),
            feed_rounds: Some(fed_levels.len() as u32),
            is_consolation: true,
            finishing_position_offset: draw_size - entrants,
            finishing_position_limit: Some(draw_size),
            ..config.feed_in("C")
        },
        ids,
    )?;
    let consolation = Structure::new(
        ids.next_id(),
        "Consolation",
        Stage::Consolation,
        consolation_tree.match_ups,
    );
    let links = feed_in_links(&main, &consolation, false)?;
    Ok(DrawTopology {
        structures: vec![main, consolation],
        links,
    })
}

fn first_match_loser_consolation(config: &DrawConfig, ids: &mut IdSource) -> Result<DrawTopology, TopologyError> {
    let draw_size = config.draw_size;
    if draw_size < 4 || !draw_size.is_power_of_two() {
        return Err(TopologyError::InvalidDrawSize(draw_size));
    }
    let tree = main_tree(config, ids)?;
    let main = Structure::new(ids.next_id(), "Main", Stage::Main, tree.match_ups);

    // Round-1 losers plus the first-matchUp losers of round 2 (none in a 4-draw).
    let entrants = draw_size / 2 + if draw_size >= 8 { draw_size / 4 } else { 0 };
    let consolation_tree = build_feed_in_tree(
        &FeedInConfig {
            base_draw_size: Some(draw_size / 2),
            feed_rounds: Some(1),
            is_consolation: true,
            fmlc: true,
            finishing_position_offset: draw_size - entrants,
            finishing_position_limit: Some(draw_size),
            ..config.feed_in("C")
        },
        ids,
    )?;
    let consolation = Structure::new(
        ids.next_id(),
        "Consolation",
        Stage::Consolation,
        consolation_tree.match_ups,
    );
    let links = feed_in_links(&main, &consolation, true)?;
    Ok(DrawTopology {
        structures: vec![main, consolation],
        links,
    })
}

/// Main bracket with a link-fed final, a backdraw for losers, and a decider
/// replaying the final.
///
/// The backdraw's round 1 has `draw_size / 4` empty slots and the main final
/// waits on a link-fed arm, so ranges are sized from each round's matchUps
/// count rather than from the matchUps still to play. The main final decides
/// 1st and 2nd, replayed in the decider when the backdraw champion wins it.
/// Backdraw ranges rank its own field: the backdraw final's loser is second
/// there and third overall.
fn double_elimination(config: &DrawConfig, ids: &mut IdSource) -> Result<DrawTopology, TopologyError> {
    let draw_size = config.draw_size;
    if draw_size < 4 || !draw_size.is_power_of_two() {
        return Err(TopologyError::InvalidDrawSize(draw_size));
    }

    let main_tree = build_feed_in_tree(
        &FeedInConfig {
            base_draw_size: Some(draw_size),
            feeds_from_final: Some(1),
            link_fed_finishing_round_numbers: vec![1],
            finishing_position_limit: Some(draw_size),
            lucky: true,
            ..config.feed_in("M")
        },
        ids,
    )?;
    let main = Structure::new(ids.next_id(), "Main", Stage::Main, main_tree.match_ups);

    let backdraw_tree = build_feed_in_tree(
        &FeedInConfig {
            base_draw_size: Some(draw_size),
            skip_rounds: 2,
            finishing_position_limit: Some(draw_size),
            lucky: true,
            ..config.feed_in("B")
        },
        ids,
    )?;
    let backdraw = Structure::new(
        ids.next_id(),
        "Backdraw",
        Stage::Consolation,
        backdraw_tree.match_ups,
    );

    let decider_tree = build_elimination_tree(&config.elimination(2, "D"), ids);
    let decider = Structure::new(ids.next_id(), "Decider", Stage::PlayOff, decider_tree.match_ups);

    let links = double_elimination_links(&main, &backdraw, &decider)?;
    Ok(DrawTopology {
        structures: vec![main, backdraw, decider],
        links,
    })
}

fn playoffs(config: &DrawConfig, naming: PlayoffNaming, ids: &mut IdSource) -> Result<DrawTopology, TopologyError> {
    generate_playoff_structures(
        &PlayoffConfig {
            draw_size: config.draw_size,
            naming,
            finishing_position_offset: 0,
            match_up_type: config.match_up_type,
            is_mock: config.is_mock,
            id_prefix: config.id_prefix.clone(),
        },
        ids,
    )
}
