//! Compass and olympic draws: a main structure whose round losers play on
//! in named playoff structures, recursively.

use crate::logic::elimination::{build_elimination_tree, EliminationConfig};
use crate::logic::links::playoff_link;
use crate::models::{DrawTopology, IdSource, MatchUpType, Stage, Structure, TopologyError};
use serde::{Deserialize, Serialize};

/// Naming scheme deciding which playoff structures exist.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayoffNaming {
    #[default]
    Compass,
    Olympic,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlayoffAttribute {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

impl PlayoffNaming {
    /// Attribute for a branch key. Keys are the round numbers walked from the
    /// main structure: `"0"` is the main, `"0-2"` the losers of its round 2,
    /// `"0-1-1"` the round-1 losers of the round-1 losers, and so on.
    pub fn attribute(self, key: &str) -> Option<PlayoffAttribute> {
        let (name, abbreviation) = match (self, key) {
            (_, "0") => ("East", "E"),
            (_, "0-1") => ("West", "W"),
            (_, "0-2") => ("North", "N"),
            (_, "0-1-1") => ("South", "S"),
            (PlayoffNaming::Compass, "0-3") => ("Northeast", "NE"),
            (PlayoffNaming::Compass, "0-1-2") => ("Southwest", "SW"),
            (PlayoffNaming::Compass, "0-2-1") => ("Northwest", "NW"),
            (PlayoffNaming::Compass, "0-1-1-1") => ("Southeast", "SE"),
            _ => return None,
        };
        Some(PlayoffAttribute { name, abbreviation })
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayoffConfig {
    pub draw_size: u32,
    pub naming: PlayoffNaming,
    pub finishing_position_offset: u32,
    pub match_up_type: Option<MatchUpType>,
    pub is_mock: Option<bool>,
    pub id_prefix: Option<String>,
}

/// Generate the main structure and every named playoff structure beneath it.
///
/// Structures come out depth-first, each parent before its children, and
/// identifiers are drawn from `ids` in that same order.
pub fn generate_playoff_structures(
    config: &PlayoffConfig,
    ids: &mut IdSource,
) -> Result<DrawTopology, TopologyError> {
    if config.draw_size < 4 || !config.draw_size.is_power_of_two() {
        return Err(TopologyError::InvalidDrawSize(config.draw_size));
    }
    playoff_branch(
        config,
        "0",
        config.draw_size,
        config.finishing_position_offset,
        1,
        ids,
    )
}

fn playoff_branch(
    config: &PlayoffConfig,
    key: &str,
    draw_size: u32,
    finishing_position_offset: u32,
    stage_sequence: u32,
    ids: &mut IdSource,
) -> Result<DrawTopology, TopologyError> {
    let Some(attribute) = config.naming.attribute(key) else {
        return Ok(DrawTopology::default());
    };

    let tree = build_elimination_tree(
        &EliminationConfig {
            draw_size,
            finishing_position_offset,
            match_up_type: config.match_up_type,
            is_mock: config.is_mock,
            id_prefix: config
                .id_prefix
                .as_ref()
                .map(|prefix| format!("{prefix}-{}", attribute.abbreviation)),
            ..EliminationConfig::default()
        },
        ids,
    );
    if tree.is_empty() {
        return Err(TopologyError::InvalidDrawSize(draw_size));
    }
    let stage = if key == "0" { Stage::Main } else { Stage::PlayOff };
    let structure = Structure::new(ids.next_id(), attribute.name, stage, tree.match_ups)
        .with_stage_sequence(stage_sequence);

    let summary = structure.summary(false);
    let mut branches = Vec::new();
    for &round_number in &summary.round_numbers {
        let losers = summary.match_ups_count(round_number).unwrap_or(0);
        let child_key = format!("{key}-{round_number}");
        if losers < 2 || config.naming.attribute(&child_key).is_none() {
            continue;
        }
        // Losers of this round finish just below everyone still in play.
        let child_offset = structure
            .match_ups
            .iter()
            .find(|m| m.round_number == round_number)
            .and_then(|m| m.finishing_position_range)
            .map_or(finishing_position_offset, |range| range.loser[0] - 1);

        let child = playoff_branch(
            config,
            &child_key,
            losers,
            child_offset,
            stage_sequence + 1,
            ids,
        )?;
        let Some(target) = child.structures.first() else {
            continue;
        };
        let link = playoff_link(&structure, round_number, target)?;
        branches.push((link, child));
    }

    let mut topology = DrawTopology {
        structures: vec![structure],
        links: Vec::new(),
    };
    for (link, child) in branches {
        topology.links.push(link);
        topology.merge(child);
    }
    Ok(topology)
}
