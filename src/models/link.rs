//! Directed links between structures.

use serde::{Deserialize, Serialize};

/// Which outcome of the source structure travels across a link.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    Winner,
    Loser,
    Position,
}

/// Restriction on which source matchUps a link applies to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum LinkCondition {
    /// Only participants losing their first played matchUp.
    #[serde(rename = "FIRST_MATCHUP")]
    FirstMatchUp,
}

/// Ordering rule for placing arrivals into the target round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedProfile {
    TopDown,
    BottomUp,
    /// Placement deferred to the position-resolution step.
    Draw,
}

impl FeedProfile {
    /// TOP_DOWN for odd values, BOTTOM_UP for even ones.
    pub fn alternating(n: u32) -> Self {
        if n % 2 == 1 {
            FeedProfile::TopDown
        } else {
            FeedProfile::BottomUp
        }
    }
}

/// Arrivals take every `interleave + 1`-th slot starting at `offset`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PositionInterleave {
    pub offset: u32,
    pub interleave: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSource {
    pub structure_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finishing_positions: Option<Vec<u32>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTarget {
    pub structure_id: String,
    pub round_number: u32,
    pub feed_profile: FeedProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_interleave: Option<PositionInterleave>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouped_order: Option<Vec<u32>>,
}

/// A directed connection carrying winners, losers or ranked positions
/// from one structure into a round of another.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub link_type: LinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_condition: Option<LinkCondition>,
    pub source: LinkSource,
    pub target: LinkTarget,
}

impl Link {
    /// Link from a source round into a target round with the given profile.
    pub fn new(
        link_type: LinkType,
        source_structure_id: &str,
        source_round_number: u32,
        target_structure_id: &str,
        target_round_number: u32,
        feed_profile: FeedProfile,
    ) -> Self {
        Self {
            link_type,
            link_condition: None,
            source: LinkSource {
                structure_id: source_structure_id.to_string(),
                round_number: Some(source_round_number),
                finishing_positions: None,
            },
            target: LinkTarget {
                structure_id: target_structure_id.to_string(),
                round_number: target_round_number,
                feed_profile,
                position_interleave: None,
                grouped_order: None,
            },
        }
    }

    pub fn with_condition(mut self, condition: LinkCondition) -> Self {
        self.link_condition = Some(condition);
        self
    }

    pub fn with_interleave(mut self, offset: u32, interleave: u32) -> Self {
        self.target.position_interleave = Some(PositionInterleave { offset, interleave });
        self
    }
}
