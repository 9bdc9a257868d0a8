//! MatchUp record and the enums it carries.

use serde::{Deserialize, Serialize};

/// A bracket slot, numbered from 1 within one structure.
pub type DrawPosition = u32;

/// Unique identifier for a matchUp.
pub type MatchUpId = String;

/// Play status of a generated matchUp.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchUpStatus {
    #[default]
    ToBePlayed,
}

/// Kind of contest a matchUp represents.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchUpType {
    #[default]
    Singles,
    Doubles,
    Team,
}

/// Finishing positions reachable by winning or losing at a given round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FinishingPositionRange {
    pub winner: [u32; 2],
    pub loser: [u32; 2],
}

/// A single generated matchUp.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchUp {
    pub match_up_id: MatchUpId,
    pub round_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_position: Option<u32>,
    /// `None` marks a slot filled later: by a winner from the previous round,
    /// a later feed round, or an inbound link.
    pub draw_positions: [Option<DrawPosition>; 2],
    #[serde(default)]
    pub match_up_status: MatchUpStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_up_type: Option<MatchUpType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mock: Option<bool>,
    /// Set on matchUps produced by a feed round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_round: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finishing_round: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finishing_position_range: Option<FinishingPositionRange>,
}

impl MatchUp {
    pub fn new(
        match_up_id: MatchUpId,
        round_number: u32,
        round_position: u32,
        draw_positions: [Option<DrawPosition>; 2],
    ) -> Self {
        Self {
            match_up_id,
            round_number,
            round_position: Some(round_position),
            draw_positions,
            match_up_status: MatchUpStatus::ToBePlayed,
            match_up_type: None,
            is_mock: None,
            feed_round: None,
            finishing_round: None,
            finishing_position_range: None,
        }
    }

    /// True when this matchUp was produced by a feed round.
    pub fn is_feed_round(&self) -> bool {
        self.feed_round.unwrap_or(false)
    }

    /// Defined draw positions, in slot order.
    pub fn defined_draw_positions(&self) -> impl Iterator<Item = DrawPosition> + '_ {
        self.draw_positions.iter().flatten().copied()
    }
}
