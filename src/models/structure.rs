//! Structure: one bracket of a draw (main, consolation, qualifying, playoff).

use crate::logic::{summarize, RoundSummary};
use crate::models::match_up::{DrawPosition, MatchUp, MatchUpType};
use serde::{Deserialize, Serialize};

/// Unique identifier for a structure.
pub type StructureId = String;

/// Phase of the event a structure belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Qualifying,
    #[default]
    Main,
    Consolation,
    PlayOff,
}

/// A draw position owned by the structure (participants are assigned elsewhere).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionAssignment {
    pub draw_position: DrawPosition,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    pub structure_id: StructureId,
    pub structure_name: String,
    pub stage: Stage,
    pub stage_sequence: u32,
    pub match_up_type: MatchUpType,
    pub match_ups: Vec<MatchUp>,
    pub position_assignments: Vec<PositionAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifying_round_number: Option<u32>,
}

impl Structure {
    /// Wrap generated matchUps. Position assignments are the distinct draw
    /// positions the matchUps reference; link-fed slots have none.
    pub fn new(
        structure_id: impl Into<StructureId>,
        structure_name: impl Into<String>,
        stage: Stage,
        match_ups: Vec<MatchUp>,
    ) -> Self {
        let match_up_type = match_ups
            .first()
            .and_then(|m| m.match_up_type)
            .unwrap_or_default();
        let mut draw_positions: Vec<DrawPosition> = match_ups
            .iter()
            .flat_map(|m| m.defined_draw_positions())
            .collect();
        draw_positions.sort_unstable();
        draw_positions.dedup();
        Self {
            structure_id: structure_id.into(),
            structure_name: structure_name.into(),
            stage,
            stage_sequence: 1,
            match_up_type,
            match_ups,
            position_assignments: draw_positions
                .into_iter()
                .map(|draw_position| PositionAssignment { draw_position })
                .collect(),
            round_limit: None,
            qualifying_round_number: None,
        }
    }

    pub fn with_stage_sequence(mut self, stage_sequence: u32) -> Self {
        self.stage_sequence = stage_sequence;
        self
    }

    pub fn with_round_limit(mut self, round_limit: Option<u32>) -> Self {
        self.round_limit = round_limit;
        self
    }

    pub fn with_qualifying_round_number(mut self, round_number: Option<u32>) -> Self {
        self.qualifying_round_number = round_number;
        self
    }

    /// Round summary of this structure's matchUps.
    pub fn summary(&self, interpolate: bool) -> RoundSummary {
        summarize(&self.match_ups, interpolate)
    }

    /// Highest round number present, if any matchUps exist.
    pub fn last_round_number(&self) -> Option<u32> {
        self.match_ups.iter().map(|m| m.round_number).max()
    }

    pub fn draw_positions(&self) -> Vec<DrawPosition> {
        self.position_assignments
            .iter()
            .map(|p| p.draw_position)
            .collect()
    }
}
