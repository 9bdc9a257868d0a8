//! Finishing rounds and finishing-position ranges for built trees.

use crate::logic::round_summary::{summarize, RoundSummary};
use crate::models::{FinishingPositionRange, MatchUp, MatchUpId};

/// Inputs for [`add_finishing_rounds`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FinishingConfig {
    /// Rounds in the complete tree, including any rounds cut by `round_limit`.
    pub rounds_count: u32,
    /// Last emitted round of a truncated (qualifying) tree.
    pub round_limit: Option<u32>,
    pub finishing_position_offset: u32,
    pub finishing_position_limit: Option<u32>,
    /// Positions this structure numbers itself in feed rounds.
    pub positions_fed: Option<u32>,
    pub lucky: bool,
    pub fmlc: bool,
}

/// Outcome of annotating a set of matchUps.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FinishingReport {
    pub annotated: usize,
    /// MatchUps left without a finishing round or range.
    pub unannotated: Vec<MatchUpId>,
}

impl FinishingReport {
    pub fn is_complete(&self) -> bool {
        self.unannotated.is_empty()
    }
}

/// Annotate `match_ups` with `finishing_round` and `finishing_position_range`,
/// profiling the rounds from the matchUps themselves (interpolating a final
/// when the tree is truncated).
pub fn add_finishing_rounds(match_ups: &mut [MatchUp], config: &FinishingConfig) -> FinishingReport {
    let summary = summarize(match_ups, true);
    add_finishing_rounds_with_profile(match_ups, config, &summary)
}

/// Annotate `match_ups` against a caller-supplied round profile.
///
/// A matchUp whose round has no profile entry, or whose finishing round would
/// fall below 1, is left untouched and reported in
/// [`FinishingReport::unannotated`].
pub fn add_finishing_rounds_with_profile(
    match_ups: &mut [MatchUp],
    config: &FinishingConfig,
    summary: &RoundSummary,
) -> FinishingReport {
    let finishing_round_offset = match config.round_limit {
        Some(limit) => config.rounds_count.saturating_sub(limit),
        None => 0,
    };
    let qualifiers = if finishing_round_offset > 0 {
        summary
            .last_real_round()
            .and_then(|round| summary.match_ups_count(round))
    } else {
        None
    };

    let mut report = FinishingReport::default();
    for match_up in match_ups.iter_mut() {
        let round_number = match_up.round_number;
        let (Some(match_ups_count), Some(finishing_round)) = (
            summary.match_ups_count(round_number),
            finishing_round(config.rounds_count, round_number, finishing_round_offset),
        ) else {
            log::warn!(
                "matchUp {} in round {} has no round profile; finishing range not set",
                match_up.match_up_id,
                round_number
            );
            report.unannotated.push(match_up.match_up_id.clone());
            continue;
        };

        let fmlc_exception = if config.fmlc && round_number != 1 {
            config.positions_fed.unwrap_or(0)
        } else {
            0
        };
        let width = if config.lucky {
            match_ups_count * 2
        } else {
            summary.upcoming_match_ups(round_number) + 1
        };
        let first = 1 + config.finishing_position_offset + fmlc_exception;
        let last = first + width - 1;

        let loser_min = last + 1 - match_ups_count;
        let mut winner = [first, loser_min - 1];
        let mut loser = [loser_min, last];

        if let Some(qualifiers) = qualifiers {
            if winner[0] == 1 {
                winner[0] = qualifiers.min(winner[1]);
            }
        }
        if let Some(limit) = config.finishing_position_limit {
            for bound in winner.iter_mut().chain(loser.iter_mut()) {
                *bound = (*bound).min(limit);
            }
        }

        match_up.finishing_round = Some(finishing_round);
        match_up.finishing_position_range = Some(FinishingPositionRange { winner, loser });
        report.annotated += 1;
    }
    report
}

fn finishing_round(rounds_count: u32, round_number: u32, offset: u32) -> Option<u32> {
    (rounds_count + 1)
        .checked_sub(round_number)?
        .checked_sub(offset)
        .filter(|round| *round >= 1)
}
