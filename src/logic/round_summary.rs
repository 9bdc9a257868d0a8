//! Round summary: matchUps grouped by round.

use crate::models::{DrawPosition, MatchUp};
use serde::Serialize;
use std::collections::BTreeMap;

/// What one round of a structure looks like.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundProfile {
    pub match_ups_count: u32,
    pub paired_draw_positions: Vec<[Option<DrawPosition>; 2]>,
    /// Defined draw positions in this round, sorted.
    pub draw_positions: Vec<DrawPosition>,
    /// At least one matchUp of the round was produced by a feed round.
    pub feed_round: bool,
    /// Synthesized by interpolation; no matchUps exist for it.
    pub interpolated: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round_profile: BTreeMap<u32, RoundProfile>,
    pub round_numbers: Vec<u32>,
}

/// Group matchUps by round.
///
/// With `interpolate`, virtual rounds are appended after the highest round
/// (each with half the matchUps, rounded up) until a one-matchUp final
/// exists. Truncated qualifying trees rely on this to size their ranges.
pub fn summarize(match_ups: &[MatchUp], interpolate: bool) -> RoundSummary {
    let mut round_profile: BTreeMap<u32, RoundProfile> = BTreeMap::new();
    for match_up in match_ups {
        let profile = round_profile.entry(match_up.round_number).or_default();
        profile.match_ups_count += 1;
        profile.paired_draw_positions.push(match_up.draw_positions);
        profile
            .draw_positions
            .extend(match_up.defined_draw_positions());
        profile.feed_round |= match_up.is_feed_round();
    }
    for profile in round_profile.values_mut() {
        profile.draw_positions.sort_unstable();
        profile.draw_positions.dedup();
    }

    if interpolate {
        let last = round_profile
            .iter()
            .next_back()
            .map(|(round, profile)| (*round, profile.match_ups_count));
        if let Some((mut round_number, mut count)) = last {
            while count > 1 {
                round_number += 1;
                count = count.div_ceil(2);
                round_profile.insert(
                    round_number,
                    RoundProfile {
                        match_ups_count: count,
                        interpolated: true,
                        ..RoundProfile::default()
                    },
                );
            }
        }
    }

    let round_numbers = round_profile.keys().copied().collect();
    RoundSummary {
        round_profile,
        round_numbers,
    }
}

impl RoundSummary {
    pub fn match_ups_count(&self, round_number: u32) -> Option<u32> {
        self.round_profile
            .get(&round_number)
            .map(|p| p.match_ups_count)
    }

    /// Positions still in play at and after `round_number`: the sum of
    /// matchUps of that round and every later one.
    pub fn upcoming_match_ups(&self, round_number: u32) -> u32 {
        self.round_profile
            .range(round_number..)
            .map(|(_, p)| p.match_ups_count)
            .sum()
    }

    /// Highest round that has real (not interpolated) matchUps.
    pub fn last_real_round(&self) -> Option<u32> {
        self.round_profile
            .iter()
            .rev()
            .find(|(_, p)| !p.interpolated)
            .map(|(round, _)| *round)
    }

    /// Rounds produced by a feed round, ascending.
    pub fn feed_round_numbers(&self) -> Vec<u32> {
        self.round_profile
            .iter()
            .filter(|(_, p)| p.feed_round)
            .map(|(round, _)| *round)
            .collect()
    }

    /// Rounds with slots that can receive arrivals: round 1 and every feed round.
    pub fn open_round_numbers(&self) -> Vec<u32> {
        self.round_profile
            .iter()
            .filter(|(round, p)| !p.interpolated && (**round == 1 || p.feed_round))
            .map(|(round, _)| *round)
            .collect()
    }
}
