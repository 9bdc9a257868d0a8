//! Links connecting structures: consolation feed-ins, double-elimination
//! backdraws, qualifying promotion, and playoff branches.

use crate::models::{FeedProfile, Link, LinkCondition, LinkSource, LinkTarget, LinkType, Structure, TopologyError};

/// What a promotion link carries out of its source structure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PromotionSource {
    /// Winners of the source's qualifying round.
    Qualifying,
    /// Participants finishing at these positions (round-robin groups).
    FinishingPositions(Vec<u32>),
}

fn structure_id<'a>(structure: &'a Structure, role: &'static str) -> Result<&'a str, TopologyError> {
    if structure.structure_id.is_empty() {
        return Err(TopologyError::MissingStructureId { role });
    }
    Ok(&structure.structure_id)
}

/// Consolation round fed by losers of main round `round_number`.
fn consolation_target_round(round_number: u32) -> u32 {
    if round_number <= 2 {
        round_number
    } else {
        (round_number - 2) * 2 + 2
    }
}

/// LOSER links from every main round except the final into the consolation
/// rounds that have open slots for them.
///
/// Rounds 1 and 2 feed consolation rounds 1 and 2; later rounds feed every
/// other consolation round. With `fmlc` the round-2 link only carries players
/// losing their first matchUp.
pub fn feed_in_links(main: &Structure, consolation: &Structure, fmlc: bool) -> Result<Vec<Link>, TopologyError> {
    let main_id = structure_id(main, "sourceStructureId")?;
    let consolation_id = structure_id(consolation, "targetStructureId")?;

    let main_rounds = main.summary(false).round_numbers;
    let open_rounds = consolation.summary(false).open_round_numbers();
    let loser_rounds = main_rounds.split_last().map_or(&[][..], |(_, rest)| rest);

    let links = loser_rounds
        .iter()
        .filter_map(|&round_number| {
            let target_round = consolation_target_round(round_number);
            if !open_rounds.contains(&target_round) {
                log::debug!(
                    "main round {} has no open consolation round {}",
                    round_number,
                    target_round
                );
                return None;
            }
            let link = Link::new(
                LinkType::Loser,
                main_id,
                round_number,
                consolation_id,
                target_round,
                FeedProfile::alternating(round_number),
            );
            Some(if fmlc && round_number == 2 {
                let mut link = link.with_condition(LinkCondition::FirstMatchUp);
                link.target.feed_profile = FeedProfile::TopDown;
                link
            } else {
                link
            })
        })
        .collect();
    Ok(links)
}

/// Links for a double-elimination event.
///
/// Main rounds 1 and 2 both feed backdraw round 1, interleaved slot by slot;
/// each later main round (before the main final) feeds the next backdraw feed
/// round in order. The backdraw champion returns to the main final, and the
/// main final's winner and loser meet again in the decider.
pub fn double_elimination_links(
    main: &Structure,
    backdraw: &Structure,
    decider: &Structure,
) -> Result<Vec<Link>, TopologyError> {
    let main_id = structure_id(main, "sourceStructureId")?;
    let backdraw_id = structure_id(backdraw, "targetStructureId")?;
    let decider_id = structure_id(decider, "targetStructureId")?;

    let main_rounds = main.summary(false).round_numbers;
    let backdraw_summary = backdraw.summary(false);
    let backdraw_feed_rounds = backdraw_summary.feed_round_numbers();
    let (Some(&main_final), Some(backdraw_final)) =
        (main_rounds.last(), backdraw_summary.round_numbers.last().copied())
    else {
        return Ok(Vec::new());
    };

    let mut links = Vec::new();
    for &round_number in main_rounds.iter().filter(|r| **r < main_final) {
        let link = match round_number {
            1 | 2 => Link::new(
                LinkType::Loser,
                main_id,
                round_number,
                backdraw_id,
                1,
                FeedProfile::alternating(round_number),
            )
            .with_interleave(round_number - 1, 1),
            _ => {
                let Some(&target_round) = backdraw_feed_rounds.get((round_number - 3) as usize) else {
                    log::debug!("main round {} has no backdraw feed round", round_number);
                    continue;
                };
                Link::new(
                    LinkType::Loser,
                    main_id,
                    round_number,
                    backdraw_id,
                    target_round,
                    FeedProfile::alternating(round_number),
                )
            }
        };
        links.push(link);
    }

    links.push(Link::new(
        LinkType::Winner,
        backdraw_id,
        backdraw_final,
        main_id,
        main_final,
        FeedProfile::TopDown,
    ));
    links.push(Link::new(
        LinkType::Winner,
        main_id,
        main_final,
        decider_id,
        1,
        FeedProfile::TopDown,
    ));
    links.push(Link::new(
        LinkType::Loser,
        main_id,
        main_final,
        decider_id,
        1,
        FeedProfile::BottomUp,
    ));
    Ok(links)
}

/// Single link promoting qualifiers (or ranked group finishers) into round 1
/// of `target`. Placement is left to position resolution (`DRAW`).
pub fn promotion_link(
    source: &Structure,
    target: &Structure,
    promotion: PromotionSource,
) -> Result<Link, TopologyError> {
    let source_id = structure_id(source, "sourceStructureId")?;
    let target_id = structure_id(target, "targetStructureId")?;

    let (link_type, round_number, finishing_positions) = match promotion {
        PromotionSource::Qualifying => (
            LinkType::Winner,
            source
                .round_limit
                .or(source.qualifying_round_number)
                .or_else(|| source.last_round_number()),
            None,
        ),
        PromotionSource::FinishingPositions(positions) => (LinkType::Position, None, Some(positions)),
    };

    Ok(Link {
        link_type,
        link_condition: None,
        source: LinkSource {
            structure_id: source_id.to_string(),
            round_number,
            finishing_positions,
        },
        target: LinkTarget {
            structure_id: target_id.to_string(),
            round_number: 1,
            feed_profile: FeedProfile::Draw,
            position_interleave: None,
            grouped_order: None,
        },
    })
}

/// LOSER link sending one round's losers into round 1 of a playoff structure.
pub fn playoff_link(source: &Structure, round_number: u32, target: &Structure) -> Result<Link, TopologyError> {
    let source_id = structure_id(source, "sourceStructureId")?;
    let target_id = structure_id(target, "targetStructureId")?;
    Ok(Link::new(
        LinkType::Loser,
        source_id,
        round_number,
        target_id,
        1,
        FeedProfile::TopDown,
    ))
}
