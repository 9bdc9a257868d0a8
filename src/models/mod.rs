//! Data structures for bracket topology: matchUps, structures, links, identifiers.

mod ids;
mod link;
mod match_up;
mod structure;
mod topology;

pub use ids::IdSource;
pub use link::{
    FeedProfile, Link, LinkCondition, LinkSource, LinkTarget, LinkType, PositionInterleave,
};
pub use match_up::{
    DrawPosition, FinishingPositionRange, MatchUp, MatchUpId, MatchUpStatus, MatchUpType,
};
pub use structure::{PositionAssignment, Stage, Structure, StructureId};
pub use topology::{DrawTopology, DrawType, TopologyError};
