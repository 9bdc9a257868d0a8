//! DrawTopology (generated structures plus links), DrawType, and TopologyError.

use crate::models::link::Link;
use crate::models::structure::Structure;
use serde::{Deserialize, Serialize};

/// Errors that can occur while generating bracket topology.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopologyError {
    /// Draw size is too small, not a power of two where one is required,
    /// or unsupported by the requested draw type.
    InvalidDrawSize(u32),
    /// Neither a draw size nor a base draw size was given.
    MissingDrawSize,
    /// No power of two at or above the draw size divides evenly into qualifiers.
    InvalidQualifyingPositions {
        draw_size: u32,
        qualifying_positions: u32,
    },
    /// A link endpoint has an empty structure id.
    MissingStructureId { role: &'static str },
    /// The tree builder emitted a different number of rounds than scheduled.
    RoundCountMismatch { expected: u32, built: u32 },
    /// A configuration record could not be parsed.
    InvalidConfig(String),
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::InvalidDrawSize(size) => write!(f, "Invalid draw size: {}", size),
            TopologyError::MissingDrawSize => write!(f, "Missing drawSize or baseDrawSize"),
            TopologyError::InvalidQualifyingPositions {
                draw_size,
                qualifying_positions,
            } => write!(
                f,
                "Cannot produce {} qualifiers from a draw of {}",
                qualifying_positions, draw_size
            ),
            TopologyError::MissingStructureId { role } => write!(f, "Missing {}", role),
            TopologyError::RoundCountMismatch { expected, built } => {
                write!(f, "Expected {} rounds, built {}", expected, built)
            }
            TopologyError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for TopologyError {}

/// Draw types the composite generator knows how to assemble.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawType {
    #[default]
    SingleElimination,
    FeedIn,
    FeedInChampionship,
    #[serde(rename = "FEED_IN_CHAMPIONSHIP_TO_SF")]
    FeedInChampionshipToSf,
    #[serde(rename = "FEED_IN_CHAMPIONSHIP_TO_QF")]
    FeedInChampionshipToQf,
    #[serde(rename = "FEED_IN_CHAMPIONSHIP_TO_R16")]
    FeedInChampionshipToR16,
    FirstMatchLoserConsolation,
    DoubleElimination,
    Compass,
    Olympic,
}

/// Every structure and link generated for one event.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawTopology {
    pub structures: Vec<Structure>,
    pub links: Vec<Link>,
}

impl DrawTopology {
    /// Append another topology's structures and links after this one's.
    pub fn merge(&mut self, other: DrawTopology) {
        self.structures.extend(other.structures);
        self.links.extend(other.links);
    }

    pub fn structure(&self, structure_id: &str) -> Option<&Structure> {
        self.structures
            .iter()
            .find(|s| s.structure_id == structure_id)
    }

    pub fn structure_by_name(&self, name: &str) -> Option<&Structure> {
        self.structures.iter().find(|s| s.structure_name == name)
    }
}
