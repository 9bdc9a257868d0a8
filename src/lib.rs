//! Bracket topology: elimination and feed-in trees, finishing-position ranges,
//! and the links that join structures into one draw.

pub mod logic;
pub mod models;

pub use logic::{
    add_finishing_rounds, add_finishing_rounds_with_profile, build_elimination_tree,
    build_feed_in_tree, double_elimination_links, feed_in_links, generate_draw_topology,
    generate_playoff_structures, playoff_link, promotion_link, summarize, DrawConfig, DrawRoot,
    DrawTree, EliminationConfig, EliminationTree, FeedInConfig, FeedInTree, FeedRound,
    FinishingConfig, FinishingReport, Node, NodeId, PlayoffAttribute, PlayoffConfig,
    PlayoffNaming, PromotionSource, QualifyingConfig, RoundProfile, RoundSummary,
};
pub use models::{
    DrawPosition, DrawTopology, DrawType, FeedProfile, FinishingPositionRange, IdSource, Link,
    LinkCondition, LinkSource, LinkTarget, LinkType, MatchUp, MatchUpId, MatchUpStatus,
    MatchUpType, PositionAssignment, PositionInterleave, Stage, Structure, StructureId,
    TopologyError,
};
