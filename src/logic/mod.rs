//! Topology generation: tree builders, finishing ranges, links, composite draws.

mod draws;
mod elimination;
mod feed_in;
mod finishing;
mod links;
mod playoffs;
mod round_summary;
mod tree;

pub use draws::{generate_draw_topology, DrawConfig, QualifyingConfig};
pub use elimination::{build_elimination_tree, EliminationConfig, EliminationTree};
pub use feed_in::{build_feed_in_tree, FeedInConfig, FeedInTree, FeedRound};
pub use finishing::{
    add_finishing_rounds, add_finishing_rounds_with_profile, FinishingConfig, FinishingReport,
};
pub use links::{
    double_elimination_links, feed_in_links, playoff_link, promotion_link, PromotionSource,
};
pub use playoffs::{generate_playoff_structures, PlayoffAttribute, PlayoffConfig, PlayoffNaming};
pub use round_summary::{summarize, RoundProfile, RoundSummary};
pub use tree::{DrawRoot, DrawTree, Node, NodeId};
