//! IdSource: injected supply of identifiers for generated records.

use uuid::Uuid;

/// Ordered pool of identifiers consumed back-to-front. When the pool runs
/// dry a fresh v4 UUID is minted, so only a fully supplied pool gives
/// deterministic output.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IdSource {
    queue: Vec<String>,
}

impl IdSource {
    /// Source with an empty pool: every id is a fresh UUID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source drawing from `ids`, last element first.
    pub fn from_queue<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Pool of `count` ids `"{prefix}{n}"`, handed out as `{prefix}1`, `{prefix}2`, ...
    pub fn sequential(prefix: &str, count: usize) -> Self {
        Self::from_queue((1..=count).rev().map(|n| format!("{prefix}{n}")))
    }

    pub fn next_id(&mut self) -> String {
        self.queue
            .pop()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Ids left in the pool.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// MatchUp id: `{prefix}-{round}-{position}` when a prefix is set, otherwise the next pooled id.
    pub fn match_up_id(
        &mut self,
        id_prefix: Option<&str>,
        round_number: u32,
        round_position: u32,
    ) -> String {
        match id_prefix {
            Some(prefix) => format!("{prefix}-{round_number}-{round_position}"),
            None => self.next_id(),
        }
    }
}
