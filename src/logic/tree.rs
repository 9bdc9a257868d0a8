//! Build-time node arena and the round-building primitive shared by the tree builders.

use crate::models::{DrawPosition, IdSource, MatchUp, MatchUpId, MatchUpType};

/// Index of a node in a [`DrawTree`].
pub type NodeId = usize;

/// A bracket node: a draw position or the matchUp whose winner advances.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Position {
        /// `None` for a feed arm filled by an inbound link.
        draw_position: Option<DrawPosition>,
        /// 1-based feed round index for feed arms, `None` for base positions.
        fed: Option<u32>,
    },
    MatchUp {
        match_up_id: MatchUpId,
        round_number: u32,
        round_position: u32,
        children: [NodeId; 2],
    },
}

/// Append-only node arena. Nodes are never modified after insertion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DrawTree {
    nodes: Vec<Node>,
}

impl DrawTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn children(&self, id: NodeId) -> Option<[NodeId; 2]> {
        match self.nodes.get(id)? {
            Node::MatchUp { children, .. } => Some(*children),
            Node::Position { .. } => None,
        }
    }

    /// Draw position carried by a position node; matchUp nodes have none yet.
    pub fn draw_position(&self, id: NodeId) -> Option<DrawPosition> {
        match self.nodes.get(id)? {
            Node::Position { draw_position, .. } => *draw_position,
            Node::MatchUp { .. } => None,
        }
    }

    pub fn round_number(&self, id: NodeId) -> Option<u32> {
        match self.nodes.get(id)? {
            Node::MatchUp { round_number, .. } => Some(*round_number),
            Node::Position { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf positions for `1..=count`, offset by `first - 1`.
    pub(crate) fn push_positions(&mut self, first: DrawPosition, count: u32) -> Vec<NodeId> {
        (first..first + count)
            .map(|draw_position| {
                self.push(Node::Position {
                    draw_position: Some(draw_position),
                    fed: None,
                })
            })
            .collect()
    }
}

/// The root of a built tree together with its arena.
///
/// `root` is `None` when building stopped before a final, and `round_number`
/// is the last round actually built.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DrawRoot {
    pub tree: DrawTree,
    pub root: Option<NodeId>,
    pub round_number: Option<u32>,
}

impl DrawRoot {
    pub fn root_match_up_id(&self) -> Option<&str> {
        match self.tree.node(self.root?)? {
            Node::MatchUp { match_up_id, .. } => Some(match_up_id.as_str()),
            Node::Position { .. } => None,
        }
    }
}

/// Settings applied to every matchUp a builder emits.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MatchUpSettings<'a> {
    pub match_up_type: Option<MatchUpType>,
    pub is_mock: Option<bool>,
    pub id_prefix: Option<&'a str>,
}

impl MatchUpSettings<'_> {
    pub(crate) fn match_up(
        &self,
        ids: &mut IdSource,
        round_number: u32,
        round_position: u32,
        draw_positions: [Option<DrawPosition>; 2],
    ) -> MatchUp {
        let match_up_id = ids.match_up_id(self.id_prefix, round_number, round_position);
        let mut match_up = MatchUp::new(match_up_id, round_number, round_position, draw_positions);
        match_up.match_up_type = self.match_up_type;
        match_up.is_mock = self.is_mock;
        match_up
    }
}

/// Pair adjacent nodes into matchUps for `round_number` and return the new
/// round's nodes. Callers only pass an even node count.
pub(crate) fn build_round(
    tree: &mut DrawTree,
    nodes: &[NodeId],
    round_number: u32,
    settings: &MatchUpSettings<'_>,
    ids: &mut IdSource,
    match_ups: &mut Vec<MatchUp>,
) -> Vec<NodeId> {
    debug_assert!(
        nodes.len() % 2 == 0,
        "round {} pairs an odd node count {}",
        round_number,
        nodes.len()
    );
    nodes
        .chunks_exact(2)
        .zip(1u32..)
        .map(|(pair, round_position)| {
            let children = [pair[0], pair[1]];
            let match_up = settings.match_up(
                ids,
                round_number,
                round_position,
                [tree.draw_position(children[0]), tree.draw_position(children[1])],
            );
            let node = Node::MatchUp {
                match_up_id: match_up.match_up_id.clone(),
                round_number,
                round_position,
                children,
            };
            match_ups.push(match_up);
            tree.push(node)
        })
        .collect()
}
