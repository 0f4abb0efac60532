//! Arena-backed search tree.
//!
//! Child slots are the only ownership edges. Parent links are plain arena
//! indices used to walk back up during backpropagation.

use std::collections::VecDeque;

use log::{trace, warn};

use crate::board::Board;

pub type NodeId = usize;

#[derive(Clone, Debug)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<Option<NodeId>>,
    visits: u64,
    player1_credit: f64,
    board: Board,
}

impl Node {
    fn new(parent: Option<NodeId>, board: Board) -> Self {
        Self { parent, children: vec![None; board.width()], visits: 0, player1_credit: 0.0, board }
    }

    pub fn parent(&self) -> Option<NodeId> { self.parent }

    pub fn visits(&self) -> u64 { self.visits }

    /// Accumulated playout score credited to player one.
    pub fn player1_credit(&self) -> f64 { self.player1_credit }

    pub fn board(&self) -> &Board { &self.board }

    pub fn children(&self) -> &[Option<NodeId>] { &self.children }

    pub fn child(&self, column: usize) -> Option<NodeId> {
        self.children.get(column).copied().flatten()
    }

    /// True if some legal column has no child yet.
    pub fn has_unexpanded(&self) -> bool {
        self.board.legal_columns().any(|c| self.children[c].is_none())
    }

    pub fn unexpanded_columns(&self) -> Vec<usize> {
        self.board.legal_columns().filter(|&c| self.children[c].is_none()).collect()
    }

    fn update_stats(&mut self, result: f64) {
        self.visits += 1;
        self.player1_credit += result;
    }
}

pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    pub fn new(board: Board) -> Self {
        Self { nodes: vec![Node::new(None, board)], root: 0 }
    }

    pub fn root(&self) -> NodeId { self.root }

    pub fn root_node(&self) -> &Node { &self.nodes[self.root] }

    pub fn get(&self, id: NodeId) -> &Node { &self.nodes[id] }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Creates the child reached by playing `column` from `parent`.
    pub fn add_child(&mut self, parent: NodeId, column: usize) -> NodeId {
        let board = self.nodes[parent].board.next_state(column);
        let id = self.nodes.len();
        self.nodes.push(Node::new(Some(parent), board));
        self.nodes[parent].children[column] = Some(id);
        id
    }

    /// Adds one visit and `result` credit to `leaf` and every ancestor up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, result: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.update_stats(result);
            current = node.parent;
        }
    }

    /// Makes the child under `column` the new root, keeping its subtree and
    /// statistics. Without such a child the tree restarts from a fresh leaf.
    pub fn reroot(&mut self, column: usize) {
        let root = self.root_node();
        if !root.board.can_place(column) {
            warn!("re-rooting on unplayable column {column}");
        }
        match root.child(column) {
            Some(child) => self.compact_from(child),
            None => {
                let board = root.board.next_state(column);
                *self = Tree::new(board);
            }
        }
    }

    /// Rebuilds the arena with only the subtree under `new_root`, which lands at index 0.
    fn compact_from(&mut self, new_root: NodeId) {
        let before = self.nodes.len();
        let mut old: Vec<Option<Node>> = std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes: Vec<Node> = Vec::new();
        // (old id, (new parent id, column in parent))
        let mut queue: VecDeque<(NodeId, Option<(NodeId, usize)>)> = VecDeque::from([(new_root, None)]);
        while let Some((old_id, link)) = queue.pop_front() {
            let Some(mut node) = old[old_id].take() else { continue };
            let new_id = nodes.len();
            node.parent = link.map(|(p, _)| p);
            for (c, slot) in node.children.iter_mut().enumerate() {
                if let Some(child) = slot.take() {
                    queue.push_back((child, Some((new_id, c))));
                }
            }
            if let Some((p, c)) = link {
                nodes[p].children[c] = Some(new_id);
            }
            nodes.push(node);
        }
        trace!("re-rooted tree: kept {} of {} nodes", nodes.len(), before);
        self.nodes = nodes;
        self.root = 0;
    }
}
