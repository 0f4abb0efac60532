//! UCT Monte Carlo Tree Search over connect-four boards.

pub mod tree;

use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};
use crate::error::{Error, Result};

pub use tree::{Node, NodeId, Tree};

pub const DEFAULT_MOVETIME: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Wall-clock budget per `search` call.
    pub movetime: Duration,
    /// Optional cap on attempted iterations, checked alongside the clock.
    pub max_iterations: Option<u64>,
    /// Exploration constant of the UCT formula.
    pub exploration: f64,
    /// Seed for expansion and playout randomness; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { movetime: DEFAULT_MOVETIME, max_iterations: None, exploration: std::f64::consts::SQRT_2, seed: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_move: usize,
    /// Iterations that went through simulate and backpropagate.
    pub iterations: u64,
    pub elapsed: Duration,
}

/// Statistics of one expanded root child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub column: usize,
    pub visits: u64,
    pub win_rate: f64,
    pub uct: f64,
}

/// Share of `node`'s credit won by `mover`. Credit is always stored from
/// player one's side, so player two sees the complement.
pub fn win_rate_for(node: &Node, mover: Player) -> f64 {
    if node.visits() == 0 {
        return 0.0;
    }
    let visits = node.visits() as f64;
    match mover {
        Player::One => node.player1_credit() / visits,
        Player::Two => (visits - node.player1_credit()) / visits,
    }
}

fn calc_uct(child: &Node, parent_visits: u64, mover: Player, exploration: f64) -> f64 {
    let explore = ((parent_visits as f64).ln() / child.visits() as f64).sqrt();
    win_rate_for(child, mover) + exploration * explore
}

/// Plays uniformly random legal columns on a copy of `board` until the game
/// ends and returns the score credited to player one.
pub fn playout<R: Rng>(board: &Board, rng: &mut R) -> f64 {
    let mut board = board.clone();
    let mut legal = Vec::with_capacity(board.width());
    loop {
        if let Some(score) = board.game_state().player1_score() {
            return score;
        }
        legal.clear();
        legal.extend(board.legal_columns());
        // Ongoing boards always have a legal column.
        let column = legal[rng.gen_range(0..legal.len())];
        board.place(column);
    }
}

pub struct Mcts {
    tree: Tree,
    params: SearchParams,
    rng: SmallRng,
}

impl Mcts {
    pub fn new(board: &Board, params: SearchParams) -> Self {
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { tree: Tree::new(board.clone()), params, rng }
    }

    pub fn params(&self) -> &SearchParams { &self.params }

    pub fn tree(&self) -> &Tree { &self.tree }

    pub fn root_board(&self) -> &Board { self.tree.root_node().board() }

    /// Searches until the budget runs out and returns the most visited column.
    pub fn best_move(&mut self) -> Result<usize> {
        self.search().map(|r| r.best_move)
    }

    /// Fails with `Error::GameOver` only when the root board has no legal column.
    pub fn search(&mut self) -> Result<SearchResult> {
        if self.root_board().legal_columns().next().is_none() {
            return Err(Error::GameOver);
        }
        let start = Instant::now();
        let deadline = start.checked_add(self.params.movetime);
        let mut attempts = 0u64;
        let mut iterations = 0u64;
        // The clock is only consulted between iterations.
        while deadline.map_or(true, |d| Instant::now() < d) {
            if self.params.max_iterations.is_some_and(|max| attempts >= max) {
                break;
            }
            attempts += 1;
            if self.iterate() {
                iterations += 1;
            }
        }
        let elapsed = start.elapsed();

        let best_move = match self.most_visited_column() {
            Some(column) => column,
            None => {
                warn!("no root child expanded after {attempts} attempts; falling back to first legal column");
                self.root_board().legal_columns().next().ok_or(Error::GameOver)?
            }
        };
        debug!(
            "search: best={} iterations={} attempts={} root_visits={} nodes={} elapsed={:.3}s",
            best_move,
            iterations,
            attempts,
            self.tree.root_node().visits(),
            self.tree.len(),
            elapsed.as_secs_f64()
        );
        Ok(SearchResult { best_move, iterations, elapsed })
    }

    /// Re-roots the tree on the move actually played. Call after every move, by either side.
    pub fn advance(&mut self, column: usize) {
        self.tree.reroot(column);
    }

    /// One select/expand/simulate/backpropagate cycle. Returns false when
    /// selection ran into a node with no legal columns.
    pub fn iterate(&mut self) -> bool {
        let Some(selected) = self.select() else {
            return false;
        };
        let expanded = self.expand(selected);
        let result = playout(self.tree.get(expanded).board(), &mut self.rng);
        self.tree.backpropagate(expanded, result);
        true
    }

    fn select(&self) -> Option<NodeId> {
        let mut current = self.tree.root();
        loop {
            let node = self.tree.get(current);
            if node.has_unexpanded() {
                return Some(current);
            }
            let mover = node.board().turn();
            let mut best: Option<(NodeId, f64)> = None;
            for column in node.board().legal_columns() {
                let Some(child) = node.child(column) else { continue };
                let uct = calc_uct(self.tree.get(child), node.visits(), mover, self.params.exploration);
                if best.map_or(true, |(_, b)| uct > b) {
                    best = Some((child, uct));
                }
            }
            current = best?.0;
        }
    }

    fn expand(&mut self, id: NodeId) -> NodeId {
        let columns = self.tree.get(id).unexpanded_columns();
        let column = columns[self.rng.gen_range(0..columns.len())];
        self.tree.add_child(id, column)
    }

    /// Most visited root child; ties go to the lowest column.
    fn most_visited_column(&self) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (column, slot) in self.tree.root_node().children().iter().enumerate() {
            let Some(id) = slot else { continue };
            let visits = self.tree.get(*id).visits();
            if best.map_or(true, |(_, v)| visits > v) {
                best = Some((column, visits));
            }
        }
        best.map(|(column, _)| column)
    }

    pub fn root_stats(&self) -> Vec<ColumnStats> {
        let root = self.tree.root_node();
        let mover = root.board().turn();
        root.children()
            .iter()
            .enumerate()
            .filter_map(|(column, slot)| slot.map(|id| (column, self.tree.get(id))))
            .map(|(column, child)| ColumnStats {
                column,
                visits: child.visits(),
                win_rate: win_rate_for(child, mover),
                uct: calc_uct(child, root.visits(), mover, self.params.exploration),
            })
            .collect()
    }

    pub fn statistics_string(&self) -> String {
        let mut s = String::from("|  column  |  visits  | win rate |   UCT    |\n");
        let mut stats = self.root_stats();
        stats.sort_by(|a, b| b.visits.cmp(&a.visits));
        for st in stats {
            s.push_str(&format!("|{:^10}|{:^10}|{:^10.4}|{:^10.4}|\n", st.column, st.visits, st.win_rate, st.uct));
        }
        s
    }
}
