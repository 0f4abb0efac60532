// Connect-four engine: board rules plus UCT Monte Carlo Tree Search
pub mod board;
pub mod config;
pub mod error;
pub mod mcts;
pub mod selfplay;

pub use board::{Board, Cell, GameState, Player};
pub use error::{Error, Result};
pub use mcts::{Mcts, SearchParams, SearchResult};
