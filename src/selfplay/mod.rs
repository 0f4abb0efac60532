use std::io::{BufRead, Write};
use std::time::Duration;

use indicatif::ProgressBar;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{Board, GameState, Player};
use crate::error::{Error, Result};
use crate::mcts::{Mcts, SearchParams};

/// Who picks moves for one side of a self-play game.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Contender {
    Engine { movetime_ms: u64, max_iterations: Option<u64>, exploration: f64 },
    Random,
}

impl Contender {
    fn engine(&self, board: &Board, seed: u64) -> Option<Mcts> {
        match *self {
            Contender::Engine { movetime_ms, max_iterations, exploration } => {
                let params = SearchParams {
                    movetime: Duration::from_millis(movetime_ms),
                    max_iterations,
                    exploration,
                    seed: Some(seed),
                };
                Some(Mcts::new(board, params))
            }
            Contender::Random => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub player_one: Contender,
    pub player_two: Contender,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: usize,
    pub moves: Vec<usize>,
    pub result: GameState,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub ties: usize,
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Plays one game to completion. Both engines are advanced on every move so
/// each keeps its tree in sync with the real position.
pub fn play_game(params: &SelfPlayParams, game: usize) -> Result<GameRecord> {
    let game_seed = splitmix64(params.seed ^ game as u64);
    let mut board = Board::new(params.width, params.height)?;
    let mut rng = SmallRng::seed_from_u64(game_seed);
    let mut engines = [
        params.player_one.engine(&board, splitmix64(game_seed ^ 1)),
        params.player_two.engine(&board, splitmix64(game_seed ^ 2)),
    ];
    let mut moves = Vec::new();
    while !board.game_state().is_over() {
        let side = match board.turn() {
            Player::One => 0,
            Player::Two => 1,
        };
        let column = match engines[side].as_mut() {
            Some(engine) => engine.best_move()?,
            None => {
                let legal: Vec<usize> = board.legal_columns().collect();
                legal[rng.gen_range(0..legal.len())]
            }
        };
        board.place(column);
        for engine in engines.iter_mut().flatten() {
            engine.advance(column);
        }
        moves.push(column);
    }
    Ok(GameRecord { game, moves, result: board.game_state() })
}

/// Plays `params.games` independent games across the rayon pool.
pub fn generate_games(params: &SelfPlayParams, progress: Option<&ProgressBar>) -> Result<Vec<GameRecord>> {
    (0..params.games)
        .into_par_iter()
        .map(|game| {
            let record = play_game(params, game);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            record
        })
        .collect()
}

pub fn summarize(records: &[GameRecord]) -> Summary {
    let mut summary = Summary::default();
    for r in records {
        match r.result {
            GameState::Player1Won => summary.player_one_wins += 1,
            GameState::Player2Won => summary.player_two_wins += 1,
            GameState::Tie => summary.ties += 1,
            GameState::Ongoing => {}
        }
    }
    summary
}

/// Writes one JSON object per line.
pub fn write_records<W: Write>(records: &[GameRecord], mut out: W) -> Result<()> {
    for r in records {
        serde_json::to_writer(&mut out, r)?;
        writeln!(out).map_err(|source| Error::Io { operation: "write game record".to_string(), source })?;
    }
    out.flush().map_err(|source| Error::Io { operation: "flush game records".to_string(), source })
}

pub fn read_records<R: BufRead>(input: R) -> Result<Vec<GameRecord>> {
    let mut records = Vec::new();
    for line in input.lines() {
        let line = line.map_err(|source| Error::Io { operation: "read game record".to_string(), source })?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

/// Replays a record's moves from an empty board.
pub fn replay(record: &GameRecord, width: usize, height: usize) -> Result<Board> {
    let mut board = Board::new(width, height)?;
    for (ply, &column) in record.moves.iter().enumerate() {
        if !board.place(column) {
            return Err(Error::InvalidContents { message: format!("move {ply} plays unplayable column {column}") });
        }
    }
    Ok(board)
}
