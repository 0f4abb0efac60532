//! Connect-four board state and rules.
//!
//! Row 0 is the top of the grid; disks fall towards `height - 1`.

mod render;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;

/// Length of a winning run.
const RUN: isize = 4;

/// Horizontal, vertical and the two diagonals, as (row, column) steps.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The disk this player drops into the grid.
    pub fn disk(self) -> Cell {
        match self {
            Player::One => Cell::Player1,
            Player::Two => Cell::Player2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Ongoing,
    Player1Won,
    Player2Won,
    Tie,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::Ongoing
    }

    /// Playout reward credited to player one: 1 for a win, 0 for a loss, 0.5 for a tie.
    pub fn player1_score(self) -> Option<f64> {
        match self {
            GameState::Ongoing => None,
            GameState::Player1Won => Some(1.0),
            GameState::Player2Won => Some(0.0),
            GameState::Tie => Some(0.5),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    turn: Player,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![Cell::Empty; DEFAULT_WIDTH * DEFAULT_HEIGHT],
            turn: Player::One,
        }
    }
}

impl Board {
    /// Empty board with player one to move.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, cells: vec![Cell::Empty; width * height], turn: Player::One })
    }

    /// Builds a board from explicit rows, top row first.
    ///
    /// Rows must be non-empty and equally long, and every column must be
    /// filled contiguously from the bottom.
    pub fn from_rows(rows: &[Vec<Cell>], turn: Player) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut board = Self::new(width, height)?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::InvalidContents {
                    message: format!("row {r} has {} cells, expected {width}", row.len()),
                });
            }
            for (c, &cell) in row.iter().enumerate() {
                board.cells[r * width + c] = cell;
            }
        }
        for c in 0..width {
            let floating = (1..height).any(|r| board.cell(r - 1, c) != Cell::Empty && board.cell(r, c) == Cell::Empty);
            if floating {
                return Err(Error::InvalidContents { message: format!("column {c} has a floating disk") });
            }
        }
        board.turn = turn;
        Ok(board)
    }

    /// Parses a text grid, top row first: `.` empty, `O` player one, `X` player two.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str, turn: Player) -> Result<Self> {
        let mut rows = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = line
                .chars()
                .map(|ch| match ch {
                    '.' => Ok(Cell::Empty),
                    'O' | 'o' => Ok(Cell::Player1),
                    'X' | 'x' => Ok(Cell::Player2),
                    other => Err(Error::InvalidContents { message: format!("unexpected cell character '{other}'") }),
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows, turn)
    }

    pub fn width(&self) -> usize { self.width }

    pub fn height(&self) -> usize { self.height }

    /// The player who moves next.
    pub fn turn(&self) -> Player { self.turn }

    /// # Panics
    ///
    /// Panics if `row >= height` or `column >= width`.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        assert!(row < self.height && column < self.width, "cell ({row}, {column}) outside {}x{} board", self.width, self.height);
        self.cells[row * self.width + column]
    }

    pub fn can_place(&self, column: usize) -> bool {
        column < self.width && self.cell(0, column) == Cell::Empty
    }

    /// Columns accepting a disk, in ascending order.
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width).filter(move |&c| self.can_place(c))
    }

    /// Drops the current player's disk into `column` and passes the turn.
    /// Returns `false` and leaves the board untouched if the column is full
    /// or out of range.
    pub fn place(&mut self, column: usize) -> bool {
        if !self.can_place(column) {
            return false;
        }
        let Some(row) = (0..self.height).rev().find(|&r| self.cell(r, column) == Cell::Empty) else {
            return false;
        };
        self.cells[row * self.width + column] = self.turn.disk();
        self.turn = self.turn.other();
        true
    }

    /// Copy of this board with `place(column)` applied.
    pub fn next_state(&self, column: usize) -> Board {
        let mut next = self.clone();
        next.place(column);
        next
    }

    pub fn is_winner(&self, player: Player) -> bool {
        let disk = player.disk();
        (0..self.height).any(|r| {
            (0..self.width).any(|c| DIRECTIONS.iter().any(|&(dr, dc)| self.run_from(r, c, dr, dc, disk)))
        })
    }

    fn run_from(&self, row: usize, column: usize, dr: isize, dc: isize, disk: Cell) -> bool {
        (0..RUN).all(|k| {
            let r = row as isize + dr * k;
            let c = column as isize + dc * k;
            r >= 0
                && c >= 0
                && (r as usize) < self.height
                && (c as usize) < self.width
                && self.cell(r as usize, c as usize) == disk
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// Player one's win is reported first should both players hold a run.
    pub fn game_state(&self) -> GameState {
        if self.is_winner(Player::One) {
            GameState::Player1Won
        } else if self.is_winner(Player::Two) {
            GameState::Player2Won
        } else if self.is_full() {
            GameState::Tie
        } else {
            GameState::Ongoing
        }
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let b = Board::new(5, 4).unwrap();
        assert_eq!(b.width(), 5);
        assert_eq!(b.height(), 4);
        assert_eq!(b.turn(), Player::One);
        assert_eq!(b.count(Cell::Empty), 20);
        assert_eq!(b.game_state(), GameState::Ongoing);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(Board::new(0, 6), Err(Error::InvalidDimensions { width: 0, height: 6 })));
        assert!(matches!(Board::new(7, 0), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_place_stacks_from_bottom() {
        let mut b = Board::default();
        assert!(b.place(2));
        assert!(b.place(2));
        assert_eq!(b.cell(5, 2), Cell::Player1);
        assert_eq!(b.cell(4, 2), Cell::Player2);
        assert_eq!(b.cell(3, 2), Cell::Empty);
        assert_eq!(b.turn(), Player::One);
    }

    #[test]
    #[should_panic(expected = "outside 7x6 board")]
    fn test_cell_out_of_range_panics() {
        Board::default().cell(0, 7);
    }

    #[test]
    fn test_parse_rejects_floating_disk() {
        let text = "
            ...
            O..
            ...
        ";
        assert!(matches!(Board::parse(text, Player::Two), Err(Error::InvalidContents { .. })));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert!(Board::parse("...\n..", Player::One).is_err());
        assert!(Board::parse("..?", Player::One).is_err());
    }

    #[test]
    fn test_game_state_scores() {
        assert_eq!(GameState::Ongoing.player1_score(), None);
        assert_eq!(GameState::Player1Won.player1_score(), Some(1.0));
        assert_eq!(GameState::Player2Won.player1_score(), Some(0.0));
        assert_eq!(GameState::Tie.player1_score(), Some(0.5));
    }

    #[test]
    fn test_double_win_reports_player_one() {
        let b = Board::parse(
            "
            ....
            ....
            XXXX
            OOOO
            ",
            Player::One,
        )
        .unwrap();
        assert!(b.is_winner(Player::Two));
        assert_eq!(b.game_state(), GameState::Player1Won);
    }
}
