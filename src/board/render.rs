use std::fmt;

use super::{Board, Cell};

impl Board {
    fn write_separator(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for _ in 0..self.width {
            write!(f, "---|")?;
        }
        writeln!(f)
    }
}

/// Bordered grid, `O` for player one and `X` for player two, column indices underneath.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_separator(f)?;
        for r in 0..self.height {
            write!(f, "|")?;
            for c in 0..self.width {
                let glyph = match self.cell(r, c) {
                    Cell::Empty => ' ',
                    Cell::Player1 => 'O',
                    Cell::Player2 => 'X',
                };
                write!(f, " {glyph} |")?;
            }
            writeln!(f)?;
            self.write_separator(f)?;
        }
        let mut footer = String::from(" ");
        for c in 0..self.width {
            footer.push_str(&format!("{c:^3} "));
        }
        write!(f, "{}", footer.trim_end())
    }
}
