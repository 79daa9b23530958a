//! Rules of the grid game: geometry, victory, and the draw.

use shared_types::entities::{Board, CellState, PlayerMark};

/// Parameters of the game being played.
///
/// The board size travels with each session record (sessions created under
/// an older configuration keep playing under it); the ruleset supplies the
/// win length and validates that the two are compatible.
#[derive(Debug, Clone)]
pub struct Ruleset {
    /// Side length of the square board.
    pub board_size: u8,
    /// Number of aligned marks needed to win.
    pub win_length: u8,
    /// Starting move-time budget per player, in milliseconds.
    pub initial_time_ms: u64,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            board_size: 9,
            win_length: 5,
            initial_time_ms: 120_000,
        }
    }
}

/// The four scan axes: row, column, and both diagonals.
const AXES: [(i16, i16); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

impl Ruleset {
    /// Checks the parameters are playable: the board must be able to hold
    /// a winning line, and a line shorter than 3 is not a game.
    pub fn validate(&self) -> Result<(), String> {
        if self.board_size < 3 || self.board_size > 25 {
            return Err(format!(
                "board size {} out of range 3..=25",
                self.board_size
            ));
        }
        if self.win_length < 3 {
            return Err(format!("win length {} below minimum 3", self.win_length));
        }
        if self.win_length > self.board_size {
            return Err(format!(
                "win length {} does not fit on a {}x{} board",
                self.win_length, self.board_size, self.board_size
            ));
        }
        if self.initial_time_ms == 0 {
            return Err("initial time budget must be positive".to_string());
        }
        Ok(())
    }

    /// Whether the mark just placed at `(x, y)` completes a winning line.
    ///
    /// Only lines through the new cell are scanned; every older line was
    /// already checked when its last cell landed.
    #[must_use]
    pub fn is_winning_move(&self, board: &Board, x: u8, y: u8, mark: PlayerMark) -> bool {
        let cell = CellState::from(mark);
        AXES.iter().any(|&(dx, dy)| {
            let run = 1
                + self.run_length(board, x, y, cell, dx, dy)
                + self.run_length(board, x, y, cell, -dx, -dy);
            run >= self.win_length
        })
    }

    /// Whether the position is a draw: every cell filled, no winner.
    #[must_use]
    pub fn is_draw(&self, board: &Board) -> bool {
        board.is_full()
    }

    /// Consecutive `cell` marks strictly beyond `(x, y)` along `(dx, dy)`.
    fn run_length(&self, board: &Board, x: u8, y: u8, cell: CellState, dx: i16, dy: i16) -> u8 {
        let mut run = 0;
        let mut cx = i16::from(x) + dx;
        let mut cy = i16::from(y) + dy;
        while cx >= 0 && cy >= 0 {
            match board.cell(cx as u8, cy as u8) {
                Some(c) if c == cell => run += 1,
                _ => break,
            }
            cx += dx;
            cy += dy;
        }
        run
    }
}
