//! A single game with undo/redo.
//!
//! The session owns the sequence of board snapshots and whose turn it is. All
//! rule checking is delegated to [`Board::apply`]; the session only adds turn
//! order, passes, resignation and history navigation.

use std::fmt;

use crate::board::{Board, Color, Move, MoveError};
use crate::scoring::{KomiScore, Score};

/// Why a session action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    GameOver,
    NotYourTurn,
    NothingToUndo,
    NothingToRedo,
    Illegal(MoveError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::GameOver => write!(f, "game is over"),
            SessionError::NotYourTurn => write!(f, "not your turn"),
            SessionError::NothingToUndo => write!(f, "cannot undo: at start of game"),
            SessionError::NothingToRedo => write!(f, "cannot redo: at end of history"),
            SessionError::Illegal(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Illegal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(e: MoveError) -> Self {
        SessionError::Illegal(e)
    }
}

/// One entry of the game record.
#[derive(Debug, Clone)]
struct Ply {
    board: Board,
    /// Move that produced `board` (`None` for the initial position)
    mv: Option<Move>,
    /// Player to move at `board`
    to_move: Color,
    /// Consecutive passes leading up to `board`
    passes: u8,
}

/// Game state with history.
#[derive(Debug, Clone)]
pub struct Session {
    history: Vec<Ply>,
    current: usize,
    resigned: Option<Color>,
}

impl Session {
    pub fn new(size: usize) -> Self {
        Self {
            history: vec![Ply {
                board: Board::new(size),
                mv: None,
                to_move: Color::Black,
                passes: 0,
            }],
            current: 0,
            resigned: None,
        }
    }

    fn ply(&self) -> &Ply {
        &self.history[self.current]
    }

    pub fn board(&self) -> &Board {
        &self.ply().board
    }

    pub fn size(&self) -> usize {
        self.board().size()
    }

    pub fn to_move(&self) -> Color {
        self.ply().to_move
    }

    /// Move that produced the current position.
    pub fn last_move(&self) -> Option<Move> {
        self.ply().mv
    }

    /// Number of turns played (passes included) up to the current position.
    pub fn move_count(&self) -> usize {
        self.current
    }

    /// Color that resigned, if any.
    pub fn resigned(&self) -> Option<Color> {
        self.resigned
    }

    pub fn is_over(&self) -> bool {
        self.resigned.is_some() || self.ply().passes >= 2
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.history.len()
    }

    /// Play a stone or pass for the side to move.
    pub fn play(&mut self, mv: Move) -> Result<(), SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        if mv.color != self.to_move() {
            return Err(SessionError::NotYourTurn);
        }
        self.play_any(mv)
    }

    /// Play a stone or pass for `mv.color` whether or not it is that color's
    /// turn; its opponent moves next. Passes still count toward ending the
    /// game, and a stone after two passes resumes it. Only resignation blocks.
    pub fn play_any(&mut self, mv: Move) -> Result<(), SessionError> {
        if self.resigned.is_some() {
            return Err(SessionError::GameOver);
        }
        let ply = self.ply();
        let next = if mv.is_pass() {
            Ply {
                board: ply.board.clone(),
                mv: Some(mv),
                to_move: mv.color.opponent(),
                passes: ply.passes.saturating_add(1),
            }
        } else {
            Ply {
                board: ply.board.apply(mv)?,
                mv: Some(mv),
                to_move: mv.color.opponent(),
                passes: 0,
            }
        };
        self.push(next);
        Ok(())
    }

    /// Pass for the side to move. Two passes in a row end the game.
    pub fn pass(&mut self) -> Result<(), SessionError> {
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        self.play_any(Move::pass(self.to_move()))
    }

    /// The side to move resigns.
    pub fn resign(&mut self) {
        self.resigned = Some(self.to_move());
    }

    /// Step back one turn.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        if !self.can_undo() {
            return Err(SessionError::NothingToUndo);
        }
        self.current -= 1;
        self.resigned = None;
        Ok(())
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self) -> Result<(), SessionError> {
        if !self.can_redo() {
            return Err(SessionError::NothingToRedo);
        }
        self.current += 1;
        Ok(())
    }

    /// Area score of the current position, as is.
    pub fn score(&self) -> Score {
        self.board().area_score()
    }

    pub fn score_with_komi(&self, komi: f64) -> KomiScore {
        self.board().score_with_komi(komi)
    }

    /// Score after removing dead stones.
    pub fn final_score(&self, komi: f64) -> KomiScore {
        self.board().final_score(komi)
    }

    /// Whether `color` could end the game now with a pass and win: the
    /// opponent just passed and the final score already favors `color`.
    pub fn pass_wins(&self, color: Color, komi: f64) -> bool {
        let opponent_passed = self
            .last_move()
            .is_some_and(|m| m.is_pass() && m.color == color.opponent());
        opponent_passed && !self.is_over() && self.final_score(komi).winner == Some(color)
    }

    fn push(&mut self, ply: Ply) {
        self.history.truncate(self.current + 1);
        self.history.push(ply);
        self.current += 1;
    }
}
