//! Go Text Protocol (GTP v2) front-end.
//!
//! Wraps a [`Session`] and an [`MctsBot`] behind the line-oriented GTP command
//! set so graphical clients such as Sabaki or GoGui can drive the engine.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Start a new game on a `size` x `size` board (1 to 19)
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi for scoring and search
//! - `play <color> <vertex>` - Play a move (`pass` is a vertex)
//! - `genmove <color>` - Search, play and print a move for the given color
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//! - `final_score` - Score the position with dead stones removed
//!
//! Vertices use letters `A`..`T` (no `I`) for columns and row 1 at the bottom,
//! so `A1` is the lower-left corner of the printed board.
//!
//! ## Example
//!
//! ```no_run
//! use gogo::gtp::GtpEngine;
//! let mut engine = GtpEngine::default();
//! engine.run(std::io::stdin().lock(), std::io::stdout()).unwrap();
//! ```

use std::io::{BufRead, Write};

use crate::board::{Board, Color, Move};
use crate::constants::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use crate::mcts::{MctsBot, MctsConfig};
use crate::session::Session;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// Column letters; GTP skips `I`.
const COLUMNS: &str = "ABCDEFGHJKLMNOPQRST";

/// GTP engine state.
pub struct GtpEngine {
    session: Session,
    bot: MctsBot,
    komi: f64,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE, MctsConfig::default())
    }
}

impl GtpEngine {
    /// Create an engine for a `size` x `size` board searching with `config`.
    pub fn new(size: usize, config: MctsConfig) -> Self {
        let komi = config.komi;
        Self {
            session: Session::new(size),
            bot: MctsBot::new(config),
            komi,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                tracing::warn!(command = %command_line, "gtp error: {message}");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0
            && let Ok(id) = trimmed[..end].parse::<u32>()
        {
            return (Some(id), trimmed[end..].trim());
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if (1..=MAX_BOARD_SIZE).contains(&size) => {
                        self.new_game(size);
                        (true, String::new())
                    }
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.new_game(self.session.size());
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f64>() {
                    Ok(komi) if komi.is_finite() => {
                        self.komi = komi;
                        self.bot.set_komi(komi);
                        (true, String::new())
                    }
                    _ => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Some(color) = parse_color(color) else {
                    return (false, "invalid color".to_string());
                };
                let Some(mv) = parse_vertex(self.session.board(), vertex, color) else {
                    return (false, "invalid vertex".to_string());
                };
                match self.session.play_any(mv) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|c| parse_color(c)) else {
                    return (false, "invalid color".to_string());
                };
                let mv = if self.session.pass_wins(color, self.komi) {
                    Move::pass(color)
                } else {
                    self.bot.select_move(self.session.board(), color)
                };
                match self.session.play_any(mv) {
                    Ok(()) => (true, format_vertex(self.session.board(), mv)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "undo" => match self.session.undo() {
                Ok(()) => {
                    self.bot.reset();
                    (true, String::new())
                }
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.session.board())),

            "final_score" => match self.session.resigned() {
                Some(Color::Black) => (true, "W+R".to_string()),
                Some(_) => (true, "B+R".to_string()),
                None => (true, self.session.final_score(self.komi).to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn new_game(&mut self, size: usize) {
        self.session = Session::new(size);
        self.bot.reset();
    }
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// Parse a vertex such as `D4` or `pass` into a move for `color`.
pub fn parse_vertex(board: &Board, vertex: &str, color: Color) -> Option<Move> {
    let vertex = vertex.to_uppercase();
    if vertex == "PASS" {
        return Some(Move::pass(color));
    }
    let mut chars = vertex.chars();
    let letter = chars.next()?;
    let x = COLUMNS.find(letter)? + 1;
    let row: usize = chars.as_str().parse().ok()?;
    let size = board.size();
    if x > size || row == 0 || row > size {
        return None;
    }
    Some(Move::new(board.point(x, size + 1 - row), color))
}

/// Format a move as a GTP vertex.
pub fn format_vertex(board: &Board, mv: Move) -> String {
    if mv.is_pass() {
        return "pass".to_string();
    }
    let (x, y) = board.xy(mv.point);
    let letter = COLUMNS.as_bytes()[x - 1] as char;
    format!("{letter}{}", board.size() + 1 - y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::Budget;

    fn engine() -> GtpEngine {
        GtpEngine::new(
            9,
            MctsConfig {
                budget: Budget::Simulations(30),
                seed: Some(3),
                ..MctsConfig::default()
            },
        )
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "gogo");
    }

    #[test]
    fn test_protocol_version() {
        let mut engine = engine();
        let (success, response) = engine.execute("protocol_version", &[]);
        assert!(success);
        assert_eq!(response, "2");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["unknown_cmd"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        assert!(engine.execute("boardsize", &["13"]).0);
        assert_eq!(engine.session.size(), 13);
        assert!(!engine.execute("boardsize", &["25"]).0);
        assert!(!engine.execute("boardsize", &["x"]).0);
        assert_eq!(engine.session.size(), 13);
    }

    #[test]
    fn test_vertex_mapping() {
        let board = Board::new(9);
        let a1 = parse_vertex(&board, "A1", Color::Black).unwrap();
        assert_eq!(board.xy(a1.point), (1, 9));
        let j9 = parse_vertex(&board, "j9", Color::Black).unwrap();
        assert_eq!(board.xy(j9.point), (9, 1));
        assert!(parse_vertex(&board, "I5", Color::Black).is_none());
        assert!(parse_vertex(&board, "K1", Color::Black).is_none());
        assert!(parse_vertex(&board, "A0", Color::Black).is_none());
        assert!(parse_vertex(&board, "pass", Color::White).unwrap().is_pass());
        assert_eq!(format_vertex(&board, j9), "J9");
        assert_eq!(format_vertex(&board, Move::pass(Color::White)), "pass");
    }

    #[test]
    fn test_play_undo_and_clear() {
        let mut engine = engine();
        assert!(engine.execute("play", &["black", "D4"]).0);
        let (success, response) = engine.execute("play", &["white", "D4"]);
        assert!(!success);
        assert_eq!(response, "illegal move: point not empty");
        // Controllers may set up positions out of turn.
        assert!(engine.execute("play", &["black", "E5"]).0);
        assert_eq!(engine.session.to_move(), Color::White);

        assert!(engine.execute("undo", &[]).0);
        assert!(engine.execute("undo", &[]).0);
        assert_eq!(engine.session.move_count(), 0);
        assert!(!engine.execute("undo", &[]).0);

        engine.execute("play", &["b", "C3"]);
        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.session.move_count(), 0);
    }

    #[test]
    fn test_genmove_plays_legal_move() {
        let mut engine = engine();
        let before = engine.session.board().clone();
        let (success, vertex) = engine.execute("genmove", &["black"]);
        assert!(success);
        let mv = parse_vertex(&before, &vertex, Color::Black).unwrap();
        assert!(before.is_legal(mv));
        assert_eq!(engine.session.to_move(), Color::White);

        // Asking for the same color again still gets a legal move.
        let before = engine.session.board().clone();
        let (success, vertex) = engine.execute("genmove", &["black"]);
        assert!(success);
        let mv = parse_vertex(&before, &vertex, Color::Black).unwrap();
        assert!(before.is_legal(mv));
        assert_eq!(engine.session.to_move(), Color::White);
    }

    #[test]
    fn test_final_score_and_pass_reply() {
        let mut engine = engine();
        engine.execute("komi", &["0.5"]);
        engine.execute("play", &["b", "E5"]);
        engine.execute("play", &["w", "pass"]);
        assert_eq!(engine.execute("final_score", &[]), (true, "B+80.5".to_string()));
        // Black is winning, so it answers the pass and the game ends.
        assert_eq!(engine.execute("genmove", &["b"]), (true, "pass".to_string()));
        assert!(engine.session.is_over());
    }

    #[test]
    fn test_run_loop() {
        let mut engine = engine();
        let input = b"1 name\n# comment\n\nbogus\n2 boardsize 5\nquit\nname\n";
        let mut output = Vec::new();
        engine.run(&input[..], &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "=1 gogo\n\n? unknown command: bogus\n\n=2 \n\n= \n\n");
    }

    #[test]
    fn test_run_loop_same_color_twice() {
        let mut engine = engine();
        let input = b"1 play B D4\n2 play B E5\n3 play W E5\n4 play W C3\n";
        let mut output = Vec::new();
        engine.run(&input[..], &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "=1 \n\n=2 \n\n?3 illegal move: point not empty\n\n=4 \n\n"
        );
        let board = engine.session.board();
        assert_eq!(board.stone_count(Color::Black), 2);
        assert_eq!(board.stone_count(Color::White), 1);
        assert_eq!(engine.session.to_move(), Color::Black);
    }
}
