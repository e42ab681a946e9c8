//! Commands sent from the game to an engine.

use std::fmt;

/// How long an engine may think about one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoLimit {
    /// Fixed thinking time in milliseconds
    MoveTime(u64),
    /// Fixed search depth in plies
    Depth(u32),
    /// Until told to stop
    Infinite,
}

impl Default for GoLimit {
    fn default() -> Self {
        GoLimit::MoveTime(1000)
    }
}

impl fmt::Display for GoLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoLimit::MoveTime(ms) => write!(f, "movetime {ms}"),
            GoLimit::Depth(d) => write!(f, "depth {d}"),
            GoLimit::Infinite => f.write_str("infinite"),
        }
    }
}

/// UCI commands that can be sent to an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    /// Set an engine option; options without a value are buttons
    SetOption { name: String, value: Option<String> },
    /// Set position (startpos when `fen` is `None`), with optional moves
    Position { fen: Option<String>, moves: Vec<String> },
    Go(GoLimit),
    Stop,
    Quit,
}

impl UciCommand {
    /// Convert command to UCI protocol string
    #[must_use]
    pub fn to_uci_string(&self) -> String {
        match self {
            UciCommand::Uci => "uci".to_string(),
            UciCommand::IsReady => "isready".to_string(),
            UciCommand::UciNewGame => "ucinewgame".to_string(),
            UciCommand::SetOption { name, value } => match value {
                Some(value) => format!("setoption name {name} value {value}"),
                None => format!("setoption name {name}"),
            },
            UciCommand::Position { fen, moves } => {
                let mut cmd = String::from("position ");
                match fen {
                    Some(f) => {
                        cmd.push_str("fen ");
                        cmd.push_str(f);
                    }
                    None => cmd.push_str("startpos"),
                }
                if !moves.is_empty() {
                    cmd.push_str(" moves ");
                    cmd.push_str(&moves.join(" "));
                }
                cmd
            }
            UciCommand::Go(limit) => format!("go {limit}"),
            UciCommand::Stop => "stop".to_string(),
            UciCommand::Quit => "quit".to_string(),
        }
    }

    /// Parse a command line as an engine receives it.
    ///
    /// Returns `None` for blank or unrecognised lines, which an engine
    /// ignores.
    #[must_use]
    pub fn parse(line: &str) -> Option<UciCommand> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (&head, rest) = parts.split_first()?;

        let cmd = match head {
            "uci" => UciCommand::Uci,
            "isready" => UciCommand::IsReady,
            "ucinewgame" => UciCommand::UciNewGame,
            "setoption" => {
                let (name, value) = parse_setoption(rest)?;
                UciCommand::SetOption { name, value }
            }
            "position" => parse_position(rest)?,
            "go" => UciCommand::Go(parse_go(rest)),
            "stop" => UciCommand::Stop,
            "quit" => UciCommand::Quit,
            _ => return None,
        };
        Some(cmd)
    }
}

impl fmt::Display for UciCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci_string())
    }
}

fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Some((name, value))
}

fn parse_position(parts: &[&str]) -> Option<UciCommand> {
    let moves_at = parts.iter().position(|&p| p == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&parts[..i], &parts[i + 1..]),
        None => (parts, &[][..]),
    };

    let fen = match setup.split_first() {
        Some((&"startpos", [])) => None,
        Some((&"fen", fields)) if !fields.is_empty() => Some(fields.join(" ")),
        _ => return None,
    };

    Some(UciCommand::Position {
        fen,
        moves: moves.iter().map(|m| (*m).to_string()).collect(),
    })
}

/// Only `movetime`, `depth` and `infinite` are understood; clock-based
/// limits fall back to the default think time.
fn parse_go(parts: &[&str]) -> GoLimit {
    let value_after = |key: &str| {
        parts
            .iter()
            .position(|&p| p == key)
            .and_then(|i| parts.get(i + 1))
    };

    if let Some(ms) = value_after("movetime").and_then(|v| v.parse::<u64>().ok()) {
        GoLimit::MoveTime(ms)
    } else if let Some(depth) = value_after("depth").and_then(|v| v.parse::<u32>().ok()) {
        GoLimit::Depth(depth)
    } else if parts.contains(&"infinite") {
        GoLimit::Infinite
    } else {
        GoLimit::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_uci_string() {
        assert_eq!(UciCommand::Uci.to_uci_string(), "uci");
        assert_eq!(UciCommand::IsReady.to_uci_string(), "isready");
        assert_eq!(
            UciCommand::Go(GoLimit::MoveTime(250)).to_uci_string(),
            "go movetime 250"
        );
        assert_eq!(UciCommand::Go(GoLimit::Depth(8)).to_uci_string(), "go depth 8");
        assert_eq!(
            UciCommand::SetOption {
                name: "Skill Level".to_string(),
                value: Some("3".to_string())
            }
            .to_uci_string(),
            "setoption name Skill Level value 3"
        );
    }

    #[test]
    fn test_position_string() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let cmd = UciCommand::Position {
            fen: Some(fen.to_string()),
            moves: vec![],
        };
        assert_eq!(cmd.to_uci_string(), format!("position fen {fen}"));

        let cmd = UciCommand::Position {
            fen: None,
            moves: vec!["e2e4".to_string(), "e7e5".to_string()],
        };
        assert_eq!(cmd.to_uci_string(), "position startpos moves e2e4 e7e5");
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(UciCommand::parse("uci"), Some(UciCommand::Uci));
        assert_eq!(UciCommand::parse("  isready \n"), Some(UciCommand::IsReady));
        assert_eq!(UciCommand::parse("quit"), Some(UciCommand::Quit));
        assert_eq!(UciCommand::parse(""), None);
        assert_eq!(UciCommand::parse("xyzzy"), None);
    }

    #[test]
    fn test_parse_position_round_trip() {
        let commands = [
            UciCommand::Position {
                fen: None,
                moves: vec![],
            },
            UciCommand::Position {
                fen: Some("8/8/8/8/8/8/8/K1k5 w - - 0 1".to_string()),
                moves: vec!["a1a2".to_string()],
            },
        ];
        for cmd in commands {
            assert_eq!(UciCommand::parse(&cmd.to_uci_string()), Some(cmd));
        }
        assert_eq!(UciCommand::parse("position"), None);
        assert_eq!(UciCommand::parse("position fen"), None);
    }

    #[test]
    fn test_parse_go() {
        assert_eq!(
            UciCommand::parse("go movetime 100"),
            Some(UciCommand::Go(GoLimit::MoveTime(100)))
        );
        assert_eq!(
            UciCommand::parse("go depth 3"),
            Some(UciCommand::Go(GoLimit::Depth(3)))
        );
        assert_eq!(
            UciCommand::parse("go infinite"),
            Some(UciCommand::Go(GoLimit::Infinite))
        );
        assert_eq!(
            UciCommand::parse("go wtime 1000 btime 1000"),
            Some(UciCommand::Go(GoLimit::default()))
        );
    }

    #[test]
    fn test_parse_setoption() {
        assert_eq!(
            UciCommand::parse("setoption name Skill Level value 3"),
            Some(UciCommand::SetOption {
                name: "Skill Level".to_string(),
                value: Some("3".to_string())
            })
        );
        assert_eq!(
            UciCommand::parse("setoption name Clear Hash"),
            Some(UciCommand::SetOption {
                name: "Clear Hash".to_string(),
                value: None
            })
        );
        assert_eq!(UciCommand::parse("setoption value 3"), None);
    }
}
