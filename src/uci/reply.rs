//! Lines an engine writes back.

use std::fmt;

use crate::board::{decode_engine_reply, Move, MoveParseError};

/// A categorised engine output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciReply {
    /// "uciok" - engine is ready for UCI
    UciOk,
    /// "readyok" - engine is ready
    ReadyOk,
    /// "bestmove ..." with a real move
    BestMove { mv: Move, ponder: Option<Move> },
    /// "bestmove (none)" or "bestmove 0000": the engine has no move to play
    NoMove,
    /// "info ..." - analysis information
    Info(String),
    /// "id ..." - engine identification
    Id(String),
    /// Unknown/other output
    Other(String),
}

impl UciReply {
    /// Parse a raw output line.
    ///
    /// Only a `bestmove` line whose move token is malformed is an error;
    /// anything unrecognised becomes [`UciReply::Other`].
    pub fn parse(line: &str) -> Result<Self, MoveParseError> {
        let line = line.trim();

        let reply = if line == "uciok" {
            UciReply::UciOk
        } else if line == "readyok" {
            UciReply::ReadyOk
        } else if line == "bestmove" || line.starts_with("bestmove ") {
            return parse_bestmove(&line["bestmove".len()..]);
        } else if let Some(rest) = line.strip_prefix("info ") {
            UciReply::Info(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("id ") {
            UciReply::Id(rest.to_string())
        } else {
            UciReply::Other(line.to_string())
        };
        Ok(reply)
    }

    /// The line an engine writes for this reply
    #[must_use]
    pub fn to_uci_string(&self) -> String {
        match self {
            UciReply::UciOk => "uciok".to_string(),
            UciReply::ReadyOk => "readyok".to_string(),
            UciReply::BestMove { mv, ponder } => match ponder {
                Some(p) => format!("bestmove {mv} ponder {p}"),
                None => format!("bestmove {mv}"),
            },
            UciReply::NoMove => "bestmove (none)".to_string(),
            UciReply::Info(rest) => format!("info {rest}"),
            UciReply::Id(rest) => format!("id {rest}"),
            UciReply::Other(line) => line.clone(),
        }
    }
}

impl fmt::Display for UciReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci_string())
    }
}

fn parse_bestmove(rest: &str) -> Result<UciReply, MoveParseError> {
    let mut tokens = rest.split_whitespace();
    let mv = match tokens.next() {
        None | Some("(none)" | "0000") => return Ok(UciReply::NoMove),
        Some(token) => decode_engine_reply(token)?,
    };
    let ponder = match (tokens.next(), tokens.next()) {
        (Some("ponder"), Some(token)) => decode_engine_reply(token).ok(),
        _ => None,
    };
    Ok(UciReply::BestMove { mv, ponder })
}
