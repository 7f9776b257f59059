//! UCI command parsing.

use crate::search::SearchLimits;

/// A parsed GUI-to-engine command.
#[derive(Debug, Clone)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go(SearchLimits),
    SetOption {
        name: String,
        value: Option<String>,
    },
    Stop,
    PonderHit,
    Display,
    Quit,
}

/// Parse one input line. Returns `None` for empty or unknown commands;
/// the caller logs and carries on.
#[must_use]
pub fn parse(line: &str) -> Option<UciCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.first()? {
        &"uci" => Some(UciCommand::Uci),
        &"isready" => Some(UciCommand::IsReady),
        &"ucinewgame" => Some(UciCommand::UciNewGame),
        &"position" => parse_position(&parts),
        &"go" => Some(UciCommand::Go(parse_go(&parts))),
        &"setoption" => parse_setoption(&parts),
        &"stop" => Some(UciCommand::Stop),
        &"ponderhit" => Some(UciCommand::PonderHit),
        &"d" | &"display" => Some(UciCommand::Display),
        &"quit" => Some(UciCommand::Quit),
        _ => None,
    }
}

fn parse_position(parts: &[&str]) -> Option<UciCommand> {
    let mut i = 1;
    let fen = match parts.get(i)? {
        &"startpos" => {
            i += 1;
            None
        }
        &"fen" => {
            // A FEN is up to six whitespace-separated fields, ending
            // early at the "moves" keyword.
            let start = i + 1;
            let mut end = start;
            while end < parts.len() && end - start < 6 && parts[end] != "moves" {
                end += 1;
            }
            if end == start {
                return None;
            }
            i = end;
            Some(parts[start..end].join(" "))
        }
        _ => return None,
    };

    let mut moves = Vec::new();
    if parts.get(i) == Some(&"moves") {
        moves.extend(parts[i + 1..].iter().map(|s| (*s).to_string()));
    }

    Some(UciCommand::Position { fen, moves })
}

fn parse_go(parts: &[&str]) -> SearchLimits {
    let mut limits = SearchLimits::default();
    let mut i = 1;
    while i < parts.len() {
        let arg = |offset: usize| parts.get(i + offset).copied();
        match parts[i] {
            "wtime" => {
                if let Some(v) = arg(1).and_then(|s| s.parse().ok()) {
                    limits.time[0] = v;
                }
                i += 2;
            }
            "btime" => {
                if let Some(v) = arg(1).and_then(|s| s.parse().ok()) {
                    limits.time[1] = v;
                }
                i += 2;
            }
            "winc" => {
                if let Some(v) = arg(1).and_then(|s| s.parse().ok()) {
                    limits.inc[0] = v;
                }
                i += 2;
            }
            "binc" => {
                if let Some(v) = arg(1).and_then(|s| s.parse().ok()) {
                    limits.inc[1] = v;
                }
                i += 2;
            }
            "movestogo" => {
                limits.movestogo = arg(1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "movetime" => {
                limits.movetime = arg(1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "depth" => {
                limits.depth = arg(1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "nodes" => {
                limits.nodes = arg(1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "mate" => {
                limits.mate = arg(1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "infinite" => {
                limits.infinite = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    limits
}

fn parse_setoption(parts: &[&str]) -> Option<UciCommand> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";
    for part in &parts[1..] {
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
    Some(UciCommand::SetOption {
        name: name_parts.join(" "),
        value: if value_parts.is_empty() {
            None
        } else {
            Some(value_parts.join(" "))
        },
    })
}
