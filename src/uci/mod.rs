//! The UCI protocol loop.
//!
//! Line-oriented dispatch over stdio. Handlers never propagate errors
//! across the command boundary: malformed input is logged and the loop
//! keeps reading. Searches run on the worker pool so stdin stays
//! responsive for `stop` and `quit`.

pub mod command;
pub mod options;

use std::fs::{File, OpenOptions};
use std::io::{BufRead, Write};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::board::Position;
use crate::threads::ThreadPool;

use self::command::UciCommand;
use self::options::{EngineOptions, OptionAction};

const ENGINE_NAME: &str = concat!("Sable ", env!("CARGO_PKG_VERSION"));
const ENGINE_AUTHOR: &str = "the Sable developers";

static DEBUG_LOG: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Append a line to the debug log file, if one is configured.
pub(crate) fn debug_log(line: &str) {
    let mut guard = DEBUG_LOG.lock();
    if let Some(file) = guard.as_mut() {
        let _ = writeln!(file, "{line}");
    }
}

fn set_debug_log(path: Option<&str>) {
    let mut guard = DEBUG_LOG.lock();
    *guard = path.and_then(|p| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(p)
            .map_err(|e| log::warn!("cannot open debug log '{p}': {e}"))
            .ok()
    });
}

/// Run the UCI loop until `quit`. Returns normally so the process exits
/// with status 0.
pub fn run() {
    let mut pos = Position::startpos();
    let mut options = EngineOptions::default();
    let mut pool = ThreadPool::new(options.threads, options.hash_mb);

    println!("{ENGINE_NAME} by {ENGINE_AUTHOR}");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        debug_log(&format!(">> {line}"));

        let Some(cmd) = command::parse(&line) else {
            if !line.trim().is_empty() {
                log::warn!("unknown command: {line}");
                eprintln!("Unknown command: '{}'", line.trim());
            }
            continue;
        };

        match cmd {
            UciCommand::Uci => {
                println!("id name {ENGINE_NAME}");
                println!("id author {ENGINE_AUTHOR}");
                println!();
                options.print_all();
                println!("uciok");
            }
            UciCommand::IsReady => println!("readyok"),
            UciCommand::SetOption { name, value } => {
                pool.wait_idle();
                match options.set(&name, value.as_deref()) {
                    Some(OptionAction::ResizeHash(mb)) => pool.resize_hash(mb),
                    Some(OptionAction::SetThreads(n)) => pool.set_threads(n),
                    Some(OptionAction::ClearHash) => pool.clear_hash(),
                    Some(OptionAction::SetLogFile(path)) => set_debug_log(path.as_deref()),
                    None => {}
                }
            }
            UciCommand::UciNewGame => {
                pool.wait_idle();
                pool.clear_hash();
                pos = Position::startpos();
            }
            UciCommand::Position { fen, moves } => {
                pool.wait_idle();
                apply_position(&mut pos, fen.as_deref(), &moves);
            }
            UciCommand::Go(limits) => {
                pool.wait_idle();
                pool.start_search(&pos, &limits);
            }
            UciCommand::Stop => pool.stop(),
            UciCommand::PonderHit => {} // accepted, nothing to do without pondering
            UciCommand::Display => println!("{pos}"),
            UciCommand::Quit => {
                pool.stop();
                pool.wait_idle();
                break;
            }
        }
    }
}

/// Rebuild the position from a `position` command. An invalid FEN keeps
/// the previous position; an invalid move keeps everything up to it.
fn apply_position(pos: &mut Position, fen: Option<&str>, moves: &[String]) {
    let parsed = match fen {
        None => Ok(Position::startpos()),
        Some(fen) => Position::try_from_fen(fen),
    };
    let mut next = match parsed {
        Ok(next) => next,
        Err(e) => {
            log::warn!("rejected FEN: {e}");
            eprintln!("Invalid FEN: {e}");
            return;
        }
    };

    for notation in moves {
        match next.parse_uci_move(notation) {
            Ok(m) => next.do_move(m),
            Err(e) => {
                log::warn!("rejected move: {e}");
                eprintln!("Invalid move: {e}");
                break;
            }
        }
    }
    *pos = next;
}
