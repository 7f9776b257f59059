//! The engine option registry.
//!
//! Option names are compared case-insensitively, as GUIs take liberties
//! with capitalisation. Setting an option may return an action for the
//! caller to apply to the thread pool; callbacks only ever run between
//! searches.

pub const DEFAULT_HASH_MB: usize = 16;
pub const MAX_HASH_MB: usize = 33_554_432;
pub const DEFAULT_THREADS: usize = 1;
pub const MAX_THREADS: usize = 1024;

/// Side effect the caller must carry out after an option change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionAction {
    ResizeHash(usize),
    SetThreads(usize),
    ClearHash,
    SetLogFile(Option<String>),
}

/// Current option values.
pub struct EngineOptions {
    pub hash_mb: usize,
    pub threads: usize,
    pub ponder: bool,
    pub debug_log_file: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            hash_mb: DEFAULT_HASH_MB,
            threads: DEFAULT_THREADS,
            ponder: false,
            debug_log_file: None,
        }
    }
}

impl EngineOptions {
    /// Print the option list in the `uci` handshake.
    pub fn print_all(&self) {
        println!(
            "option name Threads type spin default {DEFAULT_THREADS} min 1 max {MAX_THREADS}"
        );
        println!(
            "option name Hash type spin default {DEFAULT_HASH_MB} min 1 max {MAX_HASH_MB}"
        );
        println!("option name Clear Hash type button");
        println!("option name Ponder type check default false");
        println!("option name Debug Log File type string default");
    }

    /// Apply `setoption`. Unknown names and out-of-range values are
    /// rejected with a log line; the engine never crashes on them.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> Option<OptionAction> {
        match name.trim().to_ascii_lowercase().as_str() {
            "threads" => {
                let threads = value?.parse::<usize>().ok()?.clamp(1, MAX_THREADS);
                if threads != self.threads {
                    self.threads = threads;
                    return Some(OptionAction::SetThreads(threads));
                }
                None
            }
            "hash" => {
                let mb = value?.parse::<usize>().ok()?.clamp(1, MAX_HASH_MB);
                if mb != self.hash_mb {
                    self.hash_mb = mb;
                    return Some(OptionAction::ResizeHash(mb));
                }
                None
            }
            "clear hash" => Some(OptionAction::ClearHash),
            "ponder" => {
                // Accepted for GUI compatibility; the engine does not
                // ponder.
                self.ponder = matches!(
                    value.map(str::to_ascii_lowercase).as_deref(),
                    Some("true" | "1")
                );
                None
            }
            "debug log file" => {
                self.debug_log_file = value
                    .map(str::trim)
                    .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("<empty>"))
                    .map(ToString::to_string);
                Some(OptionAction::SetLogFile(self.debug_log_file.clone()))
            }
            other => {
                log::warn!("ignoring unknown option '{other}'");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        let mut options = EngineOptions::default();
        assert_eq!(
            options.set("hAsH", Some("64")),
            Some(OptionAction::ResizeHash(64))
        );
        assert_eq!(options.hash_mb, 64);
        assert_eq!(
            options.set("THREADS", Some("4")),
            Some(OptionAction::SetThreads(4))
        );
        assert_eq!(options.threads, 4);
    }

    #[test]
    fn redundant_set_is_a_no_op() {
        let mut options = EngineOptions::default();
        assert_eq!(options.set("Hash", Some("16")), None);
    }

    #[test]
    fn values_are_clamped() {
        let mut options = EngineOptions::default();
        assert_eq!(
            options.set("Threads", Some("0")),
            Some(OptionAction::SetThreads(1))
        );
        assert_eq!(options.set("Hash", Some("0")), Some(OptionAction::ResizeHash(1)));
    }

    #[test]
    fn junk_is_rejected() {
        let mut options = EngineOptions::default();
        assert_eq!(options.set("Hash", Some("plenty")), None);
        assert_eq!(options.set("NoSuchOption", Some("1")), None);
        assert_eq!(options.hash_mb, DEFAULT_HASH_MB);
    }

    #[test]
    fn ponder_toggles_without_action() {
        let mut options = EngineOptions::default();
        assert_eq!(options.set("Ponder", Some("true")), None);
        assert!(options.ponder);
        assert_eq!(options.set("Ponder", Some("false")), None);
        assert!(!options.ponder);
    }

    #[test]
    fn button_and_string_options() {
        let mut options = EngineOptions::default();
        assert_eq!(options.set("Clear Hash", None), Some(OptionAction::ClearHash));
        assert_eq!(
            options.set("Debug Log File", Some("/tmp/sable.log")),
            Some(OptionAction::SetLogFile(Some("/tmp/sable.log".to_string())))
        );
    }
}
