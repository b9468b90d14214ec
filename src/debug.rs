//! Position-filterable verbosity control, layered on top of `log` for the
//! one case `log`'s level filter can't express: "trace only at the one
//! input position I'm chasing a furthest-failure diagnostic from."
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugLevel {
    Off,
    Basic,
    Detailed,
    Trace,
}

#[derive(Debug, Clone)]
pub struct DebugConfig {
    pub level: DebugLevel,
    pub position_filter: Option<usize>,
    pub failure_only: bool,
}

impl DebugLevel {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "off" => Ok(DebugLevel::Off),
            "basic" => Ok(DebugLevel::Basic),
            "detailed" => Ok(DebugLevel::Detailed),
            "trace" => Ok(DebugLevel::Trace),
            _ => Err(format!("invalid debug level: {s}")),
        }
    }

    pub fn includes(&self, level: DebugLevel) -> bool {
        match self {
            DebugLevel::Off => false,
            DebugLevel::Basic => matches!(level, DebugLevel::Basic),
            DebugLevel::Detailed => matches!(level, DebugLevel::Basic | DebugLevel::Detailed),
            DebugLevel::Trace => true,
        }
    }
}

static DEBUG_CONFIG: OnceLock<DebugConfig> = OnceLock::new();

pub fn set_debug_level(level: DebugLevel) {
    set_debug_config(DebugConfig {
        level,
        position_filter: None,
        failure_only: false,
    });
}

pub fn set_debug_config(config: DebugConfig) {
    DEBUG_CONFIG.set(config).unwrap_or_else(|_| {
        eprintln!("warning: debug config already set");
    });
}

pub fn get_debug_level() -> DebugLevel {
    DEBUG_CONFIG
        .get()
        .map(|c| c.level)
        .unwrap_or(DebugLevel::Off)
}

pub fn get_debug_config() -> DebugConfig {
    DEBUG_CONFIG.get().cloned().unwrap_or(DebugConfig {
        level: DebugLevel::Off,
        position_filter: None,
        failure_only: false,
    })
}

pub fn debug_basic_print(msg: &str) {
    if get_debug_level().includes(DebugLevel::Basic) {
        println!("{msg}");
    }
}

pub fn debug_detailed_print(msg: &str) {
    if get_debug_level().includes(DebugLevel::Detailed) {
        println!("{msg}");
    }
}

pub fn debug_trace_print(msg: &str) {
    if get_debug_level().includes(DebugLevel::Trace) {
        println!("{msg}");
    }
}

/// Trace a matcher event at `pos`, honoring the configured position filter
/// so a user chasing one furthest-failure position isn't flooded.
pub fn debug_matcher_at_pos(pos: usize, msg: &str) {
    let config = get_debug_config();
    if !config.level.includes(DebugLevel::Trace) {
        return;
    }
    if let Some(filter_pos) = config.position_filter {
        if pos != filter_pos {
            return;
        }
    }
    println!("[match@{pos}] {msg}");
}

#[macro_export]
macro_rules! debug_basic {
    ($($arg:tt)*) => {
        $crate::debug::debug_basic_print(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_detailed {
    ($($arg:tt)*) => {
        $crate::debug::debug_detailed_print(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        $crate::debug::debug_trace_print(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_matcher_pos {
    ($pos:expr, $($arg:tt)*) => {
        $crate::debug::debug_matcher_at_pos($pos, &format!($($arg)*))
    };
}

/// Prints the teacher-style furthest-failure context block: the error, the
/// offending line, and a caret pointer.
pub fn debug_parse_failure(input: &str, position: usize, error: &str) {
    if get_debug_level() == DebugLevel::Off {
        return;
    }

    println!("=== PARSE FAILURE ===");
    println!("Error: {error}");
    println!("Input: {input}");

    let chars: Vec<char> = input.chars().collect();
    if position < chars.len() {
        println!("Failed at position {position}: '{}'", chars[position]);

        let start = position.saturating_sub(10);
        let end = (position + 10).min(chars.len());
        let context: String = chars[start..end].iter().collect();
        let pointer_pos = position - start;

        println!("Context: {context}");
        println!("         {}^", " ".repeat(pointer_pos));
    } else {
        println!("Failed at end of input (position {position})");
    }
}
