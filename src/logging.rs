//! Structured logging for the dashboard process.
//!
//! JSON lines on stderr, one record per event: timestamp, level, domain,
//! event name, free-form fields. `LOG_LEVEL` filters at emit time.

use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Log levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

// =============================================================================
// Log domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Feed,    // Alert polling, decode
    Render,  // Scene generation
    Mission, // Mission selection and briefing loads
    Cycle,   // Run-cycle fetch and merge
    Server,  // HTTP request handling
    System,  // Startup, shutdown
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Feed => "feed",
            Domain::Render => "render",
            Domain::Mission => "mission",
            Domain::Cycle => "cycle",
            Domain::Server => "server",
            Domain::System => "system",
        }
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

static SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    SEQ.fetch_add(1, Ordering::Relaxed)
}

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() {
        return;
    }
    emit_record(level, domain.as_str(), event, fields);
}

/// Info-level shorthand keyed by domain name
pub fn json_log(domain: Domain, event: &str, fields: Map<String, Value>) {
    log(Level::Info, domain, event, fields);
}

fn emit_record(level: Level, domain: &str, event: &str, fields: Map<String, Value>) {
    let mut entry = Map::new();
    entry.insert("ts".to_string(), Value::String(ts_now()));
    entry.insert("seq".to_string(), Value::from(next_seq()));
    entry.insert("lvl".to_string(), Value::String(level.as_str().to_string()));
    entry.insert("domain".to_string(), Value::String(domain.to_string()));
    entry.insert("event".to_string(), Value::String(event.to_string()));
    for (k, v) in fields {
        entry.insert(k, v);
    }
    eprintln!("{}", Value::Object(entry));
}

// =============================================================================
// Field construction helpers
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    serde_json::json!(n)
}
