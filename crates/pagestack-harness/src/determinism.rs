#![forbid(unsafe_code)]

//! Deterministic fixtures and frame hashing for replays and storms.
//!
//! Seeds and run ids come from the environment so a failing CI run can be
//! reproduced locally with the same `PAGESTACK_SEED`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use pagestack::{Orientation, StackFrame};
use serde_json::{Map, Value, json};

/// Shared deterministic fixture for one harness run.
#[derive(Debug)]
pub struct DeterminismFixture {
    seed: u64,
    deterministic: bool,
    run_id: String,
    ts_counter: AtomicU64,
}

impl DeterminismFixture {
    /// Create a fixture, reading the seed and mode from the environment.
    pub fn new(prefix: &str, default_seed: u64) -> Self {
        Self::new_with(prefix, fixture_seed(default_seed), deterministic_mode())
    }

    /// Create a fixture with explicit configuration.
    pub fn new_with(prefix: &str, seed: u64, deterministic: bool) -> Self {
        let run_id = if deterministic {
            format!("{prefix}_seed{seed}")
        } else {
            format!("{prefix}_{}_{}", std::process::id(), unix_secs())
        };
        Self {
            seed,
            deterministic,
            run_id,
            ts_counter: AtomicU64::new(0),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deterministic(&self) -> bool {
        self.deterministic
    }

    /// Stable run identifier for JSONL logs.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Deterministic timestamp string (or wall time if disabled).
    pub fn timestamp(&self) -> String {
        if self.deterministic {
            let n = self.ts_counter.fetch_add(1, Ordering::Relaxed);
            format!("T{n:06}")
        } else {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            format!("{}.{:03}", now.as_secs(), now.subsec_millis())
        }
    }

    /// Build one JSONL record with the run envelope (`ts`, `event`, `run_id`,
    /// `seed`) followed by `fields`. Explicit fields win over the envelope.
    pub fn record(&self, event: &str, fields: Map<String, Value>) -> String {
        let mut obj = Map::new();
        obj.insert("ts".into(), json!(self.timestamp()));
        obj.insert("event".into(), json!(event));
        obj.insert("run_id".into(), json!(self.run_id));
        obj.insert("seed".into(), json!(self.seed));
        obj.extend(fields);
        Value::Object(obj).to_string()
    }
}

/// True when any deterministic-mode flag is set.
pub fn deterministic_mode() -> bool {
    env_flag("PAGESTACK_DETERMINISTIC") || env_flag("E2E_DETERMINISTIC")
}

/// Seed from the environment, falling back to `default_seed`.
pub fn fixture_seed(default_seed: u64) -> u64 {
    env_u64("PAGESTACK_SEED")
        .or_else(|| env_u64("E2E_SEED"))
        .unwrap_or(default_seed)
}

/// BLAKE3 hash of everything a renderer would commit for `frame`.
///
/// Covers the active and peeked indices, the orientation, and every card's
/// final position as little-endian `f64` bytes.
pub fn frame_hash(frame: &StackFrame) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&frame.active_index().to_le_bytes());
    let peeked = frame.peeked.map_or(u64::MAX, |p| p as u64);
    hasher.update(&peeked.to_le_bytes());
    hasher.update(match frame.orientation {
        Orientation::Horizontal => b"h",
        Orientation::Vertical => b"v",
    });
    hasher.update(&(frame.cards.len() as u64).to_le_bytes());
    for card in &frame.cards {
        hasher.update(&card.position.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
        .unwrap_or(false)
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
