//! Request statistics served on `/.status`.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Default)]
struct Counters {
    status_code_count: BTreeMap<String, u64>,
    total_count: u64,
    total_response_time: Duration,
}

/// Records the status code and latency of every routed response.
#[derive(Debug)]
pub struct StatusRecorder {
    started: Instant,
    counters: Mutex<Counters>,
}

/// Snapshot of the recorder, serialized for `/.status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    pub pid: u32,
    pub up_time: String,
    pub up_time_sec: f64,
    pub time: String,
    pub time_unix: i64,
    pub status_code_count: BTreeMap<String, u64>,
    pub total_count: u64,
    pub total_response_time: String,
    pub total_response_time_sec: f64,
    pub average_response_time: String,
    pub average_response_time_sec: f64,
}

impl StatusRecorder {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            counters: Mutex::new(Counters::default()),
        }
    }

    /// Adds one response to the statistics.
    pub fn record(&self, status_code: u16, elapsed: Duration) {
        let mut counters = self.counters.lock();
        *counters
            .status_code_count
            .entry(status_code.to_string())
            .or_insert(0) += 1;
        counters.total_count += 1;
        counters.total_response_time += elapsed;
    }

    /// Returns the current statistics.
    pub fn snapshot(&self) -> Status {
        let (status_code_count, total_count, total_response_time) = {
            let counters = self.counters.lock();
            (
                counters.status_code_count.clone(),
                counters.total_count,
                counters.total_response_time,
            )
        };
        let average_response_time = match u32::try_from(total_count) {
            Ok(0) => Duration::ZERO,
            Ok(count) => total_response_time / count,
            Err(_) => Duration::from_secs_f64(
                total_response_time.as_secs_f64() / total_count as f64,
            ),
        };
        let up_time = self.started.elapsed();
        let now = Utc::now();

        Status {
            pid: std::process::id(),
            up_time: format!("{:?}", up_time),
            up_time_sec: up_time.as_secs_f64(),
            time: now.to_rfc3339(),
            time_unix: now.timestamp(),
            status_code_count,
            total_count,
            total_response_time: format!("{:?}", total_response_time),
            total_response_time_sec: total_response_time.as_secs_f64(),
            average_response_time: format!("{:?}", average_response_time),
            average_response_time_sec: average_response_time.as_secs_f64(),
        }
    }
}

impl Default for StatusRecorder {
    fn default() -> Self {
        Self::new()
    }
}
