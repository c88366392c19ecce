//! Thread-safe dispatch metrics
//!
//! Atomic counters for request outcomes plus bounded timing samples for the
//! routing and agent phases of each cycle.

use crate::protocol::StatusCode;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Maximum timing samples kept per phase
const MAX_TIMING_SAMPLES: usize = 1000;

/// Global metrics collector instance
pub static METRICS: Lazy<DispatchMetrics> = Lazy::new(DispatchMetrics::new);

/// Get reference to global metrics collector
pub fn metrics() -> &'static DispatchMetrics {
    &METRICS
}

/// Metrics collector for request-response cycles
pub struct DispatchMetrics {
    requests_received: AtomicU64,
    requests_answered: AtomicU64,
    no_available_agent: AtomicU64,
    no_response_from_agent: AtomicU64,
    agent_invocations: AtomicU64,
    started_at: AtomicU64,

    route_times: Mutex<Vec<u64>>, // microseconds
    agent_times: Mutex<Vec<u64>>, // microseconds
    answers_by_agent: Mutex<HashMap<String, u64>>,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self {
            requests_received: AtomicU64::new(0),
            requests_answered: AtomicU64::new(0),
            no_available_agent: AtomicU64::new(0),
            no_response_from_agent: AtomicU64::new(0),
            agent_invocations: AtomicU64::new(0),
            started_at: AtomicU64::new(current_timestamp()),
            route_times: Mutex::new(Vec::new()),
            agent_times: Mutex::new(Vec::new()),
            answers_by_agent: Mutex::new(HashMap::new()),
        }
    }

    pub fn request_received(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn agent_invoked(&self) {
        self.agent_invocations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the terminal outcome of a cycle
    ///
    /// `agent` is the agent that answered, if any.
    pub fn request_completed(&self, outcome: StatusCode, agent: Option<&str>) {
        match outcome {
            StatusCode::NoAvailableAgent => {
                self.no_available_agent.fetch_add(1, Ordering::Relaxed);
            }
            StatusCode::NoResponseFromAgent => {
                self.no_response_from_agent.fetch_add(1, Ordering::Relaxed);
            }
            _ => {
                self.requests_answered.fetch_add(1, Ordering::Relaxed);
                if let (Some(name), Ok(mut answers)) = (agent, self.answers_by_agent.lock()) {
                    *answers.entry(name.to_string()).or_insert(0) += 1;
                }
            }
        }
    }

    pub fn record_route_time(&self, duration: Duration) {
        Self::push_sample(&self.route_times, duration);
    }

    pub fn record_agent_time(&self, duration: Duration) {
        Self::push_sample(&self.agent_times, duration);
    }

    fn push_sample(samples: &Mutex<Vec<u64>>, duration: Duration) {
        if let Ok(mut times) = samples.lock() {
            times.push(duration_micros(duration));
            if times.len() > MAX_TIMING_SAMPLES {
                times.remove(0);
            }
        }
    }

    /// Average, p50, p95 and p99 of a sample set (pure function)
    fn timing_statistics(samples: &Mutex<Vec<u64>>) -> TimingStats {
        let mut sorted = match samples.lock() {
            Ok(times) => times.clone(),
            Err(_) => return TimingStats::default(),
        };
        if sorted.is_empty() {
            return TimingStats::default();
        }
        sorted.sort_unstable();

        TimingStats {
            samples: sorted.len(),
            avg_micros: sorted.iter().sum::<u64>() as f64 / sorted.len() as f64,
            p50_micros: percentile(&sorted, 50.0),
            p95_micros: percentile(&sorted, 95.0),
            p99_micros: percentile(&sorted, 99.0),
        }
    }

    // Reset all metrics (useful for testing)
    pub fn reset(&self) {
        self.requests_received.store(0, Ordering::Relaxed);
        self.requests_answered.store(0, Ordering::Relaxed);
        self.no_available_agent.store(0, Ordering::Relaxed);
        self.no_response_from_agent.store(0, Ordering::Relaxed);
        self.agent_invocations.store(0, Ordering::Relaxed);
        self.started_at.store(current_timestamp(), Ordering::Relaxed);
        if let Ok(mut times) = self.route_times.lock() {
            times.clear();
        }
        if let Ok(mut times) = self.agent_times.lock() {
            times.clear();
        }
        if let Ok(mut answers) = self.answers_by_agent.lock() {
            answers.clear();
        }
    }

    /// Get complete metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let now = current_timestamp();
        MetricsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            requests_answered: self.requests_answered.load(Ordering::Relaxed),
            no_available_agent: self.no_available_agent.load(Ordering::Relaxed),
            no_response_from_agent: self.no_response_from_agent.load(Ordering::Relaxed),
            agent_invocations: self.agent_invocations.load(Ordering::Relaxed),
            answers_by_agent: self
                .answers_by_agent
                .lock()
                .map(|answers| answers.clone())
                .unwrap_or_default(),
            route_time: Self::timing_statistics(&self.route_times),
            agent_time: Self::timing_statistics(&self.agent_times),
            uptime_seconds: now.saturating_sub(self.started_at.load(Ordering::Relaxed)),
            timestamp: now,
        }
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TimingStats {
    pub samples: usize,
    pub avg_micros: f64,
    pub p50_micros: f64,
    pub p95_micros: f64,
    pub p99_micros: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_received: u64,
    pub requests_answered: u64,
    pub no_available_agent: u64,
    pub no_response_from_agent: u64,
    pub agent_invocations: u64,
    pub answers_by_agent: HashMap<String, u64>,
    pub route_time: TimingStats,
    pub agent_time: TimingStats,
    pub uptime_seconds: u64,
    pub timestamp: u64,
}

/// Whole microseconds in `duration`, saturating at `u64::MAX`
pub fn duration_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn percentile(sorted_data: &[u64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = sorted_data[index.floor() as usize] as f64;
    let upper = sorted_data[index.ceil() as usize] as f64;
    lower + (upper - lower) * index.fract()
}
