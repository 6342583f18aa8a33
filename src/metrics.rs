//! Prometheus metrics for mclink.
//!
//! - `mclink_commands_total{command,outcome}` - Dispatched commands by outcome.
//!   Names that match no registered command share the [`UNKNOWN_COMMAND`] label.
//! - `mclink_command_duration_seconds{command}` - Handler latency histogram
//! - `mclink_rcon_requests_total{result}` - RCON requests by result
//! - `mclink_rcon_connected` - 1 while the RCON session is open
//!
//! Recording before [`init`] is a no-op, so library code and tests can run
//! without a registry.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// `command` label for input that named no registered command.
pub const UNKNOWN_COMMAND: &str = "<unknown>";

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Commands dispatched, labeled by outcome.
pub static COMMANDS: OnceLock<IntCounterVec> = OnceLock::new();

/// Handler latency per command.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// RCON requests, labeled by result.
pub static RCON_REQUESTS: OnceLock<IntCounterVec> = OnceLock::new();

/// RCON session state.
pub static RCON_CONNECTED: OnceLock<IntGauge> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at startup. Later calls leave the existing metrics in place.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                }
            }
        };
    }

    register!(COMMANDS, IntCounterVec::new(
        Opts::new("mclink_commands_total", "Chat commands dispatched by outcome"),
        &["command", "outcome"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("mclink_command_duration_seconds", "Command handler latency")
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["command"]));
    register!(RCON_REQUESTS, IntCounterVec::new(
        Opts::new("mclink_rcon_requests_total", "RCON requests by result"),
        &["result"]));
    register!(RCON_CONNECTED, IntGauge::new("mclink_rcon_connected", "Whether the RCON session is open"));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record handler latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record how a dispatched command ended.
#[inline]
pub fn record_command_outcome(command: &str, outcome: &str) {
    if let Some(c) = COMMANDS.get() {
        c.with_label_values(&[command, outcome]).inc();
    }
}

/// Record an RCON request result.
#[inline]
pub fn record_rcon_request(result: &str) {
    if let Some(c) = RCON_REQUESTS.get() {
        c.with_label_values(&[result]).inc();
    }
}

#[inline]
pub fn set_rcon_connected(connected: bool) {
    if let Some(g) = RCON_CONNECTED.get() {
        g.set(i64::from(connected));
    }
}
