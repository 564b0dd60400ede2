/*!
 * Structured Tracing
 * Subscriber setup and operation spans using the tracing crate
 *
 * Core modules log through the `log` facade; the `tracing-log` bridge
 * installed by `init_tracing` forwards those records to the same subscriber.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable enabling JSON output
pub const TRACE_JSON_ENV: &str = "PARTITION_SIM_TRACE_JSON";

static NEXT_OPERATION_ID: AtomicU64 = AtomicU64::new(1);

/// Initialize structured tracing
///
/// Output goes to stderr so it never interleaves with the interactive menu.
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
/// - PARTITION_SIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Span covering one simulator operation (a menu action)
pub struct OperationSpan {
    span: tracing::Span,
    start: Instant,
    operation_id: u64,
}

impl OperationSpan {
    pub fn new(operation: &str) -> Self {
        let operation_id = NEXT_OPERATION_ID.fetch_add(1, Ordering::Relaxed);

        let span = span!(
            Level::DEBUG,
            "operation",
            operation_id = operation_id,
            operation = operation,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        span.in_scope(|| debug!(operation = operation, "operation started"));

        Self {
            span,
            start: Instant::now(),
            operation_id,
        }
    }

    /// Sequence number of this operation within the process
    pub fn operation_id(&self) -> u64 {
        self.operation_id
    }

    /// Record the operation result
    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }

    /// Record an error
    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }

    /// Record the outcome of a fallible operation
    pub fn record_outcome<T, E: std::fmt::Display>(&self, outcome: &Result<T, E>) {
        match outcome {
            Ok(_) => self.record_result(true),
            Err(e) => self.record_error(&e.to_string()),
        }
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        let duration_us = self.start.elapsed().as_micros() as u64;
        self.span.record("duration_us", duration_us);

        let _entered = self.span.enter();
        if duration_us > 100_000 {
            warn!(duration_us = duration_us, slow = true, "slow operation detected");
        } else {
            debug!(duration_us = duration_us, "operation completed");
        }
    }
}

/// Helper to create an operation span
#[inline]
pub fn span_operation(name: &str) -> OperationSpan {
    OperationSpan::new(name)
}
