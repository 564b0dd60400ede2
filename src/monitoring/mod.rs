/*!
 * Monitoring
 * Structured tracing for simulator operations
 */

mod tracer;

pub use tracer::{init_tracing, span_operation, OperationSpan, TRACE_JSON_ENV};
