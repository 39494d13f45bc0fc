/*!
 * Monitoring
 * Tracing subscriber setup for the drive binary and tests
 */

mod tracer;

pub use tracer::{init_tracing, json_output_requested, try_init_tracing, ENV_TRACE_JSON};
