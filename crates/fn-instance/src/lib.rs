//! Function instance worker entry surface.
//!
//! Re-exports the config resolver and provides a small logging helper so
//! every binary wires up output the same way.

/// Re-export for convenience.
pub use fn_instance_config as config;

#[inline]
/// Initialize logging using env_logger, honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}
