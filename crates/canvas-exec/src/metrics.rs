//! Metrics/tracing hooks.
//!
//! Events go to `tracing` when the feature is on; the binary decides where
//! they end up (stderr by default, never the progress line on stdout).

#[cfg(feature = "tracing")]
pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::debug_span!("canvas", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::debug!(%k, %v, "metric");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_span(_event: &str, _key_values: &[(&str, String)]) {}
