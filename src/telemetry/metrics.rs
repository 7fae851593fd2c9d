//! Metric instrument factories for logdoctor.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! All instruments are created lazily from the `"logdoctor"` meter.

use opentelemetry::metrics::{Counter, Meter};

/// Returns the shared meter for logdoctor instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("logdoctor")
}

/// Counter: HTTP requests handled.
/// Labels: `route`, `outcome` ("ok" | "unauthorized" | "error").
pub fn requests_handled() -> Counter<u64> {
    meter()
        .u64_counter("logdoctor.requests.handled")
        .with_description("Number of HTTP requests handled")
        .build()
}

/// Counter: upstream Render log fetches.
/// Labels: `result` ("ok" | "error").
pub fn upstream_fetches() -> Counter<u64> {
    meter()
        .u64_counter("logdoctor.upstream.fetches")
        .with_description("Number of Render API log fetches")
        .build()
}

/// Counter: diagnostics emitted by the heuristic rule table.
/// Labels: `matched` ("rule" | "fallback").
pub fn diagnostics_emitted() -> Counter<u64> {
    meter()
        .u64_counter("logdoctor.diagnostics.emitted")
        .with_description("Number of diagnostics produced")
        .build()
}
