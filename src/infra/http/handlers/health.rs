//! Probe endpoints for orchestration.

/// Liveness: the process is up and serving.
pub async fn livez() -> &'static str {
    "ok"
}

/// Readiness: shallow by design; the store and cache both degrade
/// gracefully, so a reachable server is a servable one.
pub async fn healthz() -> &'static str {
    "ok"
}
