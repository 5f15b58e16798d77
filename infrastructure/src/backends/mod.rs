//! Agent backend adapters
//!
//! - [`OfflineBackend`]: deterministic local answers
//! - `HttpBackend`: remote agent services (`http-backends` feature)

mod offline;

#[cfg(feature = "http-backends")]
mod http;

#[cfg(feature = "http-backends")]
pub use http::HttpBackend;
pub use offline::{OFFLINE_NOTE_SUFFIX, OfflineBackend};

use conductor_application::BackendSet;
use conductor_domain::BackendKind;
use std::collections::BTreeMap;
use std::sync::Arc;
#[cfg(feature = "http-backends")]
use tracing::info;
use tracing::warn;

/// Wire the backends for this process.
///
/// Offline mode serves every kind locally. Otherwise one HTTP backend is
/// created per configured endpoint; kinds without an endpoint stay unwired
/// and their agents fail as unavailable.
pub fn build_backend_set(endpoints: &BTreeMap<BackendKind, String>, offline: bool) -> BackendSet {
    if offline {
        return BackendKind::ALL
            .into_iter()
            .fold(BackendSet::new(), |set, kind| {
                set.with_backend(Arc::new(OfflineBackend::new(kind)))
            });
    }

    let set = endpoints
        .iter()
        .fold(BackendSet::new(), |set, (kind, endpoint)| {
            with_remote_backend(set, *kind, endpoint)
        });

    if set.kinds().is_empty() {
        warn!("No agent backends configured; every agent will fail as unavailable");
    }
    set
}

#[cfg(feature = "http-backends")]
fn with_remote_backend(set: BackendSet, kind: BackendKind, endpoint: &str) -> BackendSet {
    info!("Using {} backend at {}", kind, endpoint);
    set.with_backend(Arc::new(HttpBackend::new(kind, endpoint.to_string())))
}

#[cfg(not(feature = "http-backends"))]
fn with_remote_backend(set: BackendSet, kind: BackendKind, endpoint: &str) -> BackendSet {
    warn!(
        "Ignoring {} endpoint {}: built without http-backends",
        kind, endpoint
    );
    set
}
