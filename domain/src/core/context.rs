//! Shared request context threaded between agent invocations.

use serde_json::{Map, Value};

/// Key/value context passed to every agent invocation of one request.
///
/// Backed by `serde_json::Map`, which keeps keys sorted so that context
/// snapshots serialize identically across runs.
pub type ContextMap = Map<String, Value>;

/// Merge `delta` into `context`, overwriting existing keys.
pub fn merge_context(context: &mut ContextMap, delta: &ContextMap) {
    for (key, value) in delta {
        context.insert(key.clone(), value.clone());
    }
}
