//! Client-side cache primitives.
//!
//! The stores in [`crate::store`] compose these into read-through
//! resource access:
//!
//! - structured keys with per-class staleness windows,
//! - timestamped entries that keep stale values on failed fetches,
//! - a single generic mutation-effect routine applied uniformly to
//!   every cached view,
//! - per-key async gates that collapse concurrent fetches of one key
//!   into a single network call.
//!
//! Nothing here is a process-wide singleton: each [`crate::SyncStore`]
//! owns its own caches, so tests construct isolated instances.

mod config;
mod inflight;
mod keys;
mod patch;
mod store;

pub use config::CacheConfig;
pub use keys::{CacheKey, LineScope, StalenessClass};
pub use patch::{Identified, MutationEffect};
pub use store::{CacheHit, Presence, ResourceCache, TranslationCache};

pub(crate) use inflight::InflightRegistry;
