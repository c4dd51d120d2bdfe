//! Fabrica: typed client and caching layer for the Fabrica content API.
//!
//! The crate is layered the way requests flow:
//!
//! - [`client`] speaks HTTP: one thin client per resource plus the
//!   progress-reporting upload channel.
//! - [`cache`] holds the read-through caches, staleness windows and
//!   the generic mutation-patching machinery.
//! - [`store`] ties the two together: every read goes through the
//!   cache with in-flight coalescing, every mutation patches the
//!   caches from the server's response.
//! - [`forms`] validates user input before it ever reaches [`client`].
//!
//! Data shapes live in the `fabrica-api-types` crate so other tools
//! can speak the wire format without pulling in the HTTP stack.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod store;
pub mod telemetry;

pub use cache::{CacheConfig, CacheHit, LineScope, MutationEffect, Presence};
pub use client::{ApiClient, ProgressFn};
pub use config::{ApiMode, ApiSettings, Settings};
pub use error::{ApiError, Operation};
pub use store::SyncStore;

pub use fabrica_api_types as types;
