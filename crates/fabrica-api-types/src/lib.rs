//! Shared request and response types for the Fabrica marketing/CMS REST API.
//!
//! These types mirror the backend's JSON wire format (camelCase field
//! names, RFC 3339 timestamps). The SDK crate layers caching and
//! transport on top; nothing in here performs I/O.

mod blogs;
mod locales;
mod media;
mod messages;
mod production_lines;
mod projects;

pub use blogs::{Blog, BlogDraft, BlogPatch, PublishState};
pub use locales::{Language, LocaleDraft, LocaleEntry, LocalePatch};
pub use media::{MediaAttachment, MediaKind, RawFile};
pub use messages::{ContactMessage, ProductionLineInquiry};
pub use production_lines::{ProductionLine, ProductionLineDraft, ProductionLinePatch};
pub use projects::{Project, ProjectDraft, ProjectPatch};
