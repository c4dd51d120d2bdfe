//! Cache key definitions.
//!
//! A key identifies one cacheable read: resource, operation kind, and
//! filter signature. Keys also drive the in-flight de-duplication
//! registry, so two reads of the same key share one network call.

use fabrica_api_types::Language;
use uuid::Uuid;

/// Scope filter for production-line list reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineScope {
    All,
    Published,
}

/// Identifies one cacheable read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    BlogList,
    BlogDetail(Uuid),
    ProjectList,
    ProjectDetail(Uuid),
    ProductionLineList(LineScope),
    ProductionLineDetail(Uuid),
    /// `None` is the unfiltered list; `Some(lang)` the per-language one.
    LocaleList(Option<Language>),
    LocaleDetail(String),
    /// Flat key→text map for one language.
    TranslationMap(Language),
    Existence {
        resource: &'static str,
        id: String,
    },
}

/// Staleness class a key belongs to; each class has its own window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalenessClass {
    /// List and detail reads (5 minutes by default).
    ListDetail,
    /// Bulk translation-map reads (10 minutes by default).
    Translation,
    /// Existence probes (30 seconds by default).
    Existence,
}

impl CacheKey {
    pub fn staleness_class(&self) -> StalenessClass {
        match self {
            CacheKey::TranslationMap(_) => StalenessClass::Translation,
            CacheKey::Existence { .. } => StalenessClass::Existence,
            _ => StalenessClass::ListDetail,
        }
    }

    /// Resource label used for metrics.
    pub fn resource(&self) -> &'static str {
        match self {
            CacheKey::BlogList | CacheKey::BlogDetail(_) => "blogs",
            CacheKey::ProjectList | CacheKey::ProjectDetail(_) => "projects",
            CacheKey::ProductionLineList(_) | CacheKey::ProductionLineDetail(_) => {
                "production-lines"
            }
            CacheKey::LocaleList(_) | CacheKey::LocaleDetail(_) | CacheKey::TranslationMap(_) => {
                "locales"
            }
            CacheKey::Existence { resource, .. } => resource,
        }
    }
}
