use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One translation key with its per-language texts.
///
/// Identity is the key string itself. "Completeness" (text present in
/// every language) is derived for display and never enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl LocaleEntry {
    pub fn text(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.en.as_deref(),
            Language::Ar => self.ar.as_deref(),
        }
    }

    /// Whether this entry carries non-empty text for `language`.
    pub fn has_text(&self, language: Language) -> bool {
        self.text(language).is_some_and(|text| !text.is_empty())
    }

    pub fn is_complete(&self) -> bool {
        Language::ALL.iter().all(|&lang| self.has_text(lang))
    }
}

/// Request body for `POST /locales` (and each element of
/// `POST /locales/bulk`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleDraft {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

/// Partial-update body for `PATCH /locales/:key`.
///
/// The outer `Option` distinguishes "leave untouched" (omitted) from
/// the inner one's "clear this language" (explicit `null`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ar: Option<Option<String>>,
}

impl LocalePatch {
    pub fn set(language: Language, text: impl Into<String>) -> Self {
        let mut patch = Self::default();
        patch.assign(language, Some(text.into()));
        patch
    }

    pub fn clear(language: Language) -> Self {
        let mut patch = Self::default();
        patch.assign(language, None);
        patch
    }

    pub fn assign(&mut self, language: Language, text: Option<String>) {
        match language {
            Language::En => self.en = Some(text),
            Language::Ar => self.ar = Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry(en: Option<&str>, ar: Option<&str>) -> LocaleEntry {
        LocaleEntry {
            key: "home.title".into(),
            en: en.map(str::to_string),
            ar: ar.map(str::to_string),
            updated_at: datetime!(2026-01-01 00:00 UTC),
        }
    }

    #[test]
    fn completeness_requires_both_languages() {
        assert!(entry(Some("Hello"), Some("مرحبا")).is_complete());
        assert!(!entry(Some("Hello"), None).is_complete());
        assert!(!entry(Some("Hello"), Some("")).is_complete());
    }

    #[test]
    fn clear_patch_serializes_explicit_null() {
        let value = serde_json::to_value(LocalePatch::clear(Language::Ar)).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object["ar"].is_null());
    }

    #[test]
    fn set_patch_omits_other_language() {
        let value = serde_json::to_value(LocalePatch::set(Language::En, "Hi")).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["en"], "Hi");
    }
}
