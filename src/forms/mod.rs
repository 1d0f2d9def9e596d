//! Server-side validation of dashboard form submissions
//!
//! Forms collect per-field error messages instead of failing fast, so an
//! invalid submission can be sent back to the client together with the
//! values that were entered.

pub mod collection;

pub use collection::{CollectionForm, CollectionFormData, NAME_TAKEN};

use std::collections::BTreeMap;

use serde::Serialize;

pub const REQUIRED: &str = "This field is required.";

/// Width of the `slug` columns
pub const SLUG_MAX_LENGTH: usize = 255;

/// Error messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one field (empty when the field is valid)
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// URL-safe identifier derived from a display name
///
/// Transliteration can make the slug much longer than the name, so it is cut
/// back to `SLUG_MAX_LENGTH` on a word boundary.
pub fn slugify(value: &str) -> String {
    let slug = slug::slugify(value);
    if slug.len() <= SLUG_MAX_LENGTH {
        return slug;
    }

    // slug output is ASCII, byte offsets are char boundaries
    let head = &slug[..SLUG_MAX_LENGTH];
    let cut = if slug.as_bytes()[SLUG_MAX_LENGTH] == b'-' {
        head
    } else {
        head.rsplit_once('-').map_or(head, |(words, _)| words)
    };
    cut.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Test Collection"), "test-collection");
        assert_eq!(slugify("  Summer   Sale 2024! "), "summer-sale-2024");
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_caps_transliterated_names() {
        let slug = slugify(&"北".repeat(128));

        assert!(slug.len() <= SLUG_MAX_LENGTH);
        assert!(!slug.is_empty());
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_cuts_on_word_boundary() {
        let name = format!("{} tail", "a".repeat(SLUG_MAX_LENGTH - 2));
        assert_eq!(slugify(&name), "a".repeat(SLUG_MAX_LENGTH - 2));
    }

    #[test]
    fn test_form_errors_group_by_field() {
        let mut errors = FormErrors::default();
        assert!(errors.is_empty());

        errors.add("name", REQUIRED);
        errors.add("products", "bad");
        errors.add("products", "worse");

        assert_eq!(errors.field("name"), [REQUIRED.to_string()]);
        assert_eq!(errors.field("products").len(), 2);
        assert!(errors.field("slug").is_empty());

        errors.clear();
        assert!(errors.is_empty());
    }
}
