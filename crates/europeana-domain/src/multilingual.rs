//! Multilingual field extraction
//!
//! Fields such as `prefLabel`, `biographicalInformation` and `note` map a
//! language code to one or more localized strings. The remote service is not
//! consistent about the exact JSON shape, so everything is normalized here,
//! at the parse boundary, into [`MultilingualField`].
//!
//! Accepted shapes:
//!
//! - `{"en": "Leonardo da Vinci", "fr": "Léonard de Vinci"}`
//! - `{"en": ["World War I", "First World War"]}`
//! - `[{"@language": "en", "@value": "Italian painter"}, ...]` (JSON-LD)
//! - `"plain string"` (stored under the language-neutral key `def`)

use crate::error::DomainError;
use serde::Serialize;
use serde_json::Value;

/// Language key used by Europeana for values without a language
pub const NEUTRAL_LANGUAGE: &str = "def";

/// Value(s) stored for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizedValue {
    /// Language maps to a single string
    Single(String),
    /// Language maps to a list of strings
    List(Vec<String>),
}

impl LocalizedValue {
    /// First value, if any
    pub fn first(&self) -> Option<&str> {
        match self {
            LocalizedValue::Single(value) => Some(value.as_str()),
            LocalizedValue::List(values) => values.first().map(String::as_str),
        }
    }

    /// All values in order
    pub fn values(&self) -> Vec<&str> {
        match self {
            LocalizedValue::Single(value) => vec![value.as_str()],
            LocalizedValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            LocalizedValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = LocalizedValue::List(vec![first, value]);
            }
            LocalizedValue::List(values) => values.push(value),
        }
    }
}

/// How many values to emit per language when extracting pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValuePolicy {
    /// One pair per value
    #[default]
    All,
    /// Only the first value of each language
    First,
}

/// A (language, value) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageValue {
    /// Language code (`en`, `fr`, ... or `def`)
    pub language: String,
    /// Localized text
    pub value: String,
}

/// A multilingual field: absent, or a list of languages with their values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MultilingualField {
    /// Field missing (or `null`) in the response
    #[default]
    Absent,
    /// Languages in response order
    Present(Vec<(String, LocalizedValue)>),
}

impl MultilingualField {
    /// Normalize the JSON value of `field`.
    ///
    /// `None` and `null` give [`MultilingualField::Absent`]. Shapes other than
    /// the documented ones fail with [`DomainError::UnexpectedShape`].
    pub fn parse(field: &str, value: Option<&Value>) -> Result<Self, DomainError> {
        let value = match value {
            None | Some(Value::Null) => return Ok(MultilingualField::Absent),
            Some(value) => value,
        };

        let shape_error = || DomainError::UnexpectedShape {
            field: field.to_string(),
            expected: "a language map or a list of language-tagged values",
        };

        let mut entries: Vec<(String, LocalizedValue)> = Vec::new();
        match value {
            Value::Object(map) => {
                for (language, localized) in map {
                    let localized = match localized {
                        Value::Null => continue,
                        Value::Array(items) => {
                            LocalizedValue::List(items.iter().filter_map(scalar_text).collect())
                        }
                        other => {
                            LocalizedValue::Single(scalar_text(other).ok_or_else(shape_error)?)
                        }
                    };
                    entries.push((language.clone(), localized));
                }
            }
            Value::Array(items) => {
                for item in items {
                    let (language, text) = match item {
                        Value::Object(tagged) => {
                            let text = match tagged.get("@value").and_then(scalar_text) {
                                Some(text) => text,
                                None => continue,
                            };
                            let language = tagged
                                .get("@language")
                                .and_then(Value::as_str)
                                .unwrap_or(NEUTRAL_LANGUAGE);
                            (language.to_string(), text)
                        }
                        other => match scalar_text(other) {
                            Some(text) => (NEUTRAL_LANGUAGE.to_string(), text),
                            None => continue,
                        },
                    };
                    match entries.iter_mut().find(|(existing, _)| *existing == language) {
                        Some((_, localized)) => localized.push(text),
                        None => entries.push((language, LocalizedValue::Single(text))),
                    }
                }
            }
            Value::String(text) => {
                entries.push((NEUTRAL_LANGUAGE.to_string(), LocalizedValue::Single(text.clone())));
            }
            _ => return Err(shape_error()),
        }

        Ok(MultilingualField::Present(entries))
    }

    /// True if the field was missing from the response
    pub fn is_absent(&self) -> bool {
        matches!(self, MultilingualField::Absent)
    }

    /// Number of languages
    pub fn len(&self) -> usize {
        match self {
            MultilingualField::Absent => 0,
            MultilingualField::Present(entries) => entries.len(),
        }
    }

    /// True if absent or present without any language
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Language codes in response order
    pub fn languages(&self) -> Vec<&str> {
        self.entries().iter().map(|(language, _)| language.as_str()).collect()
    }

    /// Value(s) stored for `language`
    pub fn get(&self, language: &str) -> Option<&LocalizedValue> {
        self.entries()
            .iter()
            .find(|(candidate, _)| candidate == language)
            .map(|(_, localized)| localized)
    }

    /// First value stored for `language`
    pub fn value_in(&self, language: &str) -> Option<&str> {
        self.get(language).and_then(LocalizedValue::first)
    }

    /// Flatten into (language, value) pairs
    pub fn pairs(&self, policy: ValuePolicy) -> Vec<LanguageValue> {
        let mut pairs = Vec::new();
        for (language, localized) in self.entries() {
            let values = match policy {
                ValuePolicy::All => localized.values(),
                ValuePolicy::First => localized.first().into_iter().collect(),
            };
            pairs.extend(values.into_iter().map(|value| LanguageValue {
                language: language.clone(),
                value: value.to_string(),
            }));
        }
        pairs
    }

    fn entries(&self) -> &[(String, LocalizedValue)] {
        match self {
            MultilingualField::Absent => &[],
            MultilingualField::Present(entries) => entries,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_value_map() {
        let value = json!({"en": "hello", "fr": "bonjour"});
        let field = MultilingualField::parse("prefLabel", Some(&value)).unwrap();

        let mut pairs = field.pairs(ValuePolicy::All);
        pairs.sort_by(|a, b| a.language.cmp(&b.language));
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], LanguageValue { language: "en".into(), value: "hello".into() });
        assert_eq!(pairs[1], LanguageValue { language: "fr".into(), value: "bonjour".into() });
    }

    #[test]
    fn test_absent_field() {
        let field = MultilingualField::parse("prefLabel", None).unwrap();
        assert!(field.is_absent());
        assert!(field.pairs(ValuePolicy::All).is_empty());

        let null = MultilingualField::parse("prefLabel", Some(&Value::Null)).unwrap();
        assert!(null.is_absent());
    }

    #[test]
    fn test_list_values_and_policies() {
        let value = json!({"en": ["World War I", "First World War"], "de": ["Erster Weltkrieg"]});
        let field = MultilingualField::parse("note", Some(&value)).unwrap();

        assert_eq!(field.pairs(ValuePolicy::All).len(), 3);

        let first = field.pairs(ValuePolicy::First);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].value, "World War I");
        assert_eq!(field.value_in("de"), Some("Erster Weltkrieg"));
        assert_eq!(field.value_in("it"), None);
    }

    #[test]
    fn test_json_ld_list_is_grouped_by_language() {
        let value = json!([
            {"@language": "en", "@value": "Italian painter"},
            {"@language": "fr", "@value": "peintre italien"},
            {"@language": "en", "@value": "Italian engineer"}
        ]);
        let field = MultilingualField::parse("biographicalInformation", Some(&value)).unwrap();

        assert_eq!(field.languages(), vec!["en", "fr"]);
        assert_eq!(
            field.get("en"),
            Some(&LocalizedValue::List(vec![
                "Italian painter".to_string(),
                "Italian engineer".to_string()
            ]))
        );
        assert_eq!(field.value_in("fr"), Some("peintre italien"));
    }

    #[test]
    fn test_plain_string_is_language_neutral() {
        let value = json!("Paris");
        let field = MultilingualField::parse("prefLabel", Some(&value)).unwrap();
        assert_eq!(field.value_in(NEUTRAL_LANGUAGE), Some("Paris"));
    }

    #[test]
    fn test_unexpected_shape() {
        let value = json!(42);
        let err = MultilingualField::parse("prefLabel", Some(&value)).unwrap_err();
        assert!(matches!(err, DomainError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_null_languages_skipped() {
        let value = json!({"en": "Paris", "fr": null});
        let field = MultilingualField::parse("prefLabel", Some(&value)).unwrap();
        assert_eq!(field.len(), 1);
    }
}
