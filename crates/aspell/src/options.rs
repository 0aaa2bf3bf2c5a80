// Construction options for `Speller`.
//
// Usable as a builder or deserialized from a document such as
//
//   { "language": "nl", "options": { "personal": "aspell.nl.pws", "ignore": 2 } }
//
// Option pairs keep their order. Scalar values (strings, booleans, numbers)
// are normalized to the strings the native schema stores.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language, configuration pairs and validation switch for a new speller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SpellerOptions {
    /// Applied as `lang` before `options`, so a `lang` pair overrides it.
    pub language: Option<String>,
    #[serde(with = "ordered_pairs")]
    pub options: Vec<(String, String)>,
    /// Check after every rebuild that `lang` names an installed dictionary.
    pub validate_dictionary: bool,
}

impl Default for SpellerOptions {
    fn default() -> Self {
        Self {
            language: None,
            options: Vec::new(),
            validate_dictionary: true,
        }
    }
}

impl SpellerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options selecting `language` and nothing else.
    pub fn for_language(language: impl Into<String>) -> Self {
        Self::new().language(language)
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Append a configuration pair. Keys take string or [`ConfigKey`] form.
    ///
    /// [`ConfigKey`]: aspell_core::ConfigKey
    pub fn option(mut self, key: impl AsRef<str>, value: impl fmt::Display) -> Self {
        self.options
            .push((key.as_ref().to_string(), value.to_string()));
        self
    }

    pub fn validate_dictionary(mut self, validate: bool) -> Self {
        self.validate_dictionary = validate;
        self
    }
}

/// Serde adapter storing `Vec<(String, String)>` as an order-preserving map.
mod ordered_pairs {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    /// A scalar option value in any of the forms a document may use.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Flag(bool),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
    }

    impl Scalar {
        fn into_string(self) -> String {
            match self {
                Scalar::Text(text) => text,
                Scalar::Flag(flag) => flag.to_string(),
                Scalar::Signed(n) => n.to_string(),
                Scalar::Unsigned(n) => n.to_string(),
                Scalar::Float(n) => n.to_string(),
            }
        }
    }

    pub fn serialize<S: Serializer>(
        pairs: &[(String, String)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, String)>, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of configuration keys to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Scalar>()? {
                    pairs.push((key, value.into_string()));
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use aspell_core::{ConfigKey, SuggestionMode};

    use super::*;

    #[test]
    fn builder_keeps_pair_order() {
        let options = SpellerOptions::for_language("nl")
            .option(ConfigKey::Personal, "aspell.nl.pws")
            .option("sug-mode", SuggestionMode::Fast)
            .option("ignore", 2);
        assert_eq!(options.language.as_deref(), Some("nl"));
        assert_eq!(
            options.options,
            [
                ("personal".to_string(), "aspell.nl.pws".to_string()),
                ("sug-mode".to_string(), "fast".to_string()),
                ("ignore".to_string(), "2".to_string()),
            ]
        );
        assert!(options.validate_dictionary);
    }

    #[test]
    fn deserializes_scalars_in_document_order() {
        let json = r#"{
            "language": "en",
            "options": { "sug-mode": "ultra", "ignore-case": true, "ignore": 3, "lang": "nl" },
            "validate-dictionary": false
        }"#;
        let options: SpellerOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.language.as_deref(), Some("en"));
        let keys: Vec<&str> = options.options.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["sug-mode", "ignore-case", "ignore", "lang"]);
        assert_eq!(options.options[1].1, "true");
        assert_eq!(options.options[2].1, "3");
        assert!(!options.validate_dictionary);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let options: SpellerOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SpellerOptions::default());
    }

    #[test]
    fn serializes_pairs_as_map() {
        let options = SpellerOptions::new().option("personal", "foo");
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["options"]["personal"], "foo");
        assert_eq!(value["validate-dictionary"], true);
    }
}
