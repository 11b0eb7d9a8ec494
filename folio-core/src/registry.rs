//! Style registry: built-in defaults layered under author overrides
//!
//! The registry only stores overrides. Lookups fall through to the built-in rule for
//! the six semantic classes, so the default key set can never shrink. Removing an
//! override (see [`StyleRegistry::reset`]) makes the built-in rule visible again, or
//! drops an override-only key entirely.

use crate::error::BookError;
use crate::style::{SemanticClass, StyleKey, StyleRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registry of named styles
///
/// # Examples
///
/// ```ignore
/// let mut registry = StyleRegistry::new();
/// registry.set("quote", "font-style: normal;")?;
///
/// let rule = registry.get("quote").unwrap();
/// assert_eq!(rule.label, "Quote Block");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredStyles", into = "StoredStyles")]
pub struct StyleRegistry {
    overrides: BTreeMap<StyleKey, StyleRule>,
}

impl StyleRegistry {
    /// Create a registry with no overrides
    pub fn new() -> Self {
        StyleRegistry {
            overrides: BTreeMap::new(),
        }
    }

    /// Register a full rule, replacing any override with the same key
    pub fn register(&mut self, rule: StyleRule) {
        self.overrides.insert(rule.key.clone(), rule);
    }

    /// Replace the declarations for `key`
    ///
    /// Label and preview are kept from the current effective rule; a key with no
    /// rule yet gets a label derived from the key.
    pub fn set(&mut self, key: &str, declarations: &str) -> Result<(), BookError> {
        let key = StyleKey::parse(key)?;
        let rule = match self.get(key.as_str()) {
            Some(current) => StyleRule {
                declarations: declarations.to_string(),
                ..current
            },
            None => StyleRule::custom(key, declarations),
        };
        log::debug!("style '{}' overridden", rule.key);
        self.register(rule);
        Ok(())
    }

    /// Remove the override for `key`
    ///
    /// Returns whether an override existed. A malformed key is reported rather
    /// than silently ignored.
    pub fn reset(&mut self, key: &str) -> Result<bool, BookError> {
        let key = StyleKey::parse(key)?;
        Ok(self.overrides.remove(&key).is_some())
    }

    /// Effective rule for `key`: the override if present, else the built-in default
    pub fn get(&self, key: &str) -> Option<StyleRule> {
        let key = StyleKey::parse(key).ok()?;
        self.overrides
            .get(&key)
            .cloned()
            .or_else(|| key.semantic_class().map(SemanticClass::default_rule))
    }

    /// Check if a key resolves to a rule
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Check if the author has overridden `key`
    pub fn is_overridden(&self, key: &str) -> bool {
        StyleKey::parse(key)
            .map(|key| self.overrides.contains_key(&key))
            .unwrap_or(false)
    }

    /// All effective rules: built-in keys in their fixed order, then override-only
    /// keys in key order
    pub fn effective_rules(&self) -> Vec<StyleRule> {
        let mut rules: Vec<StyleRule> = SemanticClass::ALL
            .into_iter()
            .map(|class| {
                self.overrides
                    .get(&StyleKey::from(class))
                    .cloned()
                    .unwrap_or_else(|| class.default_rule())
            })
            .collect();

        rules.extend(
            self.overrides
                .values()
                .filter(|rule| rule.key.semantic_class().is_none())
                .cloned(),
        );
        rules
    }

    /// List all effective keys in enumeration order
    pub fn list_keys(&self) -> Vec<String> {
        self.effective_rules()
            .into_iter()
            .map(|rule| rule.key.into())
            .collect()
    }

    /// The effective rules as one stylesheet, blocks separated by blank lines
    pub fn export_css(&self) -> String {
        self.effective_rules()
            .iter()
            .map(StyleRule::css_rule)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// A small self-contained page showing `key`'s preview markup under its rule
    pub fn preview_document(&self, key: &str) -> Option<String> {
        let rule = self.get(key)?;
        Some(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  <title>{label}</title>\n  <style>\n{css}\n  </style>\n</head>\n<body>\n{preview}\n</body>\n</html>",
            label = crate::fragment::escape_text(&rule.label),
            css = rule.css_rule(),
            preview = rule.preview_markup,
        ))
    }
}

/// JSON image of the registry: overrides keyed by style key
///
/// Also accepts the older `name`/`css`/`preview` field names.
type StoredStyles = BTreeMap<StyleKey, StoredRule>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRule {
    #[serde(default, alias = "name")]
    label: Option<String>,
    #[serde(default, alias = "css")]
    declarations: String,
    #[serde(default, alias = "preview")]
    preview_markup: Option<String>,
}

impl From<StoredStyles> for StyleRegistry {
    fn from(stored: StoredStyles) -> Self {
        let overrides = stored
            .into_iter()
            .map(|(key, stored)| {
                let base = key
                    .semantic_class()
                    .map(SemanticClass::default_rule)
                    .unwrap_or_else(|| StyleRule::custom(key.clone(), ""));
                let rule = StyleRule {
                    key: key.clone(),
                    label: stored.label.unwrap_or(base.label),
                    declarations: stored.declarations,
                    preview_markup: stored.preview_markup.unwrap_or(base.preview_markup),
                };
                (key, rule)
            })
            .collect();
        StyleRegistry { overrides }
    }
}

impl From<StyleRegistry> for StoredStyles {
    fn from(registry: StyleRegistry) -> Self {
        registry
            .overrides
            .into_iter()
            .map(|(key, rule)| {
                let stored = StoredRule {
                    label: Some(rule.label),
                    declarations: rule.declarations,
                    preview_markup: Some(rule.preview_markup),
                };
                (key, stored)
            })
            .collect()
    }
}
