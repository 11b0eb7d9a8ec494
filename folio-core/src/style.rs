//! Style keys, semantic classes and style rules
//!
//! A [`StyleKey`] is the stable identifier of a named style. It doubles as the CSS
//! class written on styled spans, so it is restricted to `[a-z][a-z0-9-]*`.
//!
//! The six [`SemanticClass`]es are the class names the exported documents promise
//! to carry. Their built-in rules seed every [`crate::registry::StyleRegistry`].

use crate::error::BookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validated style identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StyleKey(String);

impl StyleKey {
    /// Validate `key` against `[a-z][a-z0-9-]*`.
    pub fn parse(key: &str) -> Result<Self, BookError> {
        if is_valid_key(key) {
            Ok(StyleKey(key.to_string()))
        } else {
            Err(BookError::StyleKeyInvalid(key.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The built-in class this key names, if any.
    pub fn semantic_class(&self) -> Option<SemanticClass> {
        SemanticClass::from_key(&self.0)
    }

    /// Human label derived from the key: `pull-quote` → `Pull Quote`.
    pub fn default_label(&self) -> String {
        self.0
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub(crate) fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        }
        _ => false,
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StyleKey {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKey::parse(s)
    }
}

impl TryFrom<String> for StyleKey {
    type Error = BookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_key(&value) {
            Ok(StyleKey(value))
        } else {
            Err(BookError::StyleKeyInvalid(value))
        }
    }
}

impl From<StyleKey> for String {
    fn from(key: StyleKey) -> Self {
        key.0
    }
}

impl From<SemanticClass> for StyleKey {
    fn from(class: SemanticClass) -> Self {
        StyleKey(class.as_str().to_string())
    }
}

impl AsRef<str> for StyleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed set of classes exported documents are styled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticClass {
    ChapterTitle,
    SectionTitle,
    Paragraph,
    HighlightBox,
    CodeBlock,
    Quote,
}

impl SemanticClass {
    /// Enumeration order used wherever defaults are listed.
    pub const ALL: [SemanticClass; 6] = [
        SemanticClass::ChapterTitle,
        SemanticClass::SectionTitle,
        SemanticClass::Paragraph,
        SemanticClass::HighlightBox,
        SemanticClass::CodeBlock,
        SemanticClass::Quote,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SemanticClass::ChapterTitle => "chapter-title",
            SemanticClass::SectionTitle => "section-title",
            SemanticClass::Paragraph => "paragraph",
            SemanticClass::HighlightBox => "highlight-box",
            SemanticClass::CodeBlock => "code-block",
            SemanticClass::Quote => "quote",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        SemanticClass::ALL
            .into_iter()
            .find(|class| class.as_str() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            SemanticClass::ChapterTitle => "Chapter Title",
            SemanticClass::SectionTitle => "Section Title",
            SemanticClass::Paragraph => "Paragraph",
            SemanticClass::HighlightBox => "Highlight Box",
            SemanticClass::CodeBlock => "Code Block",
            SemanticClass::Quote => "Quote Block",
        }
    }

    /// Element used when a block of this class is inserted from the toolbar.
    pub fn tag(self) -> &'static str {
        match self {
            SemanticClass::ChapterTitle => "h1",
            SemanticClass::SectionTitle => "h2",
            SemanticClass::Paragraph => "p",
            SemanticClass::HighlightBox => "div",
            SemanticClass::CodeBlock => "pre",
            SemanticClass::Quote => "blockquote",
        }
    }

    /// Box-like classes that must not be split across printed pages.
    pub fn is_box(self) -> bool {
        matches!(
            self,
            SemanticClass::HighlightBox | SemanticClass::CodeBlock | SemanticClass::Quote
        )
    }

    pub fn sample_text(self) -> &'static str {
        match self {
            SemanticClass::ChapterTitle => "Chapter 1: Your Chapter Title",
            SemanticClass::SectionTitle => "Your Section Title",
            SemanticClass::Paragraph => {
                "Your paragraph text goes here. You can edit this text and it will maintain the styling."
            }
            SemanticClass::HighlightBox => {
                "This is an important highlight that stands out from regular text."
            }
            SemanticClass::CodeBlock => {
                "function example() {\n  console.log(\"Your code here\");\n  return true;\n}"
            }
            SemanticClass::Quote => "Your inspirational quote goes here.",
        }
    }

    /// Snippet inserted into a chapter by the style toolbar.
    pub fn insertion_markup(self) -> String {
        format!(
            "<{tag} class=\"{class}\">{text}</{tag}>",
            tag = self.tag(),
            class = self.as_str(),
            text = crate::fragment::escape_text(self.sample_text()),
        )
    }

    fn declarations(self) -> &'static str {
        match self {
            SemanticClass::ChapterTitle => concat!(
                "font-size: 2.5rem;\n",
                "font-weight: 700;\n",
                "color: #2c3e50;\n",
                "text-align: center;\n",
                "margin: 2rem 0;\n",
                "padding: 1rem;\n",
                "border-bottom: 3px solid #3498db;\n",
                "background: linear-gradient(135deg, #f8f9fa, #e9ecef);"
            ),
            SemanticClass::SectionTitle => concat!(
                "font-size: 1.8rem;\n",
                "font-weight: 600;\n",
                "color: #34495e;\n",
                "margin: 1.5rem 0 1rem 0;\n",
                "padding-left: 1rem;\n",
                "border-left: 4px solid #e74c3c;"
            ),
            SemanticClass::Paragraph => concat!(
                "font-size: 1rem;\n",
                "line-height: 1.7;\n",
                "color: #2c3e50;\n",
                "margin-bottom: 1.2rem;\n",
                "text-align: justify;\n",
                "font-family: Georgia, serif;"
            ),
            SemanticClass::HighlightBox => concat!(
                "background: linear-gradient(135deg, #fff3cd, #ffeaa7);\n",
                "border-left: 5px solid #f39c12;\n",
                "padding: 1.5rem;\n",
                "margin: 2rem 0;\n",
                "border-radius: 8px;\n",
                "box-shadow: 0 4px 12px rgba(0,0,0,0.1);"
            ),
            SemanticClass::CodeBlock => concat!(
                "background: #2c3e50;\n",
                "color: #ecf0f1;\n",
                "padding: 1.5rem;\n",
                "border-radius: 8px;\n",
                "font-family: 'Courier New', monospace;\n",
                "font-size: 0.9rem;\n",
                "margin: 1.5rem 0;\n",
                "overflow-x: auto;\n",
                "border: 1px solid #34495e;"
            ),
            SemanticClass::Quote => concat!(
                "font-style: italic;\n",
                "font-size: 1.1rem;\n",
                "color: #555;\n",
                "border-left: 4px solid #ddd;\n",
                "margin: 2rem 0;\n",
                "background: #fafafa;\n",
                "padding: 1.5rem 1.5rem 1.5rem 3rem;\n",
                "border-radius: 0 8px 8px 0;"
            ),
        }
    }

    fn preview_markup(self) -> &'static str {
        match self {
            SemanticClass::ChapterTitle => {
                "<h1 class=\"chapter-title\">Chapter 1: The Beginning</h1>"
            }
            SemanticClass::SectionTitle => "<h2 class=\"section-title\">Section Title</h2>",
            SemanticClass::Paragraph => {
                "<p class=\"paragraph\">This is a sample paragraph with some text to show how the styling looks in your book. It demonstrates the typography choices you have made.</p>"
            }
            SemanticClass::HighlightBox => {
                "<div class=\"highlight-box\"><p>This is an important highlight that stands out from the regular text.</p></div>"
            }
            SemanticClass::CodeBlock => {
                "<pre class=\"code-block\">function example() {\n  console.log(\"Hello World\");\n  return true;\n}</pre>"
            }
            SemanticClass::Quote => {
                "<blockquote class=\"quote\">\"The only way to do great work is to love what you do.\"</blockquote>"
            }
        }
    }

    /// The built-in rule for this class.
    pub fn default_rule(self) -> StyleRule {
        StyleRule {
            key: self.into(),
            label: self.label().to_string(),
            declarations: self.declarations().to_string(),
            preview_markup: self.preview_markup().to_string(),
        }
    }
}

impl fmt::Display for SemanticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named style: CSS declarations plus what the style manager shows for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub key: StyleKey,
    pub label: String,
    /// CSS `property: value;` pairs, one per line
    pub declarations: String,
    pub preview_markup: String,
}

impl StyleRule {
    /// A fresh rule for a key with no built-in default.
    pub fn custom(key: StyleKey, declarations: impl Into<String>) -> Self {
        let label = key.default_label();
        let preview_markup = format!(
            "<span class=\"{key}\">{}</span>",
            crate::fragment::escape_text(&label)
        );
        StyleRule {
            key,
            label,
            declarations: declarations.into(),
            preview_markup,
        }
    }

    /// The rule as a CSS block, each declaration line indented by two spaces.
    pub fn css_rule(&self) -> String {
        let body = self
            .declarations
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n  ");
        format!(".{} {{\n  {}\n}}", self.key, body)
    }
}
