//! Turning free-form model output into a list of suggestions.
//!
//! The model is asked for `{"suggestions": [...]}` but nothing forces it to
//! comply, so extraction never fails: it either finds the structured array or
//! falls back to the first non-blank lines of the text.

use serde_json::Value;

/// Maximum number of lines kept by the line fallback.
pub const MAX_FALLBACK_LINES: usize = 5;

const SUGGESTIONS_KEY: &str = "suggestions";

/// Raw text returned by the generation service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub raw_text: String,
}

impl GenerationResult {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// Taken as-is from a JSON `suggestions` array, whatever its length.
    Structured(Vec<String>),
    /// At most [`MAX_FALLBACK_LINES`] non-blank lines of the raw text.
    LineFallback(Vec<String>),
}

impl Suggestions {
    pub fn extract(raw: &str) -> Self {
        if let Some(items) = structured_suggestions(raw) {
            return Self::Structured(items);
        }

        Self::LineFallback(
            raw.lines()
                .filter(|line| !line.trim().is_empty())
                .take(MAX_FALLBACK_LINES)
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Structured(items) | Self::LineFallback(items) => items,
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Structured(items) | Self::LineFallback(items) => items,
        }
    }
}

fn structured_suggestions(raw: &str) -> Option<Vec<String>> {
    parse_suggestions_array(raw).or_else(|| embedded_json(raw).and_then(parse_suggestions_array))
}

fn parse_suggestions_array(text: &str) -> Option<Vec<String>> {
    let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(text) else {
        return None;
    };
    let Some(Value::Array(items)) = object.remove(SUGGESTIONS_KEY) else {
        return None;
    };

    Some(
        items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
    )
}

/// The JSON object wrapped in a markdown fence, or the outermost `{...}`
/// span when the model surrounded it with prose.
fn embedded_json(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();

    let fenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|body| body.strip_suffix("```"));
    if let Some(body) = fenced {
        return Some(body.trim());
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
}
