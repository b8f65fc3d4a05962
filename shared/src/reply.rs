//! Parsing boundary for completion API replies
//!
//! Models are asked for bare JSON but often wrap it in markdown fences or
//! add a sentence around it. Everything that turns model free text into a
//! typed value goes through `parse_model_reply`.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// A model reply that could not be read as the expected JSON shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("model reply is not valid JSON for the expected shape: {reason}")]
pub struct MalformedReply {
    /// Decoder error from the last parse attempt
    pub reason: String,
    /// The reply text as received
    pub raw: String,
}

/// Outcome of reading a model reply
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply<T> {
    Parsed(T),
    Malformed(MalformedReply),
}

impl<T> ModelReply<T> {
    pub fn into_result(self) -> Result<T, MalformedReply> {
        match self {
            ModelReply::Parsed(value) => Ok(value),
            ModelReply::Malformed(err) => Err(err),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ModelReply::Parsed(_))
    }
}

/// Remove markdown code-fence markers and surrounding whitespace
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = text.trim().to_string();
    for fence in ["```json", "```JSON", "```"] {
        cleaned = cleaned.replace(fence, "");
    }
    cleaned.trim().to_string()
}

/// Read a model reply as `T`.
///
/// Tries the fence-stripped text first, then the span from the first `{` to
/// the last `}` so a leading or trailing sentence does not sink the reply.
pub fn parse_model_reply<T: DeserializeOwned>(text: &str) -> ModelReply<T> {
    let cleaned = strip_code_fences(text);

    let first_err = match serde_json::from_str::<T>(&cleaned) {
        Ok(value) => return ModelReply::Parsed(value),
        Err(e) => e,
    };

    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end && (start > 0 || end + 1 < cleaned.len()) {
            match serde_json::from_str::<T>(&cleaned[start..=end]) {
                Ok(value) => return ModelReply::Parsed(value),
                Err(e) => {
                    return ModelReply::Malformed(MalformedReply {
                        reason: e.to_string(),
                        raw: text.to_string(),
                    })
                }
            }
        }
    }

    ModelReply::Malformed(MalformedReply {
        reason: first_err.to_string(),
        raw: text.to_string(),
    })
}
