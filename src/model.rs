use serde::{Deserialize, Serialize};

use crate::keys::Key;

/// Highest index that still fits below the reserved exit codes.
pub const MAX_RESPONSES: usize = 125;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    #[default]
    Insensitive,
    Sensitive,
}

impl CaseMode {
    pub fn from_flag(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Sensitive
        } else {
            Self::Insensitive
        }
    }

    pub fn is_sensitive(self) -> bool {
        self == Self::Sensitive
    }
}

/// Ordered candidate answers. Every character is a candidate, commas included;
/// a repeated character can only ever match at its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSet {
    chars: Vec<char>,
}

impl ResponseSet {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Candidates that can be selected, in index order.
    pub fn candidates(&self) -> &[char] {
        &self.chars[..self.chars.len().min(MAX_RESPONSES)]
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl From<&str> for ResponseSet {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub prompt: String,
    pub responses: ResponseSet,
    pub case_mode: CaseMode,
}

impl SessionRequest {
    pub fn new(prompt: impl Into<String>, responses: impl Into<ResponseSet>, case_mode: CaseMode) -> Self {
        Self {
            prompt: prompt.into(),
            responses: responses.into(),
            case_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Resolution {
    /// One-based position of the key in the response set.
    Matched(usize),
    NoMatch,
    NoKeyPressed,
    Cancelled,
}

/// What one exchange produced: the key read, if any, and its resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub key: Option<Key>,
    pub resolution: Resolution,
}

impl Answer {
    pub fn unanswered() -> Self {
        Self {
            key: None,
            resolution: Resolution::NoMatch,
        }
    }
}
