//! Request and response types for the probe endpoints.

use serde::{Deserialize, Serialize};

/// Content type of streaming responses.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Query parameters for GET /probe-latency and GET /probe-route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeQuery {
    /// Host to probe. Missing is treated like empty, and rejected.
    pub target: Option<String>,
    /// `true` selects NDJSON streaming; anything else buffers.
    pub streaming: Option<String>,
}

impl ProbeQuery {
    /// Build from raw query pairs. The first occurrence of a key wins and
    /// unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "target" => &mut query.target,
                "streaming" => &mut query.streaming,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// The target, or an empty string when absent.
    #[must_use]
    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or_default()
    }

    /// Whether the caller asked for a streamed response.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.streaming.as_deref() == Some("true")
    }
}

/// Error body for non-streaming failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Create an error response.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
