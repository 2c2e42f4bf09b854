use thiserror::Error;

/// User-facing failures of a menu analysis. The `Display` text is shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Please upload a menu image first!")]
    MissingImage,

    #[error("Failed to read the menu image. Please try another file.")]
    Encoding { reason: String },

    #[error("Invalid API key. Please check your configuration.")]
    Auth,

    #[error("Rate limit reached. Please wait 60 seconds and try again.")]
    RateLimitExceeded,

    #[error("Failed to parse AI response. Please try again.")]
    Parse { reason: String },

    #[error("Analysis failed: {0}")]
    Unknown(String),
}

impl AnalysisError {
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::MissingImage => "MISSING_IMAGE",
            AnalysisError::Encoding { .. } => "ENCODING_ERROR",
            AnalysisError::Auth => "AUTH_ERROR",
            AnalysisError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AnalysisError::Parse { .. } => "PARSE_ERROR",
            AnalysisError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

/// What went wrong talking to the model, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMFailureKind {
    /// Credential missing, invalid or lacking permission.
    Unauthenticated,
    /// Throttled or out of quota.
    ResourceExhausted,
    InvalidRequest,
    Unavailable,
    /// The request never produced an HTTP response.
    Transport,
    /// A response arrived but carried no text.
    EmptyResponse,
    MalformedResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LLMError {
    pub kind: LLMFailureKind,
    pub status: Option<u16>,
    pub message: String,
}

impl LLMError {
    pub fn new(kind: LLMFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl From<LLMError> for AnalysisError {
    fn from(err: LLMError) -> Self {
        match err.kind {
            LLMFailureKind::Unauthenticated => AnalysisError::Auth,
            LLMFailureKind::ResourceExhausted => AnalysisError::RateLimitExceeded,
            LLMFailureKind::InvalidRequest
            | LLMFailureKind::Unavailable
            | LLMFailureKind::Transport
            | LLMFailureKind::EmptyResponse
            | LLMFailureKind::MalformedResponse => AnalysisError::Unknown(err.message),
        }
    }
}
