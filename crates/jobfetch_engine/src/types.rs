use std::fmt;
use std::path::PathBuf;

/// What a fetch target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchType {
    JobPosting,
    Cv,
}

impl fmt::Display for FetchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchType::JobPosting => write!(f, "job posting"),
            FetchType::Cv => write!(f, "cv"),
        }
    }
}

/// Title, organization and body pulled out of a page. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub content: String,
    pub organization: String,
    pub title: String,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.organization.is_empty() && self.title.is_empty()
    }
}

/// Descriptor returned after a job posting was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub url: String,
    pub output_path: PathBuf,
    pub organization: String,
    pub title: String,
    pub size_bytes: u64,
}

/// Descriptor returned after a CV document was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvResult {
    pub url: String,
    pub output_path: PathBuf,
    pub name: String,
    pub label: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Posting(FetchResult),
    Cv(CvResult),
}

impl FetchOutcome {
    pub fn output_path(&self) -> &std::path::Path {
        match self {
            FetchOutcome::Posting(result) => &result.output_path,
            FetchOutcome::Cv(result) => &result.output_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    /// Lowercased host of the final (post-redirect) URL.
    pub host: String,
    pub path: String,
    pub content_type: Option<String>,
    pub redirect_count: usize,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    HttpStatus(u16),
    Decode,
    Validation,
    Filesystem,
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Validation => write!(f, "validation error"),
            FailureKind::Filesystem => write!(f, "filesystem error"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_carries_kind_and_detail() {
        let err = FetchError::new(FailureKind::HttpStatus(404), "404 Not Found");
        assert_eq!(err.to_string(), "http status 404: 404 Not Found");
    }

    #[test]
    fn extraction_default_is_empty() {
        assert!(Extraction::default().is_empty());
        let partial = Extraction {
            title: "Engineer".into(),
            ..Extraction::default()
        };
        assert!(!partial.is_empty());
    }
}
