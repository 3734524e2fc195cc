use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]+)")
        .expect("valid video url pattern")
});

static STRICT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]+)(?:[?&#]\S*)?$",
    )
    .expect("valid strict video url pattern")
});

/// How much of the input the pattern has to cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Only the start of the input must look like a video link; anything
    /// after the id is ignored.
    #[default]
    Prefix,
    /// The id may only be followed by query parameters or a fragment.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidFormat,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidFormat => write!(f, "Please enter a valid YouTube URL"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A submitted link that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUrl {
    raw: String,
    video_id: String,
}

impl ValidUrl {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }
}

impl fmt::Display for ValidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlValidator {
    mode: MatchMode,
}

impl UrlValidator {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn validate(&self, raw_input: &str) -> Result<ValidUrl, ValidationError> {
        let input = raw_input.trim();
        let pattern = match self.mode {
            MatchMode::Prefix => &*PREFIX_PATTERN,
            MatchMode::Strict => &*STRICT_PATTERN,
        };

        let captures = pattern
            .captures(input)
            .ok_or(ValidationError::InvalidFormat)?;
        let video_id = captures
            .get(1)
            .ok_or(ValidationError::InvalidFormat)?
            .as_str()
            .to_string();

        Ok(ValidUrl {
            raw: input.to_string(),
            video_id,
        })
    }
}

/// Validate with the default prefix matching.
pub fn validate(raw_input: &str) -> Result<ValidUrl, ValidationError> {
    UrlValidator::default().validate(raw_input)
}
