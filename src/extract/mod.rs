pub mod blocks;
pub mod fallback;
pub mod primary;
pub mod scan;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Everything that can go wrong resolving one profile.
///
/// The extraction core only ever produces `NotFound`; the remote variants
/// originate in the fetcher and are carried through into the result
/// unchanged. Config problems are fatal at startup and never reach here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no profile URN found in HTML")]
    NotFound,
    #[error("profile not found (404)")]
    NotFoundRemote,
    #[error("authentication required - cookies may be expired")]
    AuthRequired,
    #[error("profile redirected to: {0}")]
    UnexpectedRedirect(String),
    #[error("HTTP {0}")]
    Http(u16),
    #[error("{0}")]
    Transport(String),
}

/// Which of the two methods produced the URN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Primary,
    Fallback,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Primary => write!(f, "primary"),
            Method::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of one extraction. Exactly one of `profile_urn` / `error` is set;
/// `method` accompanies `profile_urn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub vanity_name: String,
    pub profile_urn: Option<String>,
    pub method: Option<Method>,
    pub error: Option<ExtractError>,
}

impl ExtractionResult {
    pub fn found(vanity_name: &str, profile_urn: String, method: Method) -> Self {
        Self {
            vanity_name: vanity_name.to_string(),
            profile_urn: Some(profile_urn),
            method: Some(method),
            error: None,
        }
    }

    pub fn failed(vanity_name: &str, error: ExtractError) -> Self {
        Self {
            vanity_name: vanity_name.to_string(),
            profile_urn: None,
            method: None,
            error: Some(error),
        }
    }

    pub fn success(&self) -> bool {
        self.profile_urn.is_some()
    }
}

/// Resolve the target profile URN in a fetched page: anchor-field method
/// first, occurrence-count method second.
///
/// Pure function of its inputs — no I/O, no state, bounded by document size.
pub fn extract(html: &str, vanity_name: &str) -> ExtractionResult {
    if let Some(urn) = primary::from_code_blocks(html, vanity_name) {
        return ExtractionResult::found(vanity_name, urn, Method::Primary);
    }

    debug!("code block method found nothing for {}, counting occurrences", vanity_name);
    if let Some(urn) = fallback::by_occurrence_count(html) {
        return ExtractionResult::found(vanity_name, urn, Method::Fallback);
    }

    ExtractionResult::failed(vanity_name, ExtractError::NotFound)
}
