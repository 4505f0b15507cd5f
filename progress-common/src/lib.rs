//! Shared error type and observability helpers for the progress-audit
//! workspace.
//!
//! - [`ProgressError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! The crate is intentionally lightweight so every member can depend on it
//! without pulling in the browser stack.

pub mod observability;

/// Error types used across the auditor.
///
/// The per-step variants exist so callers can tell UI flakiness apart from a
/// structural change on the remote site: a [`ProgressError::Login`] usually
/// means bad credentials, a [`ProgressError::Extraction`] usually means the
/// difficulty markup moved.
#[derive(thiserror::Error, Debug)]
pub enum ProgressError {
    /// The sign-in affordance or credential form could not be driven.
    #[error("login failed: {0}")]
    Login(String),

    /// Navigation to a page or section of the site failed.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The solved-exercise counts could not be read from the page.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Configuration or roster input was unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The WebDriver layer reported an error outside any tagged step.
    #[error("webdriver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Anything that does not fit the tagged variants.
    #[error("{0}")]
    Unknown(String),
}

/// Convenient alias for results that use [`ProgressError`].
pub type Result<T> = std::result::Result<T, ProgressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_variants_render_their_step() {
        let login = ProgressError::Login("bad credentials".into());
        assert_eq!(login.to_string(), "login failed: bad credentials");

        let nav = ProgressError::Navigation("timeout".into());
        assert!(nav.to_string().starts_with("navigation failed"));

        let extract = ProgressError::Extraction("selector matched nothing".into());
        assert!(extract.to_string().starts_with("extraction failed"));
    }

    #[test]
    fn unknown_passes_message_through() {
        let err = ProgressError::Unknown("boom".into());
        assert_eq!(err.to_string(), "boom");
    }
}
