//! The per-student check protocol: login, navigate to the trainer, count
//! solved exercises by difficulty, log out.
//!
//! Every selector and label below mirrors the remote site's DOM; a change
//! to that UI is a breaking external-interface change for this module.

use crate::roster::UserRecord;
use crate::session::SitePage;
use progress_common::ProgressError;
use tracing::{info, warn};

/// Minimum solved easy exercises for a pass.
pub const EASY_TASKS_REQUIRED: usize = 16;
/// Minimum solved medium exercises for a pass.
pub const MEDIUM_TASKS_REQUIRED: usize = 11;

// Site affordances. The text labels are the site's Russian UI strings.
pub(crate) const SIGN_IN_LABEL: &str = "Войти";
pub(crate) const SIGN_OUT_LABEL: &str = "Выйти";
pub(crate) const TRAINER_LINK: &str = "Тренажёр";
pub(crate) const SOLVED_FILTER_LABEL: &str = "Решённые";
pub(crate) const AVATAR_IMAGE: &str = "avatar";
pub(crate) const EMAIL_INPUT: &str = "sign-in-form-email-input";
pub(crate) const PASSWORD_INPUT: &str = "sign-in-form-password-input";
pub(crate) const SUBMIT_BUTTON: &str = "sign-in-form-submit-button";
pub(crate) const EASY_SELECTOR: &str = ".difficulty-indicator.easy";
pub(crate) const MEDIUM_SELECTOR: &str = ".difficulty-indicator.medium";

/// Outcome of checking one record. Exactly one is produced per
/// [`UserRecord`], in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub email: String,
    pub easy_tasks: usize,
    pub medium_tasks: usize,
    pub additional_info: String,
    pub passed: bool,
    pub error: Option<String>,
}

/// The fixed pass condition: both thresholds must be met or exceeded.
pub fn meets_thresholds(easy: usize, medium: usize) -> bool {
    easy >= EASY_TASKS_REQUIRED && medium >= MEDIUM_TASKS_REQUIRED
}

/// Run the full check for one record.
///
/// Never returns an error: any failure at any step, logout included, is
/// captured into the result as `easy_tasks = 0, medium_tasks = 0,
/// passed = false` with the rendered error message. Counts are never
/// partially populated.
pub async fn check_user(
    page: &mut dyn SitePage,
    base_url: &str,
    user: &UserRecord,
) -> CheckResult {
    match run_protocol(page, base_url, user).await {
        Ok((easy, medium)) => {
            let passed = meets_thresholds(easy, medium);
            if passed {
                info!(
                    email = %user.email,
                    easy = %format_args!("{easy}/{EASY_TASKS_REQUIRED}"),
                    medium = %format_args!("{medium}/{MEDIUM_TASKS_REQUIRED}"),
                    "student meets the required task counts"
                );
            } else {
                warn!(
                    email = %user.email,
                    easy = %format_args!("{easy}/{EASY_TASKS_REQUIRED}"),
                    medium = %format_args!("{medium}/{MEDIUM_TASKS_REQUIRED}"),
                    "student is below the required task counts"
                );
            }
            if !user.additional_info.is_empty() {
                info!(email = %user.email, info = %user.additional_info, "additional info");
            }

            CheckResult {
                email: user.email.clone(),
                easy_tasks: easy,
                medium_tasks: medium,
                additional_info: user.additional_info.clone(),
                passed,
                error: None,
            }
        }
        Err(err) => {
            warn!(email = %user.email, %err, "check failed");
            CheckResult {
                email: user.email.clone(),
                easy_tasks: 0,
                medium_tasks: 0,
                additional_info: user.additional_info.clone(),
                passed: false,
                error: Some(err.to_string()),
            }
        }
    }
}

/// The fixed UI sequence. Each step is awaited before the next; the step
/// that fails determines the tagged error variant.
async fn run_protocol(
    page: &mut dyn SitePage,
    base_url: &str,
    user: &UserRecord,
) -> Result<(usize, usize), ProgressError> {
    page.open(base_url).await.map_err(navigation)?;

    page.click_text(SIGN_IN_LABEL).await.map_err(login)?;
    page.fill_test_id(EMAIL_INPUT, &user.email).await.map_err(login)?;
    page.fill_test_id(PASSWORD_INPUT, &user.password)
        .await
        .map_err(login)?;
    page.click_test_id(SUBMIT_BUTTON).await.map_err(login)?;

    page.click_link(TRAINER_LINK).await.map_err(navigation)?;
    page.click_text(SOLVED_FILTER_LABEL).await.map_err(navigation)?;

    let easy = page.count_elements(EASY_SELECTOR).await.map_err(extraction)?;
    let medium = page
        .count_elements(MEDIUM_SELECTOR)
        .await
        .map_err(extraction)?;

    // Best-effort logout so the next record starts from a clean session.
    page.click_image(AVATAR_IMAGE).await.map_err(navigation)?;
    page.click_text(SIGN_OUT_LABEL).await.map_err(navigation)?;

    Ok((easy, medium))
}

fn login(err: anyhow::Error) -> ProgressError {
    ProgressError::Login(err.to_string())
}

fn navigation(err: anyhow::Error) -> ProgressError {
    ProgressError::Navigation(err.to_string())
}

fn extraction(err: anyhow::Error) -> ProgressError {
    ProgressError::Extraction(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert!(meets_thresholds(16, 11));
        assert!(meets_thresholds(20, 15));
        assert!(!meets_thresholds(15, 11));
        assert!(!meets_thresholds(16, 10));
        assert!(!meets_thresholds(0, 0));
    }
}
