//! Sequential run over a roster and the printed summary.

use crate::checker::{check_user, CheckResult, EASY_TASKS_REQUIRED, MEDIUM_TASKS_REQUIRED};
use crate::roster::UserRecord;
use crate::session::SitePage;
use progress_common::{ProgressError, Result};
use tracing::info;

/// Ordered results of one run; order equals roster order.
#[derive(Debug)]
pub struct RunSummary {
    pub results: Vec<CheckResult>,
}

impl RunSummary {
    /// Records whose counts met both thresholds.
    pub fn passed(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| r.passed).collect()
    }

    /// Records that missed a threshold or failed outright.
    pub fn failed(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    /// Pass percentage rounded to the nearest integer.
    pub fn pass_rate(&self) -> u32 {
        if self.results.is_empty() {
            return 0;
        }
        let passed = self.passed().len() as f64;
        let total = self.results.len() as f64;
        (passed / total * 100.0).round() as u32
    }

    /// Render the final human-readable block: counts, percentage, and one
    /// line per failed record.
    pub fn render(&self) -> String {
        let failed = self.failed();
        let mut out = String::new();

        out.push_str("FINAL STATISTICS\n");
        out.push_str("========================\n");
        out.push_str(&format!("passed: {}\n", self.passed().len()));
        out.push_str(&format!("failed: {}\n", failed.len()));
        out.push_str(&format!("pass rate: {}%\n", self.pass_rate()));

        if !failed.is_empty() {
            out.push_str("\nstudents below the requirements:\n");
            for r in failed {
                out.push_str(&format!(
                    "- {} - easy: {}/{}, medium: {}/{}",
                    r.email,
                    r.easy_tasks,
                    EASY_TASKS_REQUIRED,
                    r.medium_tasks,
                    MEDIUM_TASKS_REQUIRED
                ));
                if let Some(err) = &r.error {
                    out.push_str(&format!(" (check failed: {err})"));
                }
                out.push('\n');
            }
        }

        out
    }
}

/// Check every record strictly in order over one shared session.
///
/// An empty roster is a hard error: the run is invalid and no checks are
/// attempted. Per-record failures never abort the run; they surface as
/// failed results.
pub async fn run_roster(
    page: &mut dyn SitePage,
    base_url: &str,
    records: &[UserRecord],
) -> Result<RunSummary> {
    if records.is_empty() {
        return Err(ProgressError::Config(
            "roster produced no records; nothing to check".into(),
        ));
    }

    let total = records.len();
    let mut results = Vec::with_capacity(total);

    for (i, user) in records.iter().enumerate() {
        info!(email = %user.email, "checking user {}/{total}", i + 1);
        results.push(check_user(page, base_url, user).await);
    }

    Ok(RunSummary { results })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(email: &str, easy: usize, medium: usize, passed: bool) -> CheckResult {
        CheckResult {
            email: email.to_string(),
            easy_tasks: easy,
            medium_tasks: medium,
            additional_info: String::new(),
            passed,
            error: None,
        }
    }

    #[test]
    fn pass_rate_rounds_to_nearest_integer() {
        let summary = RunSummary {
            results: vec![
                result("a@x.com", 16, 11, true),
                result("b@x.com", 18, 12, true),
                result("c@x.com", 17, 11, true),
                result("d@x.com", 10, 5, false),
            ],
        };
        // 3 of 4.
        assert_eq!(summary.pass_rate(), 75);

        let summary = RunSummary {
            results: vec![
                result("a@x.com", 16, 11, true),
                result("b@x.com", 10, 5, false),
                result("c@x.com", 10, 5, false),
            ],
        };
        // 1 of 3 -> 33.33 rounds down.
        assert_eq!(summary.pass_rate(), 33);

        let summary = RunSummary {
            results: vec![
                result("a@x.com", 16, 11, true),
                result("b@x.com", 16, 11, true),
                result("c@x.com", 10, 5, false),
            ],
        };
        // 2 of 3 -> 66.67 rounds up.
        assert_eq!(summary.pass_rate(), 67);
    }

    #[test]
    fn partitions_by_passed_flag() {
        let summary = RunSummary {
            results: vec![
                result("a@x.com", 16, 11, true),
                result("b@x.com", 15, 11, false),
            ],
        };
        assert_eq!(summary.passed().len(), 1);
        assert_eq!(summary.failed().len(), 1);
        assert_eq!(summary.failed()[0].email, "b@x.com");
    }

    #[test]
    fn render_lists_each_failed_record_with_raw_counts() {
        let mut errored = result("c@x.com", 0, 0, false);
        errored.error = Some("login failed: bad credentials".into());

        let summary = RunSummary {
            results: vec![
                result("a@x.com", 16, 11, true),
                result("b@x.com", 15, 11, false),
                errored,
            ],
        };

        let text = summary.render();
        assert!(text.contains("passed: 1"));
        assert!(text.contains("failed: 2"));
        assert!(text.contains("pass rate: 33%"));
        assert!(text.contains("- b@x.com - easy: 15/16, medium: 11/11"));
        assert!(text.contains("- c@x.com - easy: 0/16, medium: 0/11 (check failed: login failed: bad credentials)"));
    }

    #[test]
    fn render_omits_failed_section_when_everyone_passes() {
        let summary = RunSummary {
            results: vec![result("a@x.com", 16, 11, true)],
        };
        let text = summary.render();
        assert!(text.contains("pass rate: 100%"));
        assert!(!text.contains("below the requirements"));
    }
}
