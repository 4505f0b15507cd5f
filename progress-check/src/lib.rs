//! Roster loading, the per-student check protocol, and run reporting.
//!
//! - [`roster`]: whitespace-delimited roster file → [`roster::UserRecord`]s
//! - [`session`]: the page-automation seam the checker drives
//! - [`checker`]: one login/count/logout pass per record → [`checker::CheckResult`]
//! - [`report`]: sequential run over a roster and the printed summary
pub mod checker;
pub mod report;
pub mod roster;
pub mod session;
