//! WebDriver layer for driving the trainer site.
//!
//! - [`driver::BrowserDriver`]: fantoccini client wrapper scoped to one run
//! - [`page::TrainerPage`]: element lookup by CSS, visible text, link name,
//!   and `data-testid`
pub mod driver;
pub mod page;
