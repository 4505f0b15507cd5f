//! The page-automation seam the checker drives.
//!
//! The checker never talks to fantoccini directly; it consumes a
//! [`SitePage`] handed in by the caller. Production passes a
//! [`WebdriverSession`]; tests pass a scripted fake.

use anyhow::Result;
use async_trait::async_trait;
use progress_browser::page::TrainerPage;

/// Everything the check protocol needs from a live page.
///
/// One implementor instance corresponds to one browser session, shared
/// across the whole run; callers must not interleave records.
#[async_trait]
pub trait SitePage: Send {
    /// Navigate the session to `url`.
    async fn open(&mut self, url: &str) -> Result<()>;

    /// Click the element whose visible text equals `label` exactly.
    async fn click_text(&mut self, label: &str) -> Result<()>;

    /// Click a link by its accessible name.
    async fn click_link(&mut self, name: &str) -> Result<()>;

    /// Click an image by its alt text.
    async fn click_image(&mut self, name: &str) -> Result<()>;

    /// Fill the input carrying `data-testid` `test_id` with `value`.
    async fn fill_test_id(&mut self, test_id: &str, value: &str) -> Result<()>;

    /// Click the element carrying `data-testid` `test_id`.
    async fn click_test_id(&mut self, test_id: &str) -> Result<()>;

    /// Count the elements currently matching a CSS selector.
    async fn count_elements(&mut self, selector: &str) -> Result<usize>;
}

/// Production session backed by the fantoccini wrapper.
pub struct WebdriverSession {
    page: TrainerPage,
}

impl WebdriverSession {
    pub fn new(page: TrainerPage) -> Self {
        Self { page }
    }
}

#[async_trait]
impl SitePage for WebdriverSession {
    async fn open(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await
    }

    async fn click_text(&mut self, label: &str) -> Result<()> {
        self.page.find_by_text(label).await?.click().await
    }

    async fn click_link(&mut self, name: &str) -> Result<()> {
        self.page.find_link(name).await?.click().await
    }

    async fn click_image(&mut self, name: &str) -> Result<()> {
        self.page.find_image(name).await?.click().await
    }

    async fn fill_test_id(&mut self, test_id: &str, value: &str) -> Result<()> {
        self.page.find_test_id(test_id).await?.fill(value).await
    }

    async fn click_test_id(&mut self, test_id: &str) -> Result<()> {
        self.page.find_test_id(test_id).await?.click().await
    }

    async fn count_elements(&mut self, selector: &str) -> Result<usize> {
        self.page.count(selector).await
    }
}
