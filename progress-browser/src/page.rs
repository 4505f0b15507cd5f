use anyhow::{Context, Result};
use fantoccini::{elements::Element, Client, Locator};

/// Page wrapper providing the element lookups the check protocol needs.
///
/// Single-element lookups go through the client's wait so freshly rendered
/// UI (the sign-in form, the trainer list) has a chance to appear before we
/// give up; [`TrainerPage::count`] deliberately does not wait, since zero
/// matches is a valid answer there.
pub struct TrainerPage {
    client: Client,
}

impl TrainerPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Navigate the session to `url`.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))
    }

    /// Find a single element by CSS selector, waiting for it to appear.
    pub async fn find(&self, selector: &str) -> Result<PageElement> {
        let element = self
            .client
            .wait()
            .for_element(Locator::Css(selector))
            .await
            .with_context(|| format!("no element matched css {selector:?}"))?;
        Ok(PageElement { element })
    }

    /// Find an element whose visible text equals `text` exactly.
    pub async fn find_by_text(&self, text: &str) -> Result<PageElement> {
        // The site labels carry no quote characters, so plain single-quote
        // XPath literals are safe here.
        let xpath = format!("//*[normalize-space(text())='{text}']");
        let element = self
            .client
            .wait()
            .for_element(Locator::XPath(&xpath))
            .await
            .with_context(|| format!("no element with visible text {text:?}"))?;
        Ok(PageElement { element })
    }

    /// Find a link by its accessible name.
    pub async fn find_link(&self, name: &str) -> Result<PageElement> {
        let element = self
            .client
            .wait()
            .for_element(Locator::LinkText(name))
            .await
            .with_context(|| format!("no link named {name:?}"))?;
        Ok(PageElement { element })
    }

    /// Find an element by its `data-testid` attribute.
    pub async fn find_test_id(&self, test_id: &str) -> Result<PageElement> {
        let selector = format!("[data-testid='{test_id}']");
        let element = self
            .client
            .wait()
            .for_element(Locator::Css(&selector))
            .await
            .with_context(|| format!("no element with test id {test_id:?}"))?;
        Ok(PageElement { element })
    }

    /// Find an image by its alt text.
    pub async fn find_image(&self, name: &str) -> Result<PageElement> {
        let selector = format!("img[alt='{name}']");
        let element = self
            .client
            .wait()
            .for_element(Locator::Css(&selector))
            .await
            .with_context(|| format!("no image named {name:?}"))?;
        Ok(PageElement { element })
    }

    /// Count the elements currently matching a CSS selector.
    pub async fn count(&self, selector: &str) -> Result<usize> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(elements.len())
    }
}

/// Wrapper for DOM elements with the handful of actions the checker uses.
pub struct PageElement {
    element: Element,
}

impl PageElement {
    /// Click the element.
    pub async fn click(&self) -> Result<()> {
        self.element.click().await.map_err(anyhow::Error::from)
    }

    /// Clear the field and type `value` into it.
    pub async fn fill(&self, value: &str) -> Result<()> {
        self.element.clear().await?;
        self.element
            .send_keys(value)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Return the element's visible text.
    pub async fn text(&self) -> Result<String> {
        self.element.text().await.map_err(anyhow::Error::from)
    }
}
