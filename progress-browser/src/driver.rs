use crate::page::TrainerPage;
use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::collections::HashMap;
use url::Url;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client.
///
/// One driver is connected per run and its session is shared by every
/// record; the checker is responsible for logging out between records.
pub struct BrowserDriver {
    client: Client,
}

impl BrowserDriver {
    /// Connect to a running WebDriver service (Chromedriver by default on
    /// `http://localhost:9515`).
    pub async fn connect(endpoint: &str, headless: bool) -> Result<Self> {
        Url::parse(endpoint)
            .with_context(|| format!("invalid webdriver endpoint: {endpoint}"))?;

        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let mut args = vec![
            "--disable-dev-shm-usage".to_string(),
            "--no-sandbox".to_string(),
        ];
        if headless {
            args.push("--headless".to_string());
            args.push("--disable-gpu".to_string());
        }
        chrome_opts.insert("args".to_string(), json!(args));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(endpoint)
            .await
            .with_context(|| format!("webdriver connect to {endpoint} failed"))?;

        tracing::info!(%endpoint, headless, "webdriver session established");
        Ok(Self { client })
    }

    /// Hand out a page wrapper over the shared session.
    pub fn page(&self) -> TrainerPage {
        TrainerPage::new(self.client.clone())
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
