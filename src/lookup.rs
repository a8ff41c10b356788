//! Reference database client
//!
//! Finds an ingredient's entry on the index page and reads its detail page.
//! Page retrieval goes through [`PageFetcher`] so the HTTP layer can be swapped.

use crate::config::Config;
use crate::error::{Result, ToxError};
use pesticide_tox_common::{extract_reference_values, find_entry_link_in, ReferenceValues, Url};
use std::time::Duration;

pub trait PageFetcher {
    /// Body of the page at `url`; non-success statuses are errors
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Blocking HTTP fetcher with connect and read timeouts
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        log::debug!("{} -> {}", url, status);

        if !status.is_success() {
            return Err(ToxError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}

#[derive(Debug)]
pub struct LookupClient<F: PageFetcher> {
    fetcher: F,
    index_url: Url,
}

impl LookupClient<HttpFetcher> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(HttpFetcher::new(config)?, &config.index_url)
    }
}

impl<F: PageFetcher> LookupClient<F> {
    pub fn new(fetcher: F, index_url: &str) -> Result<Self> {
        let index_url = Url::parse(index_url).map_err(pesticide_tox_common::Error::from)?;
        Ok(Self { fetcher, index_url })
    }

    pub fn index_url(&self) -> &Url {
        &self.index_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Link to the ingredient's detail page. The index page is fetched on every call.
    pub fn find_entry_link(&self, ingredient: &str) -> Result<Url> {
        let html = self.fetcher.fetch(&self.index_url)?;
        find_entry_link_in(&html, &self.index_url, ingredient)
            .ok_or_else(|| ToxError::NotFound(ingredient.to_string()))
    }

    pub fn fetch_reference_values(&self, detail_url: &Url) -> Result<ReferenceValues> {
        let html = self.fetcher.fetch(detail_url)?;
        Ok(extract_reference_values(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StaticPages(HashMap<String, String>);

    impl PageFetcher for StaticPages {
        fn fetch(&self, url: &Url) -> Result<String> {
            self.0.get(url.as_str()).cloned().ok_or_else(|| ToxError::Fetch {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    const INDEX: &str = "https://example.org/ppdb/atoz.htm";

    fn client(pages: &[(&str, &str)]) -> LookupClient<StaticPages> {
        let pages = pages
            .iter()
            .map(|(u, b)| (u.to_string(), b.to_string()))
            .collect();
        LookupClient::new(StaticPages(pages), INDEX).unwrap()
    }

    #[test]
    fn test_find_entry_link() {
        let client = client(&[(INDEX, r#"<a href="reports/7.htm">Mancozeb (Ref: Dithane)</a>"#)]);
        let link = client.find_entry_link("mancozeb").unwrap();
        assert_eq!(link.as_str(), "https://example.org/ppdb/reports/7.htm");
    }

    #[test]
    fn test_find_entry_link_not_found() {
        let client = client(&[(INDEX, r#"<a href="reports/7.htm">Mancozeb</a>"#)]);
        let err = client.find_entry_link("glifosato").unwrap_err();
        assert!(matches!(err, ToxError::NotFound(ref name) if name == "glifosato"));
    }

    #[test]
    fn test_index_fetch_failure() {
        let client = client(&[]);
        let err = client.find_entry_link("mancozeb").unwrap_err();
        assert!(matches!(err, ToxError::Fetch { status: 404, .. }));
    }

    #[test]
    fn test_invalid_index_url() {
        let result = LookupClient::new(StaticPages(HashMap::new()), "not a url");
        assert!(matches!(result, Err(ToxError::Common(_))));
    }

    #[test]
    fn test_fetch_reference_values() {
        let detail = "https://example.org/ppdb/reports/7.htm";
        let client = client(&[(
            detail,
            r#"<table><tr><th class="rowhead">Mammals - Acute oral LD₅₀ (mg kg⁻¹)</th><td class="data3">&gt;5000</td></tr></table>"#,
        )]);
        let values = client
            .fetch_reference_values(&Url::parse(detail).unwrap())
            .unwrap();
        assert_eq!(values.mammal_ld50.as_deref(), Some("5000"));
        assert!(values.bee_ld50.is_none());
    }
}
