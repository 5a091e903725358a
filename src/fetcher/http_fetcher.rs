use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::app::Result;
use crate::fetcher::Fetcher;

pub const DEFAULT_USER_AGENT: &str = concat!("rss2email/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Some origins reject requests without a recognisable agent string.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        Self::from_builder(Client::builder(), user_agent, timeout)
    }

    fn from_builder(builder: ClientBuilder, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = builder
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)?;

        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        Ok(response.bytes().await?.to_vec())
    }
}
