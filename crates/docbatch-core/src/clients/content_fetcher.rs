//! Client for the public content endpoints

use crate::config::{EndpointsConfig, GeneratorConfig};
use crate::error::{DocBatchError, Result};
use crate::synthesis;
use async_trait::async_trait;
use docbatch_types::ContentRecord;
use rand::Rng;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::ContentSource;

const USER_AGENT: &str = concat!("docbatch/", env!("CARGO_PKG_VERSION"));

/// The known endpoints, each with its own response shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEndpoint {
    Quote,
    Fact,
    Joke,
}

impl ContentEndpoint {
    pub const ALL: [ContentEndpoint; 3] = [
        ContentEndpoint::Quote,
        ContentEndpoint::Fact,
        ContentEndpoint::Joke,
    ];

    pub fn url<'a>(&self, endpoints: &'a EndpointsConfig) -> &'a str {
        match self {
            ContentEndpoint::Quote => &endpoints.quote_url,
            ContentEndpoint::Fact => &endpoints.fact_url,
            ContentEndpoint::Joke => &endpoints.joke_url,
        }
    }

    /// Topic of the filler text appended to this endpoint's content
    pub fn filler_topic(&self) -> &'static str {
        match self {
            ContentEndpoint::Quote => "wisdom",
            ContentEndpoint::Fact => "science",
            ContentEndpoint::Joke => "humor",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    pub content: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct FactResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct JokeResponse {
    pub setup: String,
    pub punchline: String,
}

/// Title and primary text of a decoded response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    pub title: String,
    pub text: String,
}

/// Decode `payload` with the schema of `endpoint`
pub fn normalize(endpoint: ContentEndpoint, payload: &[u8]) -> Result<NormalizedContent> {
    let decode_err = |e: serde_json::Error| {
        DocBatchError::Decode(format!("{:?} response: {}", endpoint, e))
    };

    let normalized = match endpoint {
        ContentEndpoint::Quote => {
            let quote: QuoteResponse = serde_json::from_slice(payload).map_err(decode_err)?;
            NormalizedContent {
                title: format!("Quote by {}", quote.author.trim()),
                text: format!("\"{}\"\n\n- {}", quote.content.trim(), quote.author.trim()),
            }
        }
        ContentEndpoint::Fact => {
            let fact: FactResponse = serde_json::from_slice(payload).map_err(decode_err)?;
            NormalizedContent {
                title: "Interesting Fact".to_string(),
                text: fact.text.trim().to_string(),
            }
        }
        ContentEndpoint::Joke => {
            let joke: JokeResponse = serde_json::from_slice(payload).map_err(decode_err)?;
            NormalizedContent {
                title: "Joke of the Day".to_string(),
                text: format!("{}\n\n{}", joke.setup.trim(), joke.punchline.trim()),
            }
        }
    };

    Ok(normalized)
}

pub struct ContentFetcher {
    endpoints: EndpointsConfig,
    filler_min_chars: usize,
    filler_max_chars: usize,
    http_client: HttpClient,
}

impl ContentFetcher {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            endpoints: config.endpoints.clone(),
            filler_min_chars: config.filler_min_chars,
            filler_max_chars: config.filler_max_chars,
            http_client,
        })
    }

    fn pick_endpoint(&self) -> ContentEndpoint {
        let index = rand::thread_rng().gen_range(0..ContentEndpoint::ALL.len());
        ContentEndpoint::ALL[index]
    }

    fn filler_len(&self) -> usize {
        rand::thread_rng().gen_range(self.filler_min_chars..=self.filler_max_chars)
    }

    /// One request against `endpoint`, decoded and padded with filler text
    pub async fn fetch_from(
        &self,
        endpoint: ContentEndpoint,
        document_index: u64,
    ) -> Result<ContentRecord> {
        let url = endpoint.url(&self.endpoints);

        let response = self.http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DocBatchError::Status(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let payload = response.bytes().await?;
        let normalized = normalize(endpoint, &payload)?;

        if normalized.text.is_empty() {
            log::debug!("{:?} endpoint returned empty text for document {}", endpoint, document_index);
            return Ok(ContentRecord::empty(url));
        }

        let filler = synthesis::synthesize(endpoint.filler_topic(), document_index, self.filler_len());
        let body = format!("{}\n\n{}", normalized.text, filler);

        Ok(ContentRecord::new(url, normalized.title, body))
    }

    /// One attempt that never fails: errors become the empty-body sentinel.
    ///
    /// For callers outside the resolver that want a record rather than a
    /// `Result`; [`ContentResolver`](crate::services::ContentResolver) goes
    /// through [`ContentSource::fetch`] so it can log the error kind.
    pub async fn fetch_once(&self, document_index: u64) -> ContentRecord {
        let endpoint = self.pick_endpoint();

        match self.fetch_from(endpoint, document_index).await {
            Ok(record) => record,
            Err(e) => {
                log::warn!(
                    "Fetch from {:?} failed for document {} ({}): {}",
                    endpoint, document_index, e.kind(), e
                );
                ContentRecord::empty(endpoint.url(&self.endpoints))
            }
        }
    }
}

#[async_trait]
impl ContentSource for ContentFetcher {
    async fn fetch(&self, document_index: u64) -> Result<ContentRecord> {
        self.fetch_from(self.pick_endpoint(), document_index).await
    }
}
