use crate::Result;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

/// One outbound call, built per client invocation and dropped once it completes.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub method: Method,
    /// Path segments appended to the base URL, unencoded.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl PendingRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Request path as sent upstream, used in logs.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path())
    }
}

/// Flatten a serialized parameter object into query pairs.
///
/// Nulls are skipped, scalars are stringified and arrays are joined with
/// commas (`tableTypes=table,view`).
pub fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let Some(obj) = params.as_object() else {
        return Vec::new();
    };

    obj.iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
                other => other.to_string(),
            };
            Some((key.clone(), rendered))
        })
        .collect()
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    api_token: String,
}

impl HttpTransport {
    pub fn new(base_url: Url, api_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_token: api_token.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the full URL for a request: base URL, then encoded path
    /// segments, then query pairs.
    pub fn url_for(&self, request: &PendingRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                TransportError::Other(format!("base URL cannot carry a path: {}", self.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(request.segments.iter());
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    /// Send one request; only network-level failures are errors here, any
    /// HTTP status is returned to the caller for classification.
    pub async fn execute(&self, request: &PendingRequest) -> Result<reqwest::Response> {
        let url = self.url_for(request)?;

        let mut req = self
            .client
            .request(request.method.clone(), url)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        req.send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    Other(String),
}
