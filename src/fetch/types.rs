// src/fetch/types.rs
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::fetch::error::{FetchResult, ShapeError};
use crate::fetch::template::UrlTemplate;

/// Normalized value returned by a successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fact {
    Text(String),
    Number(f64),
    Record(BTreeMap<String, Fact>),
}

impl Fact {
    pub fn text(s: impl Into<String>) -> Self {
        Fact::Text(s.into())
    }

    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Fact)>,
        K: Into<String>,
    {
        Fact::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Field lookup on records; `None` for scalars.
    pub fn get(&self, key: &str) -> Option<&Fact> {
        match self {
            Fact::Record(m) => m.get(key),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fact::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Fact::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Text(s) => f.write_str(s),
            Fact::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Fact::Number(n) => write!(f, "{n}"),
            Fact::Record(m) => {
                let mut first = true;
                for (k, v) in m {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{k}: {v}")?;
                }
                Ok(())
            }
        }
    }
}

/// Interpolation parameters for a URL template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a `key=value` pair (value may itself contain `=`).
    pub fn parse_pair(s: &str) -> Result<(String, String), String> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
        let k = k.trim();
        if k.is_empty() {
            return Err(format!("empty parameter name in `{s}`"));
        }
        Ok((k.to_string(), v.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

pub type JsonExtractFn = dyn Fn(&Value) -> Result<Fact, ShapeError> + Send + Sync;
pub type TextExtractFn = dyn Fn(&str) -> Result<Fact, ShapeError> + Send + Sync;

/// Pure mapping from a response body to a [`Fact`].
#[derive(Clone)]
pub enum Extractor {
    Json(Arc<JsonExtractFn>),
    Text(Arc<TextExtractFn>),
}

impl Extractor {
    pub fn json<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Fact, ShapeError> + Send + Sync + 'static,
    {
        Extractor::Json(Arc::new(f))
    }

    pub fn text<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Fact, ShapeError> + Send + Sync + 'static,
    {
        Extractor::Text(Arc::new(f))
    }

    /// Parse the raw body per variant, then run the extraction step.
    pub fn apply(&self, body: &[u8]) -> Result<Fact, ShapeError> {
        match self {
            Extractor::Json(f) => {
                let v: Value = serde_json::from_slice(body)
                    .map_err(|e| ShapeError::new(format!("malformed JSON body: {e}")))?;
                f(&v)
            }
            Extractor::Text(f) => {
                let s = std::str::from_utf8(body)
                    .map_err(|e| ShapeError::new(format!("body is not UTF-8: {e}")))?;
                f(s)
            }
        }
    }

    pub fn format(&self) -> &'static str {
        match self {
            Extractor::Json(_) => "json",
            Extractor::Text(_) => "text",
        }
    }
}

/// Where a resolved credential goes on the outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialPlacement {
    /// Substituted into the `{api_key}` placeholder of the URL template.
    Url,
    Header(String),
    Bearer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSpec {
    /// Lookup name, also the environment variable consulted.
    pub name: String,
    pub placement: CredentialPlacement,
}

/// One remote fact source: URL template, headers, credential and extractor.
/// The request method is always GET.
#[derive(Clone)]
pub struct EndpointDescriptor {
    pub name: String,
    pub summary: String,
    pub url: UrlTemplate,
    pub headers: Vec<(String, String)>,
    pub credential: Option<CredentialSpec>,
    pub defaults: Params,
    pub extractor: Extractor,
}

impl EndpointDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>, extractor: Extractor) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
            url: UrlTemplate::new(url),
            headers: Vec::new(),
            credential: None,
            defaults: Params::new(),
            extractor,
        }
    }

    pub fn json<F>(name: impl Into<String>, url: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Fact, ShapeError> + Send + Sync + 'static,
    {
        Self::new(name, url, Extractor::json(f))
    }

    pub fn text<F>(name: impl Into<String>, url: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Result<Fact, ShapeError> + Send + Sync + 'static,
    {
        Self::new(name, url, Extractor::text(f))
    }

    pub fn summary(mut self, s: impl Into<String>) -> Self {
        self.summary = s.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_credential(mut self, name: impl Into<String>, placement: CredentialPlacement) -> Self {
        self.credential = Some(CredentialSpec {
            name: name.into(),
            placement,
        });
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key, value);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = UrlTemplate::new(url);
        self
    }

    /// Parameters the caller must supply (template placeholders without a default).
    pub fn required_params(&self) -> Vec<String> {
        self.url
            .placeholders()
            .into_iter()
            .filter(|p| p != crate::fetch::template::API_KEY && self.defaults.get(p).is_none())
            .collect()
    }
}

impl fmt::Debug for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointDescriptor")
            .field("name", &self.name)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("credential", &self.credential)
            .field("defaults", &self.defaults)
            .field("format", &self.extractor.format())
            .finish()
    }
}

/// Anything that can produce one fact on demand.
#[async_trait::async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self, params: &Params) -> FetchResult;
    fn name(&self) -> &str;
}
