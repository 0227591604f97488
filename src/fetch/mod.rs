// src/fetch/mod.rs
pub mod error;
pub mod extract;
pub mod template;
pub mod types;

use std::future::pending;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use reqwest::header::AUTHORIZATION;
use tokio_util::sync::CancellationToken;

use crate::config::{Credentials, FetchConfig};
use crate::fetch::error::{FetchError, FetchResult};
use crate::fetch::types::{CredentialPlacement, EndpointDescriptor, FactSource, Params};

/// One-time metrics registration (so series show up in the exposition).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("facts_fetch_total", "Fetch-and-normalize calls attempted.");
        describe_counter!(
            "facts_fetch_failures_total",
            "Failed fetches, labelled by failure kind."
        );
        describe_histogram!("facts_fetch_ms", "Fetch latency in milliseconds.");
    });
}

/// Per-call controls. Both fields are optional; neither means "wait for the client".
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl FetchOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Shared HTTP client plus resolved credentials. Cheap to clone; safe to
/// use from any number of concurrent tasks.
#[derive(Clone, Debug)]
pub struct Fetcher {
    http: reqwest::Client,
    credentials: Credentials,
    default_timeout: Option<Duration>,
}

impl Fetcher {
    pub fn new(cfg: &FetchConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .build()
            .context("building reqwest client")?;
        Ok(Self {
            http,
            credentials: Credentials::from_config(cfg),
            default_timeout: cfg.default_timeout(),
        })
    }

    pub fn with_client(http: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            http,
            credentials,
            default_timeout: None,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Issue one GET for `desc`, validate it and run the extractor.
    /// Every failure comes back as a typed [`FetchError`].
    pub async fn fetch(
        &self,
        desc: &EndpointDescriptor,
        params: &Params,
        opts: &FetchOptions,
    ) -> FetchResult {
        ensure_metrics_described();
        let t0 = Instant::now();

        let out = self.fetch_guarded(desc, params, opts).await;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("facts_fetch_ms").record(ms);
        counter!("facts_fetch_total").increment(1);
        match &out {
            Ok(fact) => {
                tracing::debug!(endpoint = %desc.name, ms, %fact, "fetch ok");
            }
            Err(e) => {
                let kind = e.kind().as_str();
                tracing::warn!(endpoint = %desc.name, kind, error = %e, "fetch failed");
                counter!("facts_fetch_failures_total", "kind" => kind).increment(1);
            }
        }
        out
    }

    async fn fetch_guarded(
        &self,
        desc: &EndpointDescriptor,
        params: &Params,
        opts: &FetchOptions,
    ) -> FetchResult {
        let request = self.prepare(desc, params)?;

        let timeout = opts.timeout.or(self.default_timeout);
        let deadline = async move {
            match timeout {
                Some(d) => {
                    tokio::time::sleep(d).await;
                    d
                }
                None => pending().await,
            }
        };
        let cancelled = async {
            match &opts.cancel {
                Some(token) => token.cancelled().await,
                None => pending().await,
            }
        };

        // Dropping the losing branch aborts the in-flight request.
        tokio::select! {
            res = execute(request, desc) => res,
            d = deadline => Err(FetchError::Timeout(format!("no response within {} ms", d.as_millis()))),
            _ = cancelled => Err(FetchError::Timeout("aborted by caller".to_string())),
        }
    }

    /// Everything that can fail before I/O: credential, URL, request build.
    fn prepare(
        &self,
        desc: &EndpointDescriptor,
        params: &Params,
    ) -> Result<reqwest::RequestBuilder, FetchError> {
        let credential = match &desc.credential {
            Some(spec) => Some((
                spec,
                self.credentials.resolve(&spec.name).ok_or_else(|| {
                    FetchError::Configuration(format!("missing credential {}", spec.name))
                })?,
            )),
            None => None,
        };

        let url_key = credential
            .as_ref()
            .filter(|(spec, _)| spec.placement == CredentialPlacement::Url)
            .map(|(_, v)| v.as_str());
        let url = desc.url.render(params, &desc.defaults, url_key)?;
        let url = reqwest::Url::parse(&url)
            .map_err(|e| FetchError::Configuration(format!("invalid URL `{url}`: {e}")))?;

        let mut req = self.http.get(url);
        for (k, v) in &desc.headers {
            req = req.header(k.as_str(), v.as_str());
        }
        if let Some((spec, value)) = &credential {
            match &spec.placement {
                CredentialPlacement::Url => {}
                CredentialPlacement::Header(name) => req = req.header(name.as_str(), value.as_str()),
                CredentialPlacement::Bearer => {
                    req = req.header(AUTHORIZATION, format!("Bearer {value}"))
                }
            }
        }
        Ok(req)
    }
}

async fn execute(request: reqwest::RequestBuilder, desc: &EndpointDescriptor) -> FetchResult {
    let resp = request.send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }
    let body = resp.bytes().await?;
    Ok(desc.extractor.apply(&body)?)
}

/// A descriptor bound to a fetcher, usable wherever a [`FactSource`] is expected.
#[derive(Clone, Debug)]
pub struct BoundEndpoint {
    fetcher: Fetcher,
    descriptor: Arc<EndpointDescriptor>,
    options: FetchOptions,
}

impl BoundEndpoint {
    pub fn new(fetcher: Fetcher, descriptor: EndpointDescriptor) -> Self {
        Self {
            fetcher,
            descriptor: Arc::new(descriptor),
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }
}

#[async_trait::async_trait]
impl FactSource for BoundEndpoint {
    async fn fetch_fact(&self, params: &Params) -> FetchResult {
        self.fetcher
            .fetch(&self.descriptor, params, &self.options)
            .await
    }

    fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// Result of one source inside [`run_all`].
#[derive(Debug, Clone)]
pub struct Outcome {
    pub endpoint: String,
    pub result: FetchResult,
}

/// Fetch from every source concurrently. Output order matches `sources`.
/// Timeouts and cancellation are per source; see [`BoundEndpoint::with_options`].
pub async fn run_all(sources: &[Box<dyn FactSource>], params: &Params) -> Vec<Outcome> {
    let calls = sources.iter().map(|s| async move {
        let result = s.fetch_fact(params).await;
        if let Err(e) = &result {
            tracing::warn!(
                target: "facts",
                endpoint = s.name(),
                kind = e.kind().as_str(),
                error = %e,
                "source failed"
            );
        }
        Outcome {
            endpoint: s.name().to_string(),
            result,
        }
    });
    let outcomes = futures::future::join_all(calls).await;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    tracing::info!(
        target: "facts",
        total = outcomes.len(),
        failed,
        "fan-out finished"
    );
    outcomes
}
