//! The fetch pipeline and a thread-backed handle for driving it from sync code.

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::classify::{detect_fetch_type, with_default_scheme};
use crate::config::EngineConfig;
use crate::cv::{parse_cv, resolve_cv_url};
use crate::decode::decode_body;
use crate::fetch::{validate_url, Accept, Fetcher, ReqwestFetcher};
use crate::filename::generate_filename_on;
use crate::frontmatter::{build_posting_document, format_fetched};
use crate::normalize::{clean_html, clean_text};
use crate::persist::{write_file_atomic, AtomicFileWriter};
use crate::strategy::{Page, StrategyRegistry};
use crate::text::{ensure_md_extension, sanitize_filename};
use crate::{
    CvResult, Extraction, FailureKind, FetchError, FetchOutcome, FetchOutput, FetchResult,
    FetchType,
};

/// Fetches postings and CVs and writes them to disk.
///
/// Every call is independent: one request, in-memory transforms and one
/// atomic write. Cancelling the token aborts the request, and a cancelled
/// call never writes.
pub struct Engine {
    config: EngineConfig,
    fetcher: Arc<dyn Fetcher>,
    strategies: StrategyRegistry,
}

impl Engine {
    /// Engine with the reqwest transport and the default site strategies.
    pub fn new(config: EngineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_parts(config, fetcher, StrategyRegistry::with_defaults())
    }

    pub fn with_parts(
        config: EngineConfig,
        fetcher: Arc<dyn Fetcher>,
        strategies: StrategyRegistry,
    ) -> Self {
        Self {
            config,
            fetcher,
            strategies,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    /// Fetch a job posting and save it as Markdown in the postings directory.
    pub async fn fetch_posting(
        &self,
        url: &str,
        name_override: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<FetchResult, FetchError> {
        let url = url.trim();
        validate_url(url)?;

        let output = self.fetch_cancellable(url, Accept::Html, cancel).await?;
        let extraction = self.extract_posting(&output);

        let content = clean_html(&extraction.content);
        let title = clean_text(&extraction.title);
        let organization = clean_text(&extraction.organization);
        if content.is_empty() {
            engine_warn!("No job description found on {}; writing headers only", url);
        }

        let now = self.config.now();
        let filename = match name_override.and_then(override_filename) {
            Some(name) => name,
            None => ensure_md_extension(&generate_filename_on(
                &organization,
                &title,
                url,
                now.date_naive(),
            )),
        };
        let document =
            build_posting_document(url, &format_fetched(&now), &organization, &title, &content);

        ensure_not_cancelled(url, cancel)?;
        let output_path =
            AtomicFileWriter::new(self.config.postings_dir.clone()).write(&filename, &document)?;
        engine_info!("Wrote {} ({} bytes)", output_path.display(), document.len());

        Ok(FetchResult {
            url: url.to_string(),
            output_path,
            organization,
            title,
            size_bytes: document.len() as u64,
        })
    }

    /// Fetch `<domain>/cv.json`, check it is JSON and save it pretty-printed.
    pub async fn fetch_cv(
        &self,
        domain_or_url: &str,
        cancel: &CancellationToken,
    ) -> Result<CvResult, FetchError> {
        let url = resolve_cv_url(domain_or_url);
        validate_url(&url)?;

        let output = self.fetch_cancellable(&url, Accept::Json, cancel).await?;
        let body = decode_body(&output.bytes, output.metadata.content_type.as_deref());
        let cv = parse_cv(&body.text)?;

        ensure_not_cancelled(&url, cancel)?;
        let output_path = write_file_atomic(&self.config.cv_path, &cv.pretty)?;
        engine_info!("Wrote CV {} ({} bytes)", output_path.display(), cv.pretty.len());

        Ok(CvResult {
            url,
            name: cv.name(),
            label: cv.label(),
            output_path,
            size_bytes: cv.pretty.len() as u64,
        })
    }

    /// Classify `input` and route it to [`Engine::fetch_cv`] or
    /// [`Engine::fetch_posting`]. The name override only applies to postings.
    pub async fn fetch_auto(
        &self,
        input: &str,
        name_override: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome, FetchError> {
        let kind = detect_fetch_type(input);
        engine_debug!("{:?} classified as {}", input, kind);
        match kind {
            FetchType::Cv => self.fetch_cv(input, cancel).await.map(FetchOutcome::Cv),
            FetchType::JobPosting => self
                .fetch_posting(&with_default_scheme(input.trim()), name_override, cancel)
                .await
                .map(FetchOutcome::Posting),
        }
    }

    pub async fn execute(
        &self,
        request: FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome, FetchError> {
        match request {
            FetchRequest::Posting { url, name_override } => self
                .fetch_posting(&url, name_override.as_deref(), cancel)
                .await
                .map(FetchOutcome::Posting),
            FetchRequest::Cv { input } => self.fetch_cv(&input, cancel).await.map(FetchOutcome::Cv),
            FetchRequest::Auto {
                input,
                name_override,
            } => self.fetch_auto(&input, name_override.as_deref(), cancel).await,
        }
    }

    async fn fetch_cancellable(
        &self,
        url: &str,
        accept: Accept,
        cancel: &CancellationToken,
    ) -> Result<FetchOutput, FetchError> {
        ensure_not_cancelled(url, cancel)?;
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(cancelled(url)),
            result = self.fetcher.fetch(url, accept) => result,
        }
    }

    /// Parsed documents are not `Send`, so parsing and extraction stay in
    /// this synchronous step.
    fn extract_posting(&self, output: &FetchOutput) -> Extraction {
        let meta = &output.metadata;
        let decoded = decode_body(&output.bytes, meta.content_type.as_deref());
        engine_debug!("Decoded {} as {}", meta.final_url, decoded.encoding_label);

        let strategy = self.strategies.select(&meta.host);
        engine_info!("Using {} strategy for {}", strategy.name(), meta.host);
        let page = Page::parse(&meta.final_url, &meta.host, &decoded.text);
        strategy.extract(&page)
    }
}

/// Caller-chosen name for a posting: slugged, with `.md` ensured. `None` when
/// nothing usable is left, in which case the generated name is used.
fn override_filename(name: &str) -> Option<String> {
    let name = name.trim();
    let stem = name.strip_suffix(".md").unwrap_or(name);
    let slug = sanitize_filename(stem);
    if slug.is_empty() {
        engine_warn!("Ignoring unusable file name {:?}", name);
        return None;
    }
    Some(ensure_md_extension(&slug))
}

fn ensure_not_cancelled(url: &str, cancel: &CancellationToken) -> Result<(), FetchError> {
    if cancel.is_cancelled() {
        Err(cancelled(url))
    } else {
        Ok(())
    }
}

fn cancelled(url: &str) -> FetchError {
    engine_debug!("Cancelled {}", url);
    FetchError::new(FailureKind::Cancelled, format!("{url}: cancelled"))
}

pub type RequestId = u64;

/// Work accepted by [`EngineHandle::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Posting {
        url: String,
        name_override: Option<String>,
    },
    Cv {
        input: String,
    },
    Auto {
        input: String,
        name_override: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Completed {
        request_id: RequestId,
        result: Result<FetchOutcome, FetchError>,
    },
}

struct EngineCommand {
    request_id: RequestId,
    request: FetchRequest,
    cancel: CancellationToken,
}

/// Runs an [`Engine`] on its own thread and tokio runtime. Requests run
/// concurrently; completions are polled with [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(engine: Engine) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let engine = Arc::new(engine);

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    while let Ok(command) = cmd_rx.recv() {
                        let _ = event_tx.send(EngineEvent::Completed {
                            request_id: command.request_id,
                            result: Err(FetchError::new(
                                FailureKind::Network,
                                format!("engine runtime unavailable: {err}"),
                            )),
                        });
                    }
                    return;
                }
            };

            while let Ok(command) = cmd_rx.recv() {
                let engine = engine.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let EngineCommand {
                        request_id,
                        request,
                        cancel,
                    } = command;
                    let result = engine.execute(request, &cancel).await;
                    if let Err(err) = &result {
                        engine_warn!("Request {} failed: {}", request_id, err);
                    }
                    let _ = event_tx.send(EngineEvent::Completed { request_id, result });
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queue a request. Cancel the returned token to abort it.
    pub fn submit(&self, request_id: RequestId, request: FetchRequest) -> CancellationToken {
        let cancel = CancellationToken::new();
        let _ = self.cmd_tx.send(EngineCommand {
            request_id,
            request,
            cancel: cancel.clone(),
        });
        cancel
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
