//! Job posting and CV fetch engine: transport, site extraction, Markdown
//! normalization, file naming and atomic persistence.
mod classify;
mod config;
mod cv;
mod decode;
mod engine;
mod fetch;
mod filename;
mod frontmatter;
mod hostname;
mod identifier;
mod normalize;
mod persist;
mod posting_doc;
pub mod strategy;
mod text;
mod types;

pub use classify::detect_fetch_type;
pub use config::{Clock, EngineConfig, DEFAULT_CV_PATH};
pub use cv::{lookup, lookup_str, parse_cv, resolve_cv_url, CvDocument};
pub use decode::{decode_body, DecodedBody};
pub use engine::{Engine, EngineEvent, EngineHandle, FetchRequest, RequestId};
pub use fetch::{validate_url, Accept, FetchSettings, Fetcher, ReqwestFetcher, BROWSER_USER_AGENT};
pub use filename::{
    choose_candidate, generate_filename, generate_filename_on, FilenameCandidate, FilenameTier,
};
pub use frontmatter::{build_posting_document, format_fetched};
pub use hostname::extract_clean_hostname;
pub use identifier::{is_hex_string, is_numeric, is_uuid, looks_like_id, MIN_HEX_ID_LEN};
pub use normalize::{clean_html, clean_text};
pub use persist::{ensure_output_dir, write_file_atomic, AtomicFileWriter, PersistError};
pub use posting_doc::{body_preview, parse_posting_document, read_posting_document, PostingDocument};
pub use strategy::{Page, SiteStrategy, StrategyRegistry};
pub use text::{ensure_md_extension, sanitize_filename};
pub use types::{
    CvResult, Extraction, FailureKind, FetchError, FetchMetadata, FetchOutcome, FetchOutput,
    FetchResult, FetchType,
};
pub use tokio_util::sync::CancellationToken;
