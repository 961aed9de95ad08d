use chrono::{Local, NaiveDate};
use engine_logging::engine_debug;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::hostname::extract_clean_hostname;
use crate::identifier::looks_like_id;
use crate::text::sanitize_filename;

const POSTING_SUFFIX: &str = "posting";
const UNKNOWN_HOST: &str = "unknown";
/// Descriptive part of a name, before `-posting` and the extension.
const MAX_SLUG_BYTES: usize = 150;

/// Which rule of the naming cascade produced a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilenameTier {
    OrganizationAndTitle,
    TitleAtHost,
    PathSegment,
    HostAndDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameCandidate {
    pub text: String,
    pub tier: FilenameTier,
}

/// Descriptive slug for a job posting, without extension.
pub fn generate_filename(organization: &str, title: &str, url: &str) -> String {
    generate_filename_on(organization, title, url, Local::now().date_naive())
}

/// [`generate_filename`] with an explicit date for the host+date fallback.
pub fn generate_filename_on(organization: &str, title: &str, url: &str, date: NaiveDate) -> String {
    let candidate = choose_candidate(organization, title, url, date);
    engine_debug!("Filename {:?} from tier {:?}", candidate.text, candidate.tier);
    candidate.text
}

/// Run the cascade. The applicable tier wins when its slug carries a meaningful
/// token; otherwise the host+date fallback is used.
pub fn choose_candidate(
    organization: &str,
    title: &str,
    url: &str,
    date: NaiveDate,
) -> FilenameCandidate {
    let organization = organization.trim();
    let title = title.trim();
    let parsed = Url::parse(url.trim()).ok();
    let host = parsed
        .as_ref()
        .and_then(|u| u.host_str())
        .map(extract_clean_hostname)
        .map(|h| sanitize_filename(&h))
        .unwrap_or_default();

    let title_slug = sanitize_filename(title);
    // (descriptive part, tier, full text). Only the descriptive part is judged,
    // so "-at-<host>" cannot rescue an identifier-only title.
    let attempt = if !organization.is_empty() && !title.is_empty() {
        let descriptive = join_slug(&[&sanitize_filename(organization), &title_slug]);
        Some((descriptive.clone(), FilenameTier::OrganizationAndTitle, descriptive))
    } else if organization.is_empty() && !title.is_empty() && !host.is_empty() {
        let text = join_slug(&[&title_slug, "at", &host]);
        Some((title_slug, FilenameTier::TitleAtHost, text))
    } else if organization.is_empty() && title.is_empty() && !host.is_empty() {
        parsed
            .as_ref()
            .and_then(last_path_segment)
            .filter(|segment| !looks_like_id(segment))
            .map(|segment| {
                let slug = sanitize_filename(&segment);
                (slug.clone(), FilenameTier::PathSegment, slug)
            })
    } else {
        None
    };

    if let Some((descriptive, tier, text)) = attempt {
        if is_meaningful(&descriptive) {
            return FilenameCandidate {
                text: format!("{}-{POSTING_SUFFIX}", truncate_slug(&text)),
                tier,
            };
        }
    }

    let host = if host.is_empty() { UNKNOWN_HOST } else { host.as_str() };
    FilenameCandidate {
        text: format!("{host}-{}-{POSTING_SUFFIX}", date.format("%Y-%m-%d")),
        tier: FilenameTier::HostAndDate,
    }
}

/// A slug is usable when it is not an identifier as a whole and at least one
/// of its hyphen-separated tokens is not one either.
fn is_meaningful(slug: &str) -> bool {
    !slug.is_empty()
        && !looks_like_id(slug)
        && slug
            .split('-')
            .any(|token| !token.is_empty() && !looks_like_id(token))
}

fn join_slug(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("-")
}

/// Cut on a char boundary so long titles stay within file name limits.
fn truncate_slug(slug: &str) -> &str {
    if slug.len() <= MAX_SLUG_BYTES {
        return slug;
    }
    let mut end = MAX_SLUG_BYTES;
    while !slug.is_char_boundary(end) {
        end -= 1;
    }
    slug[..end].trim_end_matches('-')
}

fn last_path_segment(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.rev().find(|segment| !segment.is_empty())?;
    let segment = percent_decode_str(segment).decode_utf8_lossy();
    let stem = segment
        .rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && matches!(*ext, "html" | "htm" | "php" | "aspx"))
        .map_or(&*segment, |(stem, _)| stem);
    Some(stem.to_string())
}
