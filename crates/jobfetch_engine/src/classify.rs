use url::Url;

use crate::FetchType;

const CV_FILE_SUFFIX: &str = "/cv.json";

/// Decide whether `input` points at a CV document or a job posting.
///
/// Bare domains and paths ending in `/cv.json` are CVs; everything else,
/// including input that does not parse as a URL, is treated as a posting.
pub fn detect_fetch_type(input: &str) -> FetchType {
    let Some(url) = parse_lenient(input) else {
        return FetchType::JobPosting;
    };

    let path = url.path().trim_end_matches('/');
    if path.is_empty() || path.ends_with(CV_FILE_SUFFIX) {
        return FetchType::Cv;
    }
    FetchType::JobPosting
}

/// Parse `input` as a URL, assuming `https://` when no scheme is given.
pub(crate) fn parse_lenient(input: &str) -> Option<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Url::parse(&with_default_scheme(trimmed)).ok()
}

pub(crate) fn with_default_scheme(input: &str) -> String {
    if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domains_are_cvs() {
        assert_eq!(detect_fetch_type("cello.design"), FetchType::Cv);
        assert_eq!(detect_fetch_type("cello.design/"), FetchType::Cv);
        assert_eq!(detect_fetch_type("https://cello.design"), FetchType::Cv);
    }

    #[test]
    fn cv_json_paths_are_cvs() {
        assert_eq!(detect_fetch_type("https://x.com/cv.json"), FetchType::Cv);
        assert_eq!(detect_fetch_type("x.com/people/me/cv.json/"), FetchType::Cv);
    }

    #[test]
    fn posting_paths_are_postings() {
        assert_eq!(
            detect_fetch_type("https://jobs.lever.co/acme/123"),
            FetchType::JobPosting
        );
        assert_eq!(
            detect_fetch_type("https://x.com/notcv.json"),
            FetchType::JobPosting
        );
    }

    #[test]
    fn unparseable_input_defaults_to_posting() {
        assert_eq!(detect_fetch_type(""), FetchType::JobPosting);
        assert_eq!(detect_fetch_type("http://[::1"), FetchType::JobPosting);
    }
}
