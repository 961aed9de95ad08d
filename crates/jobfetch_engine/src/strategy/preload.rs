use engine_logging::engine_debug;
use serde_json::{Map, Value};

use super::dom::{escape_text, json_string, script_text};
use super::{first_non_empty, Page, SiteStrategy};
use crate::cv::lookup;
use crate::identifier::is_numeric;
use crate::Extraction;

const OBJECT_PATHS: &[&[&str]] = &[
    &["props", "pageProps", "job"],
    &["props", "pageProps", "jobDetail"],
    &["props", "pageProps", "data"],
    &["props", "pageProps"],
];
const TITLE_KEYS: &[&str] = &["title", "jobTitle", "name", "positionTitle"];
const BODY_KEYS: &[&str] = &["description", "jobDescription", "fullDescription", "summary"];
const COMPANY_KEYS: &[&str] = &["company", "companyName", "organization"];
const LOCATION_KEYS: &[&str] = &["location", "primaryLocation"];
const MIN_TITLE_LEN: usize = 3;

/// Career sites that ship the whole posting as a JSON blob in a tagged
/// `<script>` (Next.js `__NEXT_DATA__` by default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadJsonStrategy {
    /// Substrings of the host this strategy claims.
    pub host_markers: Vec<String>,
    /// Organization used when the blob names none.
    pub brand: String,
    pub script_id: String,
}

impl Default for PreloadJsonStrategy {
    fn default() -> Self {
        Self {
            host_markers: vec!["careers.microsoft.com".to_string()],
            brand: "Microsoft".to_string(),
            script_id: "__NEXT_DATA__".to_string(),
        }
    }
}

impl SiteStrategy for PreloadJsonStrategy {
    fn name(&self) -> &'static str {
        "preload-json"
    }

    fn matches(&self, host: &str) -> bool {
        self.host_markers
            .iter()
            .any(|marker| host.contains(&marker.to_ascii_lowercase()))
    }

    fn extract(&self, page: &Page) -> Extraction {
        let og = page.open_graph();
        let found = self.preloaded_fields(page).unwrap_or_default();

        let title = Some(found.title).filter(|t| is_plausible_title(t));
        let organization = match found.organization {
            Some(org) if !is_numeric(&org) => org,
            _ => self.brand.clone(),
        };

        Extraction {
            title: first_non_empty([title, og.title]),
            organization: first_non_empty([Some(organization), og.site_name]),
            content: first_non_empty([Some(found.content), og.description]),
        }
    }
}

#[derive(Debug, Default)]
struct Preloaded {
    title: String,
    organization: Option<String>,
    content: String,
}

impl PreloadJsonStrategy {
    fn preloaded_fields(&self, page: &Page) -> Option<Preloaded> {
        let css = format!(r#"script[id="{}"]"#, self.script_id);
        let raw = script_text(&page.document, &css)?;
        let root: Value = match serde_json::from_str(&raw) {
            Ok(root) => root,
            Err(err) => {
                engine_debug!("Preload JSON on {} did not parse: {}", page.url, err);
                return None;
            }
        };

        OBJECT_PATHS
            .iter()
            .filter_map(|path| lookup(&root, path).and_then(Value::as_object))
            .map(fields_from)
            .find(|found| {
                !found.title.is_empty() || !found.content.is_empty() || found.organization.is_some()
            })
    }
}

fn fields_from(job: &Map<String, Value>) -> Preloaded {
    let title = first_key(job, TITLE_KEYS)
        .map(|title| escape_text(&title))
        .unwrap_or_default();
    let organization = COMPANY_KEYS
        .iter()
        .find_map(|key| match job.get(*key) {
            Some(Value::Object(company)) => json_string(company.get("name")),
            other => json_string(other),
        })
        .map(|org| escape_text(&org));

    let mut content = first_key(job, BODY_KEYS).unwrap_or_default();
    for (key, heading) in [("qualifications", "Qualifications"), ("responsibilities", "Responsibilities")] {
        if let Some(section) = job.get(key).and_then(section_text) {
            content.push_str(&format!("\n\n## {heading}\n\n{section}"));
        }
    }
    if let Some(location) = LOCATION_KEYS
        .iter()
        .find_map(|key| job.get(*key).and_then(joined_strings))
    {
        content.push_str(&format!("\n\n**Location:** {}", escape_text(&location)));
    }
    if let Some(kind) = job.get("employmentType").and_then(joined_strings) {
        content.push_str(&format!("\n\n**Employment Type:** {}", escape_text(&kind)));
    }

    Preloaded {
        title,
        organization,
        content: content.trim().to_string(),
    }
}

fn first_key(job: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| json_string(job.get(*key)))
}

/// A string is kept as-is; an array of strings becomes a bullet list.
fn section_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        Value::Array(items) => {
            let bullets: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| format!("- {}", escape_text(item)))
                .collect();
            (!bullets.is_empty()).then(|| bullets.join("\n"))
        }
        _ => None,
    }
}

fn joined_strings(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

fn is_plausible_title(title: &str) -> bool {
    title.chars().count() >= MIN_TITLE_LEN && !is_numeric(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(next_data: &str) -> Page {
        Page::parse(
            "https://jobs.careers.microsoft.com/global/en/job/1700001",
            "jobs.careers.microsoft.com",
            &format!(
                r#"<html><head><meta property="og:title" content="Careers at Microsoft">
                   </head><body><div id="__next"></div>
                   <script id="__NEXT_DATA__" type="application/json">{next_data}</script>
                   </body></html>"#
            ),
        )
    }

    #[test]
    fn job_object_is_rendered_with_sections() {
        let extraction = PreloadJsonStrategy::default().extract(&page(
            r#"{"props":{"pageProps":{"job":{
                "title":"Software Engineer II",
                "description":"<p>Build Azure.</p>",
                "qualifications":["Rust"," ","C++ & Go"],
                "responsibilities":"Own services.",
                "primaryLocation":"Redmond, WA",
                "employmentType":"Full-Time"}}}}"#,
        ));
        assert_eq!(extraction.title, "Software Engineer II");
        assert_eq!(extraction.organization, "Microsoft");
        assert_eq!(
            extraction.content,
            "<p>Build Azure.</p>\n\n## Qualifications\n\n- Rust\n- C++ &amp; Go\n\n\
             ## Responsibilities\n\nOwn services.\n\n**Location:** Redmond, WA\n\n\
             **Employment Type:** Full-Time"
        );
    }

    #[test]
    fn later_paths_are_tried_when_earlier_ones_are_empty() {
        let extraction = PreloadJsonStrategy::default().extract(&page(
            r#"{"props":{"pageProps":{"job":{},"jobDetail":{"jobTitle":"Data Scientist",
                "companyName":"LinkedIn"}}}}"#,
        ));
        assert_eq!(extraction.title, "Data Scientist");
        assert_eq!(extraction.organization, "LinkedIn");
    }

    #[test]
    fn implausible_values_are_replaced() {
        let extraction = PreloadJsonStrategy::default().extract(&page(
            r#"{"props":{"pageProps":{"data":{"title":"1700001","company":"12345",
                "summary":"Text"}}}}"#,
        ));
        assert_eq!(extraction.title, "Careers at Microsoft");
        assert_eq!(extraction.organization, "Microsoft");
        assert_eq!(extraction.content, "Text");
    }

    #[test]
    fn unparseable_blob_uses_brand_and_open_graph() {
        let extraction = PreloadJsonStrategy::default().extract(&page("{broken"));
        assert_eq!(extraction.title, "Careers at Microsoft");
        assert_eq!(extraction.organization, "Microsoft");
        assert_eq!(extraction.content, "");
    }

    #[test]
    fn host_markers_are_configurable() {
        let strategy = PreloadJsonStrategy {
            host_markers: vec!["careers.example.org".into()],
            brand: "Example".into(),
            ..PreloadJsonStrategy::default()
        };
        assert!(strategy.matches("jobs.careers.example.org"));
        assert!(!strategy.matches("careers.microsoft.com"));
    }
}
