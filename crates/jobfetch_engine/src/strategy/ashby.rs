use serde_json::Value;

use super::dom::{escape_text, json_ld_job_posting, json_string};
use super::{first_non_empty, Page, SiteStrategy};
use crate::Extraction;

/// `jobs.ashbyhq.com` pages, which render client side but embed a
/// schema.org `JobPosting`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AshbyStrategy;

impl SiteStrategy for AshbyStrategy {
    fn name(&self) -> &'static str {
        "ashby"
    }

    fn matches(&self, host: &str) -> bool {
        host.contains("ashbyhq.com")
    }

    fn extract(&self, page: &Page) -> Extraction {
        let og = page.open_graph();
        let posting = json_ld_job_posting(&page.document);
        let posting = posting.as_ref();

        let title = posting
            .and_then(|p| json_string(p.get("title")))
            .map(|title| escape_text(&title));
        let organization = posting
            .and_then(|p| json_string(p.get("hiringOrganization").and_then(|org| org.get("name"))))
            .map(|org| escape_text(&org));
        let content = posting.and_then(posting_body);

        Extraction {
            title: first_non_empty([title, og.title]),
            organization: first_non_empty([organization, og.site_name]),
            content: first_non_empty([content, og.description]),
        }
    }
}

fn posting_body(posting: &Value) -> Option<String> {
    let description = json_string(posting.get("description")).map(|d| unescape_markup(&d));
    let employment = employment_type(posting.get("employmentType"));
    match (description, employment) {
        (None, None) => None,
        (description, employment) => {
            let mut body = description.unwrap_or_default();
            if let Some(kind) = employment {
                body.push_str(&format!(
                    "\n<p><strong>Employment Type:</strong> {}</p>",
                    escape_text(&kind)
                ));
            }
            Some(body)
        }
    }
}

fn employment_type(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(kind) => Some(kind.trim().to_string()).filter(|k| !k.is_empty()),
        Value::Array(kinds) => {
            let kinds: Vec<&str> = kinds
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .collect();
            (!kinds.is_empty()).then(|| kinds.join(", "))
        }
        _ => None,
    }
}

/// Some boards double-encode the description. Undo one level when the text
/// carries escaped tags and no real ones.
fn unescape_markup(description: &str) -> String {
    if description.contains('<') || !description.contains("&lt;") {
        return description.to_string();
    }
    description
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(json_ld: &str) -> Page {
        Page::parse(
            "https://jobs.ashbyhq.com/acme/5f1c",
            "jobs.ashbyhq.com",
            &format!(
                r#"<html><head><meta property="og:title" content="OG Title">
                   <script type="application/ld+json">{json_ld}</script></head>
                   <body><div id="root"></div></body></html>"#
            ),
        )
    }

    #[test]
    fn job_posting_fields_are_read() {
        let extraction = AshbyStrategy.extract(&page(
            r#"{"@type":"JobPosting","title":"ML Engineer",
                "hiringOrganization":{"@type":"Organization","name":"Acme"},
                "description":"<p>Train models.</p>","employmentType":"FullTime"}"#,
        ));
        assert_eq!(extraction.title, "ML Engineer");
        assert_eq!(extraction.organization, "Acme");
        assert_eq!(
            extraction.content,
            "<p>Train models.</p>\n<p><strong>Employment Type:</strong> FullTime</p>"
        );
    }

    #[test]
    fn escaped_description_is_unescaped_once() {
        let extraction = AshbyStrategy.extract(&page(
            r#"{"@type":"JobPosting","title":"ML Engineer",
                "description":"&lt;p&gt;R&amp;amp;D&lt;/p&gt;"}"#,
        ));
        assert_eq!(extraction.content, "<p>R&amp;D</p>");
    }

    #[test]
    fn missing_json_ld_falls_back_to_open_graph() {
        let extraction = AshbyStrategy.extract(&page("not json"));
        assert_eq!(extraction.title, "OG Title");
        assert_eq!(extraction.content, "");
    }
}
