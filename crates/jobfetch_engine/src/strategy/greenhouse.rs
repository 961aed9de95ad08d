use super::dom::{select_html, select_text};
use super::{first_non_empty, Page, SiteStrategy};
use crate::Extraction;

/// Classic `boards.greenhouse.io` and newer `job-boards.greenhouse.io` layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreenhouseStrategy;

impl SiteStrategy for GreenhouseStrategy {
    fn name(&self) -> &'static str {
        "greenhouse"
    }

    fn matches(&self, host: &str) -> bool {
        host.contains("greenhouse.io")
    }

    fn extract(&self, page: &Page) -> Extraction {
        let doc = &page.document;
        let og = page.open_graph();
        let company = select_text(doc, &[".company-name"]).map(|name| strip_at(&name).to_string());
        Extraction {
            title: first_non_empty([select_text(doc, &["h1.app-title", ".job__title h1"]), og.title]),
            organization: first_non_empty([company, og.site_name]),
            content: first_non_empty([
                select_html(doc, &["#content", ".job__description"]),
                og.description,
            ]),
        }
    }
}

fn strip_at(name: &str) -> &str {
    let trimmed = name.trim();
    match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("at ") => trimmed[3..].trim_start(),
        _ => trimmed,
    }
}
