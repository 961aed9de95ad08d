use super::dom::{select_html, select_text};
use super::{first_non_empty, Page, SiteStrategy};
use crate::Extraction;

/// Workday career sites (`*.myworkdayjobs.com`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkdayStrategy;

impl SiteStrategy for WorkdayStrategy {
    fn name(&self) -> &'static str {
        "workday"
    }

    fn matches(&self, host: &str) -> bool {
        host.contains("myworkdayjobs.com") || host.contains("workday.com")
    }

    fn extract(&self, page: &Page) -> Extraction {
        let doc = &page.document;
        let og = page.open_graph();
        Extraction {
            title: first_non_empty([
                select_text(doc, &[r#"[data-automation-id="jobPostingHeader"]"#]),
                og.title,
            ]),
            organization: first_non_empty([og.site_name]),
            content: first_non_empty([
                select_html(doc, &[r#"[data-automation-id="jobPostingDescription"]"#]),
                og.description,
            ]),
        }
    }
}
