use super::dom::{select_attr, select_html, select_text};
use super::{first_non_empty, Page, SiteStrategy};
use crate::Extraction;

/// `jobs.lever.co` postings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeverStrategy;

impl SiteStrategy for LeverStrategy {
    fn name(&self) -> &'static str {
        "lever"
    }

    fn matches(&self, host: &str) -> bool {
        host.contains("lever.co")
    }

    fn extract(&self, page: &Page) -> Extraction {
        let doc = &page.document;
        let og = page.open_graph();
        Extraction {
            title: first_non_empty([select_text(doc, &[".posting-headline h2"]), og.title]),
            organization: first_non_empty([
                select_attr(doc, &[".main-header-logo img"], "alt"),
                og.site_name,
            ]),
            content: first_non_empty([
                select_html(
                    doc,
                    &[r#"[data-qa="job-description"]"#, ".section-wrapper.page-full-width"],
                ),
                og.description,
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posting_markers_are_read() {
        let page = Page::parse(
            "https://jobs.lever.co/acme/1",
            "jobs.lever.co",
            r#"<html><head><meta property="og:title" content="OG title"></head><body>
               <div class="main-header-logo"><img alt="Acme Corp" src="logo.png"></div>
               <div class="posting-headline"><h2>Backend Engineer</h2></div>
               <div data-qa="job-description"><p>Ship APIs.</p></div>
               </body></html>"#,
        );
        let extraction = LeverStrategy.extract(&page);
        assert_eq!(extraction.title, "Backend Engineer");
        assert_eq!(extraction.organization, "Acme Corp");
        assert_eq!(extraction.content, "<p>Ship APIs.</p>");
    }

    #[test]
    fn open_graph_fills_missing_markers() {
        let page = Page::parse(
            "https://jobs.lever.co/acme/1",
            "jobs.lever.co",
            r#"<html><head><meta property="og:title" content="Backend Engineer">
               <meta property="og:description" content="Ship APIs."></head><body></body></html>"#,
        );
        let extraction = LeverStrategy.extract(&page);
        assert_eq!(extraction.title, "Backend Engineer");
        assert_eq!(extraction.organization, "");
        assert_eq!(extraction.content, "Ship APIs.");
    }
}
