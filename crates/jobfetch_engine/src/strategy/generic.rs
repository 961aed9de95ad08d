use super::dom::{document_title, select_html};
use super::{first_non_empty, Page, SiteStrategy};
use crate::Extraction;

const CONTENT_SELECTORS: &[&str] = &[".job-description", "#job-description", "article", "main"];

/// Fallback for hosts no other strategy claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

impl SiteStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn matches(&self, _host: &str) -> bool {
        true
    }

    fn extract(&self, page: &Page) -> Extraction {
        let og = page.open_graph();
        Extraction {
            title: first_non_empty([og.title, document_title(&page.document)]),
            organization: first_non_empty([og.site_name]),
            content: first_non_empty([
                og.description,
                select_html(&page.document, CONTENT_SELECTORS),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_graph_wins_over_document_markup() {
        let page = Page::parse(
            "https://example.com/jobs/1",
            "example.com",
            r#"<html><head><title>Ignored</title>
               <meta property="og:title" content="Data Engineer">
               <meta property="og:description" content="Short pitch.">
               </head><body><main><p>Long body</p></main></body></html>"#,
        );
        let extraction = GenericStrategy.extract(&page);
        assert_eq!(extraction.title, "Data Engineer");
        assert_eq!(extraction.organization, "");
        assert_eq!(extraction.content, "Short pitch.");
    }

    #[test]
    fn document_markup_fills_missing_tags() {
        let page = Page::parse(
            "https://example.com/jobs/1",
            "example.com",
            r#"<html><head><title>Platform Lead</title></head>
               <body><article><h2>About</h2><p>Body</p></article></body></html>"#,
        );
        let extraction = GenericStrategy.extract(&page);
        assert_eq!(extraction.title, "Platform Lead");
        assert_eq!(extraction.content, "<h2>About</h2><p>Body</p>");
    }
}
