use super::dom::{select_html, select_text};
use super::{first_non_empty, Page, SiteStrategy};
use crate::Extraction;

const TITLE_SUFFIX: &str = " | LinkedIn";

/// Public LinkedIn job views.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedInStrategy;

impl SiteStrategy for LinkedInStrategy {
    fn name(&self) -> &'static str {
        "linkedin"
    }

    fn matches(&self, host: &str) -> bool {
        host.contains("linkedin.com")
    }

    fn extract(&self, page: &Page) -> Extraction {
        let doc = &page.document;
        let og = page.open_graph();
        let hiring = og.title.as_deref().and_then(split_hiring_title);
        let (og_org, og_title) = match hiring {
            Some((org, title)) => (Some(org), Some(title)),
            None => (None, None),
        };
        Extraction {
            title: first_non_empty([
                select_text(doc, &[".top-card-layout__title", ".topcard__title"]),
                og_title,
                og.title,
            ]),
            organization: first_non_empty([
                select_text(doc, &[".topcard__org-name-link"]),
                og_org,
                og.site_name.filter(|name| name != "LinkedIn"),
            ]),
            content: first_non_empty([
                select_html(doc, &[".show-more-less-html__markup", ".description__text"]),
                og.description,
            ]),
        }
    }
}

/// `"Acme hiring Data Engineer in Berlin, Germany | LinkedIn"` into
/// `("Acme", "Data Engineer")`.
fn split_hiring_title(og_title: &str) -> Option<(String, String)> {
    let text = og_title.trim();
    let text = text.strip_suffix(TITLE_SUFFIX).unwrap_or(text);
    let (org, rest) = text.split_once(" hiring ")?;
    let title = rest.rsplit_once(" in ").map_or(rest, |(title, _)| title);
    let (org, title) = (org.trim(), title.trim());
    (!org.is_empty() && !title.is_empty()).then(|| (org.to_string(), title.to_string()))
}
