use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// The social meta tags every strategy falls back to. Values are escaped so
/// they read back unchanged when cleaned as HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGraph {
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub description: Option<String>,
}

impl OpenGraph {
    pub fn from_document(doc: &Html) -> Self {
        Self {
            title: meta_content(doc, "og:title"),
            site_name: meta_content(doc, "og:site_name"),
            description: meta_content(doc, "og:description"),
        }
    }
}

/// `content` of `<meta property=..>` (or `name=..`), escaped, if non-empty.
pub(crate) fn meta_content(doc: &Html, property: &str) -> Option<String> {
    let css = format!(r#"meta[property="{property}"], meta[name="{property}"]"#);
    let selector = Selector::parse(&css).ok()?;
    doc.select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(collapse_whitespace)
        .find(|content| !content.is_empty())
        .map(|content| escape_text(&content))
}

/// Text of the first element matching any of `selectors` (tried in order),
/// escaped like [`meta_content`].
pub(crate) fn select_text(doc: &Html, selectors: &[&str]) -> Option<String> {
    first_match(doc, selectors, |element| {
        Some(escape_text(&collapse_whitespace(&element.text().collect::<String>())))
    })
}

/// Attribute value of the first element matching any of `selectors`, escaped.
pub(crate) fn select_attr(doc: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    first_match(doc, selectors, |element| {
        element
            .value()
            .attr(attr)
            .map(|value| escape_text(&collapse_whitespace(value)))
    })
}

/// Inner HTML of every element matched by the first selector that matches
/// anything, joined in document order.
pub(crate) fn select_html(doc: &Html, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        let parts: Vec<String> = doc
            .select(&selector)
            .map(|element| element.inner_html())
            .filter(|html| !html.trim().is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join("\n"))
    })
}

/// `<title>` text.
pub(crate) fn document_title(doc: &Html) -> Option<String> {
    select_text(doc, &["head > title", "title"])
}

/// Raw text of the first `<script>` matching `selector`.
pub(crate) fn script_text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    doc.select(&selector)
        .map(|script| script.text().collect::<String>())
        .find(|text| !text.trim().is_empty())
}

/// The first schema.org `JobPosting` object in any JSON-LD block.
pub(crate) fn json_ld_job_posting(doc: &Html) -> Option<Value> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
    doc.select(&selector)
        .filter_map(|script| serde_json::from_str::<Value>(&script.text().collect::<String>()).ok())
        .find_map(find_job_posting)
}

fn find_job_posting(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().find_map(find_job_posting),
        Value::Object(mut map) => {
            if is_job_posting_type(map.get("@type")) {
                return Some(Value::Object(map));
            }
            map.remove("@graph").and_then(find_job_posting)
        }
        _ => None,
    }
}

fn is_job_posting_type(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(kind)) => kind == "JobPosting",
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some("JobPosting")),
        _ => false,
    }
}

/// A JSON value that is a non-empty string, trimmed.
pub(crate) fn json_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parser output is already decoded; only the spacing is normalized here.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain text made safe to embed in an HTML fragment.
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn first_match<F>(doc: &Html, selectors: &[&str], mut pick: F) -> Option<String>
where
    F: FnMut(ElementRef<'_>) -> Option<String>,
{
    selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        doc.select(&selector)
            .filter_map(&mut pick)
            .find(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <title> Careers | Acme </title>
        <meta property="og:title" content=" Data Engineer ">
        <meta property="og:site_name" content="Acme">
        <meta name="og:description" content="Join us.">
        <script type="application/ld+json">{"@context":"https://schema.org","@graph":[
            {"@type":"Organization","name":"Acme"},
            {"@type":"JobPosting","title":"Data Engineer"}]}</script>
        </head><body>
        <div class="desc"><p>One</p></div><div class="desc"><p>Two</p></div>
        <div class="empty">   </div>
        </body></html>"#;

    #[test]
    fn open_graph_tags_are_read_by_property_or_name() {
        let doc = Html::parse_document(PAGE);
        let og = OpenGraph::from_document(&doc);
        assert_eq!(og.title.as_deref(), Some("Data Engineer"));
        assert_eq!(og.site_name.as_deref(), Some("Acme"));
        assert_eq!(og.description.as_deref(), Some("Join us."));
    }

    #[test]
    fn selectors_are_tried_in_order_and_blank_matches_skipped() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(select_html(&doc, &[".empty", ".missing"]), None);
        assert_eq!(
            select_html(&doc, &[".missing", ".desc"]).as_deref(),
            Some("<p>One</p>\n<p>Two</p>")
        );
        assert_eq!(document_title(&doc).as_deref(), Some("Careers | Acme"));
    }

    #[test]
    fn decoded_text_comes_back_escaped() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:title" content="Lead &lt;Infra&gt; &amp; Ops">
            </head><body><h2> Engineer &lt;Backend
            Team&gt; </h2><img alt="R&amp;D"></body></html>"#,
        );
        assert_eq!(
            OpenGraph::from_document(&doc).title.as_deref(),
            Some("Lead &lt;Infra&gt; &amp; Ops")
        );
        assert_eq!(
            select_text(&doc, &["h2"]).as_deref(),
            Some("Engineer &lt;Backend Team&gt;")
        );
        assert_eq!(select_attr(&doc, &["img"], "alt").as_deref(), Some("R&amp;D"));
    }

    #[test]
    fn json_ld_job_posting_is_found_inside_graph() {
        let doc = Html::parse_document(PAGE);
        let posting = json_ld_job_posting(&doc).unwrap();
        assert_eq!(json_string(posting.get("title")).as_deref(), Some("Data Engineer"));
    }
}
