use chrono::{DateTime, TimeZone};

/// Second-precision local timestamp used in the `fetched:` field.
pub fn format_fetched<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Assemble the posting document: front matter, heading, company line, body.
pub fn build_posting_document(
    url: &str,
    fetched: &str,
    organization: &str,
    title: &str,
    body_markdown: &str,
) -> String {
    let mut frontmatter = format!("---\nsource: {url}\nfetched: {fetched}\n");
    if !organization.is_empty() {
        frontmatter.push_str(&format!("company: {organization}\n"));
    }
    if !title.is_empty() {
        frontmatter.push_str(&format!("position: {title}\n"));
    }
    frontmatter.push_str("---\n\n");

    let mut doc = frontmatter;
    if !title.is_empty() {
        doc.push_str(&format!("# {title}\n\n"));
    }
    if !organization.is_empty() {
        doc.push_str(&format!("**Company:** {organization}\n\n"));
    }
    doc.push_str("## Job Description\n\n");
    doc.push_str(body_markdown.trim());
    doc.push('\n');
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use pretty_assertions::assert_eq;

    #[test]
    fn full_document_layout() {
        let doc = build_posting_document(
            "https://jobs.lever.co/acme/1",
            "2024-03-09 14:05:00",
            "Acme",
            "Software Engineer",
            "## About\n\nBuild things.",
        );
        assert_eq!(
            doc,
            "---\nsource: https://jobs.lever.co/acme/1\nfetched: 2024-03-09 14:05:00\n\
             company: Acme\nposition: Software Engineer\n---\n\n\
             # Software Engineer\n\n**Company:** Acme\n\n## Job Description\n\n\
             ## About\n\nBuild things.\n"
        );
    }

    #[test]
    fn missing_fields_are_omitted() {
        let doc = build_posting_document("https://x.io/j", "2024-03-09 14:05:00", "", "", "");
        assert_eq!(
            doc,
            "---\nsource: https://x.io/j\nfetched: 2024-03-09 14:05:00\n---\n\n## Job Description\n\n\n"
        );
        assert!(!doc.contains("company:"));
        assert!(!doc.contains("**Company:**"));
    }

    #[test]
    fn fetched_has_second_precision() {
        let at = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .unwrap();
        assert_eq!(format_fetched(&at), "2024-03-09 14:05:07");
    }
}
