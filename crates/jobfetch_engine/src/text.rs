//! Slugging shared by the posting and CV paths.

/// Characters that are unsafe in file names or just noise in a slug.
const SLUG_DENYLIST: &[char] = &[
    '/', '\\', ':', '*', '?', '"', '<', '>', '|', '\'', ',', '.', '(', ')', '&', '@', '#', '$',
    '%', '^', '+', '=', '[', ']', '{', '}',
];

/// Lowercased, hyphen-separated, filesystem-safe slug of `input`.
///
/// Never fails; input made only of punctuation yields an empty string.
pub fn sanitize_filename(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut prev_hyphen = false;
    for c in lowered.chars() {
        let c = if c == ' ' { '-' } else { c };
        if SLUG_DENYLIST.contains(&c) {
            continue;
        }
        if c == '-' {
            if !prev_hyphen {
                slug.push('-');
            }
            prev_hyphen = true;
        } else {
            slug.push(c);
            prev_hyphen = false;
        }
    }
    slug.trim_matches('-').to_string()
}

/// Append `.md` unless the name already carries it.
pub fn ensure_md_extension(name: &str) -> String {
    if name.ends_with(".md") {
        name.to_string()
    } else {
        format!("{name}.md")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_drops_punctuation_and_lowercases() {
        assert_eq!(sanitize_filename("Sr. Engineer (Remote)"), "sr-engineer-remote");
        assert_eq!(sanitize_filename("R&D @ Acme, Inc."), "rd-acme-inc");
    }

    #[test]
    fn slug_collapses_and_trims_hyphens() {
        assert_eq!(sanitize_filename("Test--Name"), "test-name");
        assert_eq!(sanitize_filename("  leading and trailing  "), "leading-and-trailing");
        assert_eq!(sanitize_filename("a - b"), "a-b");
    }

    #[test]
    fn slug_of_punctuation_is_empty() {
        assert_eq!(sanitize_filename("(...)"), "");
        assert_eq!(sanitize_filename(""), "");
    }

    #[test]
    fn md_extension_is_added_once() {
        assert_eq!(ensure_md_extension("acme-posting"), "acme-posting.md");
        assert_eq!(ensure_md_extension("acme-posting.md"), "acme-posting.md");
    }
}
