//! HTML to Markdown normalization.
//!
//! The fragment is parsed with html5ever (through `scraper`) and walked once.
//! Structural tags map to Markdown markers, everything else is reduced to its
//! text, and a final pass tidies whitespace. Running [`clean_html`] on its own
//! output returns it unchanged.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Entity names the HTML parser still decodes when the trailing `;` is missing.
const LEGACY_ENTITY_NAMES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg",
    "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt",
    "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Convert an HTML fragment into normalized Markdown text.
pub fn clean_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    for child in fragment.root_element().children() {
        visit_node(child, &mut out);
    }
    escape_markup(&tidy_whitespace(&out))
}

/// Plain text of an HTML snippet: tags stripped, entities decoded, whitespace
/// collapsed. Used for titles and organization names.
pub fn clean_text(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(input);
    let mut text = String::with_capacity(input.len());
    collect_text(*fragment.root_element(), &mut text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if !is_skipped(element.name()) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

fn visit_node(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => append_text(text, out),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                visit_element(element, out);
            }
        }
        _ => {
            for child in node.children() {
                visit_node(child, out);
            }
        }
    }
}

fn visit_element(element: ElementRef<'_>, out: &mut String) {
    let tag = element.value().name().to_ascii_lowercase();
    match tag.as_str() {
        "script" | "style" => {}
        "h1" | "h2" | "h3" | "h4" => {
            let level = usize::from(tag.as_bytes()[1] - b'0');
            out.push('\n');
            out.push_str(&"#".repeat(level));
            out.push(' ');
            visit_children(element, out);
            out.push('\n');
        }
        "li" => {
            out.push_str("\n- ");
            visit_children(element, out);
        }
        "p" => {
            out.push_str("\n\n");
            visit_children(element, out);
            out.push('\n');
        }
        "br" => out.push('\n'),
        "hr" => out.push_str("\n---\n"),
        "strong" | "b" => wrap_children(element, "**", out),
        "em" | "i" => wrap_children(element, "*", out),
        _ => visit_children(element, out),
    }
}

fn visit_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        visit_node(child, out);
    }
}

fn wrap_children(element: ElementRef<'_>, marker: &str, out: &mut String) {
    out.push_str(marker);
    visit_children(element, out);
    out.push_str(marker);
}

fn is_skipped(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("script") || tag.eq_ignore_ascii_case("style")
}

fn append_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '\u{a0}' | '\u{0c}' => out.push(' '),
            // A leading U+FEFF is eaten as a byte order mark on reparse.
            '\r' | '\u{feff}' => {}
            _ => out.push(c),
        }
    }
}

/// Re-escape only what a second parse would read as a tag or an entity.
///
/// Runs over the assembled text so that a `<` ending one text node and a
/// letter starting the next are still caught.
fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, c) in text.char_indices() {
        let rest = &text[idx + c.len_utf8()..];
        match c {
            '<' if starts_markup(rest) => out.push_str("&lt;"),
            '&' if starts_entity(rest) => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

fn starts_markup(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

fn starts_entity(rest: &str) -> bool {
    if let Some(numeric) = rest.strip_prefix('#') {
        return numeric
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == 'x' || c == 'X');
    }
    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return false;
    }
    rest[name_len..].starts_with(';')
        || LEGACY_ENTITY_NAMES
            .iter()
            .any(|name| rest.starts_with(name))
}

/// Collapse space/tab runs, trim every line, keep at most one blank line in a
/// row and trim the whole result.
fn tidy_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;
    for line in raw.split('\n') {
        let line = collapse_spaces(line);
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(&line);
        out.push('\n');
    }
    out.trim().to_string()
}

fn collapse_spaces(line: &str) -> String {
    let mut collapsed = String::with_capacity(line.len());
    let mut pending_space = false;
    for c in line.chars() {
        if c == ' ' || c == '\t' {
            pending_space = !collapsed.is_empty();
        } else {
            if pending_space {
                collapsed.push(' ');
                pending_space = false;
            }
            collapsed.push(c);
        }
    }
    collapsed
}
