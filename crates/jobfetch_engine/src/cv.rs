use serde_json::Value;

use crate::classify::with_default_scheme;
use crate::{FailureKind, FetchError};

const CV_FILE: &str = "cv.json";

/// `<base>/cv.json` for a domain or URL; inputs already ending in `cv.json`
/// are kept as they are.
pub fn resolve_cv_url(domain_or_url: &str) -> String {
    let base = with_default_scheme(domain_or_url.trim());
    let base = base.trim_end_matches('/');
    if base.ends_with(&format!("/{CV_FILE}")) {
        base.to_string()
    } else {
        format!("{base}/{CV_FILE}")
    }
}

/// A CV body that parsed as JSON, with its pretty-printed form.
#[derive(Debug, Clone, PartialEq)]
pub struct CvDocument {
    pub value: Value,
    pub pretty: String,
}

impl CvDocument {
    pub fn name(&self) -> String {
        lookup_str(&self.value, &["basics", "name"])
    }

    pub fn label(&self) -> String {
        lookup_str(&self.value, &["basics", "label"])
    }
}

/// Parse a CV body. Anything that is not JSON is a validation error.
pub fn parse_cv(body: &str) -> Result<CvDocument, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        FetchError::new(
            FailureKind::Validation,
            format!("cv.json is not valid JSON: {err}"),
        )
    })?;
    let mut pretty = serde_json::to_string_pretty(&value)
        .map_err(|err| FetchError::new(FailureKind::Validation, err.to_string()))?;
    pretty.push('\n');
    Ok(CvDocument { value, pretty })
}

/// Follow `path` through nested objects.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// String at `path`, or empty when missing or not a string.
pub fn lookup_str(value: &Value, path: &[&str]) -> String {
    lookup(value, path)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cv_url_is_appended_once() {
        assert_eq!(resolve_cv_url("cello.design"), "https://cello.design/cv.json");
        assert_eq!(resolve_cv_url("cello.design/"), "https://cello.design/cv.json");
        assert_eq!(resolve_cv_url("http://me.dev/cv.json"), "http://me.dev/cv.json");
        assert_eq!(
            resolve_cv_url("https://me.dev/people/ana/"),
            "https://me.dev/people/ana/cv.json"
        );
    }

    #[test]
    fn valid_cv_is_pretty_printed_with_basics() {
        let cv = parse_cv(r#"{"basics":{"name":"Ana Lima","label":"Designer"}}"#).unwrap();
        assert_eq!(cv.name(), "Ana Lima");
        assert_eq!(cv.label(), "Designer");
        assert!(cv.pretty.contains("\n  \"basics\": {"));
        assert!(cv.pretty.ends_with("}\n"));
    }

    #[test]
    fn invalid_json_is_a_validation_error() {
        let err = parse_cv("<html>not json</html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::Validation);
    }

    #[test]
    fn nested_lookup_tolerates_missing_keys() {
        let value = json!({"basics": {"name": 42}});
        assert_eq!(lookup_str(&value, &["basics", "name"]), "");
        assert_eq!(lookup_str(&value, &["basics", "label"]), "");
        assert!(lookup(&value, &["basics"]).is_some());
        assert!(lookup(&value, &["nope", "name"]).is_none());
    }
}
