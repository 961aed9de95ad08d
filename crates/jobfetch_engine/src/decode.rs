use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use engine_logging::engine_warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    pub encoding_label: String,
}

/// Decode a response body into UTF-8 using: BOM -> Content-Type charset -> chardetng guess.
///
/// Malformed sequences become U+FFFD rather than failing the fetch; a page with
/// a few bad bytes still carries a usable title and body.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedBody {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, encoding);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(bytes, UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(['"', '\'']);
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedBody {
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        engine_warn!(
            "Body contained malformed {} sequences; replaced with U+FFFD",
            actual.name()
        );
    }
    DecodedBody {
        text: text.into_owned(),
        encoding_label: actual.name().to_string(),
    }
}
