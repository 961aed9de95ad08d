//! Shape checks for opaque machine-generated identifiers.
//!
//! These only ever look at tokens cut from URL paths or generated slugs, so a
//! short hex-legal word like `cafe` is never at risk: hex strings count as
//! identifiers from [`MIN_HEX_ID_LEN`] characters on.

/// Shortest run of hex digits treated as an identifier.
pub const MIN_HEX_ID_LEN: usize = 12;

/// True for numeric strings, UUIDs and long hex strings.
pub fn looks_like_id(token: &str) -> bool {
    let token = token.trim();
    if token.is_empty() {
        return false;
    }
    is_numeric(token) || is_uuid(token) || (token.len() >= MIN_HEX_ID_LEN && is_hex_string(token))
}

/// Non-empty and all ASCII digits.
pub fn is_numeric(token: &str) -> bool {
    let token = token.trim();
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Non-empty and all ASCII hex digits.
pub fn is_hex_string(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_hexdigit())
}

/// 32 hex digits, either contiguous or grouped 8-4-4-4-12.
pub fn is_uuid(token: &str) -> bool {
    let token = token.trim();
    match token.len() {
        32 => is_hex_string(token),
        36 => {
            let groups: Vec<&str> = token.split('-').collect();
            groups.len() == 5
                && groups
                    .iter()
                    .zip([8, 4, 4, 4, 12])
                    .all(|(group, len)| group.len() == len && is_hex_string(group))
        }
        _ => false,
    }
}
