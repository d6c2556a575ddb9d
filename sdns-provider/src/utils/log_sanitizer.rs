//! Log sanitization utilities
//!
//! Every request body carries the DDNS key as an attribute, and zone exports
//! can be large. Nothing goes to the log without passing through here.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Attribute that carries the key in request bodies.
const KEY_ATTRIBUTE: &str = "ddnskey=\"";

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret, keeping at most the first two characters.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(2).collect();
    format!("{prefix}****")
}

/// Replace every `ddnskey="..."` value in an XML body with a masked form.
pub fn mask_key_attribute(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find(KEY_ATTRIBUTE) {
        let value_start = start + KEY_ATTRIBUTE.len();
        out.push_str(&rest[..value_start]);
        rest = &rest[value_start..];

        let Some(end) = rest.find('"') else {
            // unterminated attribute, hide whatever follows
            out.push_str("****");
            return out;
        };
        out.push_str(&mask_secret(&rest[..end]));
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}

/// Mask the key, then truncate.
pub fn sanitize_body(body: &str) -> String {
    truncate_for_log(&mask_key_attribute(body))
}
