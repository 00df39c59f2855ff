//! Log sanitization utilities
//!
//! cPanel and WordPress responses carry plaintext credentials, and every
//! request carries a bearer token. Nothing from either may reach the logs.

use serde_json::Value;

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// JSON keys whose values are replaced before logging.
const SECRET_KEYS: &[&str] = &["password", "token", "accessToken", "refreshToken"];

const REDACTED: &str = "***";

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

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                if SECRET_KEYS.contains(&key.as_str()) {
                    *v = Value::String(REDACTED.to_string());
                } else {
                    redact_value(v);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_value),
        _ => {}
    }
}

/// Redact credential fields from a JSON body, then truncate it.
///
/// Non-JSON bodies are only truncated.
pub fn sanitize_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(mut value) => {
            redact_value(&mut value);
            truncate_for_log(&value.to_string())
        }
        Err(_) => truncate_for_log(body),
    }
}

/// Show only the last four characters of a token.
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 8 {
        return REDACTED.to_string();
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("{REDACTED}{tail}")
}
