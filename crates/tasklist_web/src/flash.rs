//! One-shot flash messages carried in a cookie.
//!
//! A mutating request attaches the pending message to its redirect; the next
//! page render reads it, shows it, and expires the cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use tasklist_core::{MessageLevel, StatusMessage};

pub const FLASH_COOKIE: &str = "tasklist_flash";

const COOKIE_ATTRIBUTES: &str = "Path=/; HttpOnly; SameSite=Lax";

/// `Set-Cookie` value storing `message` until the next render.
pub fn set_cookie(message: &StatusMessage) -> String {
    format!(
        "{FLASH_COOKIE}={}:{}; {COOKIE_ATTRIBUTES}",
        message.level.as_str(),
        utf8_percent_encode(&message.text, NON_ALPHANUMERIC)
    )
}

/// `Set-Cookie` value expiring the flash cookie.
pub fn clear_cookie() -> String {
    format!("{FLASH_COOKIE}=; Max-Age=0; {COOKIE_ATTRIBUTES}")
}

/// Reads the pending message from request cookies.
///
/// Malformed values are treated as absent.
pub fn take(headers: &HeaderMap) -> Option<StatusMessage> {
    cookie_value(headers).and_then(decode)
}

/// Returns whether the request carries a flash cookie, decodable or not.
pub fn is_present(headers: &HeaderMap) -> bool {
    cookie_value(headers).is_some()
}

fn cookie_value(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .map(|(_, value)| value)
}

fn decode(value: &str) -> Option<StatusMessage> {
    let (level, text) = value.split_once(':')?;
    let level = MessageLevel::parse(level)?;
    let text = percent_decode_str(text).decode_utf8().ok()?;
    if text.is_empty() {
        return None;
    }
    Some(StatusMessage::new(level, text))
}
