use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};

/// Random alphanumeric string of exactly `length` characters.
pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Value of an HTTP Basic `Authorization` header.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", credentials)
}

/// Splits a comma separated track list, trimming entries and dropping empty
/// ones.
pub fn split_track_list(tracks: &str) -> Vec<String> {
    tracks
        .split(',')
        .map(str::trim)
        .filter(|track| !track.is_empty())
        .map(str::to_string)
        .collect()
}

/// Form-encodes `pairs` as `key=value&key=value`, used for URL fragments.
pub fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Looks up a cookie in the raw value of a `Cookie` request header and
/// percent-decodes it.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value.trim()).ok())
        .map(|value| value.into_owned())
}

/// `Set-Cookie` value. `max_age` of `Some(0)` deletes the cookie.
pub fn set_cookie(name: &str, value: &str, max_age: Option<u64>) -> String {
    let mut cookie = format!("{}={}; Path=/; SameSite=Lax", name, urlencoding::encode(value));
    if let Some(age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", age));
    }
    cookie
}

pub fn clear_cookie(name: &str) -> String {
    set_cookie(name, "", Some(0))
}
