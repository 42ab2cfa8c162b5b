use axum::http::HeaderMap;
use axum::http::header::HOST;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FALLBACK_HOST: &str = "localhost";

/// Scheme and authority under which this request reached the server,
/// e.g. `http://192.168.1.20:3000`.
///
/// The host comes from the `Host` header, so the URL is only reachable by the
/// generation service when the server itself is publicly reachable there.
pub fn public_base_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|proto| proto.eq_ignore_ascii_case("https") || proto.eq_ignore_ascii_case("http"))
        .map_or_else(|| "http".to_string(), str::to_ascii_lowercase);

    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .unwrap_or(FALLBACK_HOST);

    format!("{scheme}://{host}")
}
