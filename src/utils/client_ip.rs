//! Client address resolution for access statistics.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Resolves the client address recorded with an access.
///
/// Without a proxy the socket peer address is authoritative. When
/// `behind_proxy` is set, the first `X-Forwarded-For` hop is used, then
/// `X-Real-IP`, and the peer address only if neither header is usable.
///
/// Forwarding headers are client-controlled, so `behind_proxy` must only be set
/// when a trusted reverse proxy overwrites them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = resolve_client_ip(&headers, "10.0.0.1:4000".parse().unwrap(), true);
/// assert_eq!(ip, "203.0.113.7");
/// ```
pub fn resolve_client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}
