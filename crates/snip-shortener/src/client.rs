use snip_core::click::UNKNOWN_USER_AGENT;
use std::net::IpAddr;

/// Header carrying the originating client address behind a proxy.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Who clicked, as far as the request can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

impl ClientInfo {
    /// Derives client details from request metadata.
    ///
    /// The IP is the first entry of `X-Forwarded-For` when present, then the
    /// peer address, then the empty string. A missing or empty user agent
    /// becomes `"unknown"`.
    pub fn from_parts(
        forwarded_for: Option<&str>,
        peer: Option<IpAddr>,
        user_agent: Option<&str>,
    ) -> Self {
        let forwarded = forwarded_for
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        let ip = match (forwarded, peer) {
            (Some(ip), _) => ip.to_owned(),
            (None, Some(peer)) => peer.to_canonical().to_string(),
            (None, None) => String::new(),
        };

        let user_agent = user_agent
            .filter(|ua| !ua.is_empty())
            .unwrap_or(UNKNOWN_USER_AGENT)
            .to_owned();

        Self { ip, user_agent }
    }
}
