//! Probe target validation.
//!
//! A target is accepted when it is an IPv4 literal or a DNS name. This is a
//! pure syntax check; nothing is resolved.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a fully qualified domain name.
pub const MAX_DOMAIN_LEN: usize = 253;

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}$").expect("domain pattern is valid")
});

/// Returns true if `ip` is a dotted-quad IPv4 address.
///
/// Anything containing a colon is rejected, so IPv6 and IPv4-mapped IPv6
/// forms never pass.
#[must_use]
pub fn is_valid_ipv4(ip: &str) -> bool {
    !ip.contains(':') && ip.parse::<Ipv4Addr>().is_ok()
}

/// Returns true if `domain` looks like a DNS name with an alphabetic TLD.
#[must_use]
pub fn is_valid_domain(domain: &str) -> bool {
    domain.len() <= MAX_DOMAIN_LEN && DOMAIN_RE.is_match(domain)
}

/// Returns true if `target` may be handed to a diagnostic tool.
#[must_use]
pub fn is_valid_target(target: &str) -> bool {
    !target.is_empty() && (is_valid_ipv4(target) || is_valid_domain(target))
}
