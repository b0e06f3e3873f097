use crate::error::{ScriptLoadError, ScriptLoadResult};
use url::{Host, Url};

/// Check a script URL against the transport-security rule.
///
/// HTTPS is always accepted. Plain HTTP is accepted only for hosts listed in
/// `dev_hosts`. Everything else is rejected before any injection happens.
pub fn check_transport(src: &str, dev_hosts: &[String]) -> ScriptLoadResult<Url> {
    if src.trim().is_empty() {
        return Err(ScriptLoadError::invalid_input("script URL is empty"));
    }

    // The raw string is the cache key, so it must already be canonical
    if src.trim() != src {
        return Err(ScriptLoadError::invalid_input(format!(
            "script URL has surrounding whitespace: {:?}",
            src
        )));
    }

    let url = Url::parse(src)
        .map_err(|e| ScriptLoadError::invalid_input(format!("{}: {}", src, e)))?;

    match url.scheme() {
        "https" => Ok(url),
        "http" if is_dev_host(&url, dev_hosts) => Ok(url),
        _ => Err(ScriptLoadError::insecure_transport(src)),
    }
}

fn is_dev_host(url: &Url, dev_hosts: &[String]) -> bool {
    let host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_ascii_lowercase(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => return false,
    };

    dev_hosts.iter().any(|allowed| {
        allowed
            .trim()
            .trim_matches(|c| c == '[' || c == ']')
            .eq_ignore_ascii_case(&host)
    })
}
