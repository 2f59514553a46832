//! Well-formedness check for user-supplied web URLs.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::input::Textual;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)[^a-z0-9:/?#\[\]@!$&'()*+,;=.\-_~%]"));

static HOSTNAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-zA-Z0-9]+[\w-]*([.]?[a-zA-Z0-9]+[\w-]*)*$"));

static PATHNAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^(/[\w\-.~!$'()*+,;=:@%]+)*/?$"));

/// A `%` not followed by two hex digits.
static BAD_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"%([^0-9A-Fa-f]|[0-9A-Fa-f][^0-9A-Fa-f]|[0-9A-Fa-f]?$)")
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|error| panic!("url pattern failed to compile: {error}"))
}

/// Returns `true` if `url` is an absolute `http` or `https` URL with a plain
/// hostname and a conservative path.
///
/// Never fails: anything that does not parse is reported as `false`.
///
/// ```
/// use auth_core::validate_url;
///
/// assert!(validate_url("https://example.com/path"));
/// assert!(!validate_url("ftp://example.com"));
/// ```
#[must_use]
pub fn validate_url<T: Textual + ?Sized>(url: &T) -> bool {
    let Some(raw) = url.as_text() else {
        return false;
    };
    if raw.is_empty() || INVALID_CHARS.is_match(raw) || BAD_PERCENT.is_match(raw) {
        return false;
    }

    // Host and path are checked as written; the parser would repair empty
    // authorities and decode escapes.
    let Some((hostname, path)) = raw_host_and_path(raw) else {
        return false;
    };

    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    if !HOSTNAME.is_match(hostname) {
        return false;
    }
    path.is_empty() || path == "/" || PATHNAME.is_match(path)
}

/// Split `scheme://[userinfo@]host[:port][/path][?query][#fragment]` into
/// its raw host and path. `None` when there is no `//` authority marker.
fn raw_host_and_path(raw: &str) -> Option<(&str, &str)> {
    let (_, rest) = raw.split_once(':')?;
    let rest = rest.strip_prefix("//")?;

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    let path_end = tail.find(['?', '#']).unwrap_or(tail.len());
    let (path, _) = tail.split_at(path_end);

    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = host_port.split_once(':').map_or(host_port, |(host, _)| host);
    Some((host, path))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_plain_web_urls() {
        assert!(validate_url("https://example.com/path"));
        assert!(validate_url("http://example.com"));
        assert!(validate_url("https://example.com/"));
        assert!(validate_url("https://sub.example-site.co.uk/a/b/c/"));
        assert!(validate_url("https://localhost:8080/photo.png?size=200#top"));
        assert!(validate_url("https://my-host.example.com/~user/p%20q"));
        assert!(validate_url("http://127.0.0.1/a"));
        assert!(validate_url("HTTPS://Example.com"));
        assert!(validate_url("https://user:pw@example.com:8443/a"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(!validate_url("ftp://example.com"));
        assert!(!validate_url("mailto:someone@example.com"));
        assert!(!validate_url("file:///etc/passwd"));
        assert!(!validate_url("example.com/path"));
        assert!(!validate_url("//example.com/path"));
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert!(!validate_url("https://ex ample.com"));
        assert!(!validate_url("https://example.com/a b"));
        assert!(!validate_url("https://example.com/<script>"));
        assert!(!validate_url("https://example.com\\path"));
        assert!(!validate_url("https://exämple.com"));
    }

    #[test]
    fn rejects_bad_hosts_and_paths() {
        assert!(!validate_url("https://"));
        assert!(!validate_url("http:example.com"));
        assert!(!validate_url("https://-example.com"));
        assert!(!validate_url("https://[::1]/"));
        assert!(!validate_url("https://example.com/a[b]"));
        assert!(!validate_url("https://example.com//double"));
    }

    #[test]
    fn rejects_missing_host() {
        assert!(!validate_url("https:///example.com"));
        assert!(!validate_url("http:////example.com/a"));
        assert!(!validate_url("https://user@/a"));
        assert!(!validate_url("https://:8080/a"));
    }

    #[test]
    fn rejects_bad_or_encoded_escapes() {
        assert!(!validate_url("https://example.com/%zz"));
        assert!(!validate_url("https://example.com/a%2"));
        assert!(!validate_url("https://example.com/a%"));
        assert!(!validate_url("https://ex%41mple.com/"));
        assert!(validate_url("https://example.com/a%2Fb"));
    }

    #[test]
    fn raw_components_are_not_normalized() {
        assert_eq!(
            raw_host_and_path("https://u@Example.com:80/a/b?q=1#f"),
            Some(("Example.com", "/a/b"))
        );
        assert_eq!(raw_host_and_path("https:///x"), Some(("", "/x")));
        assert_eq!(raw_host_and_path("https://example.com"), Some(("example.com", "")));
        assert_eq!(raw_host_and_path("http:example.com"), None);
    }

    #[test]
    fn rejects_empty_and_non_textual() {
        assert!(!validate_url(""));
        assert!(!validate_url(&json!(42)));
        assert!(!validate_url(&json!(null)));
        assert!(validate_url(&json!("https://example.com")));
    }

    #[test]
    fn repeated_calls_agree() {
        for url in ["https://example.com/path", "ftp://example.com", ""] {
            assert_eq!(validate_url(url), validate_url(url));
        }
    }
}
