use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use hyper::{
    http::uri::{InvalidUri, Scheme},
    Uri,
};

use crate::errors::ProxyError;

/// Port the board UI is served on.
pub const DEFAULT_PORT: u16 = 7070;
/// Path prefix of the backend API.
pub const DEFAULT_PREFIX: &str = "/api";
/// Address of the backend.
pub const DEFAULT_TARGET: &str = "http://127.0.0.1:8080";

/// Forwards every request whose path starts with a prefix to a target.
#[derive(Clone, Debug)]
pub struct ProxyRule {
    prefix: String,
    target: Uri,
    change_origin: bool,
    strip_prefix: bool,
}

impl Default for ProxyRule {
    fn default() -> ProxyRule {
        ProxyRule {
            prefix: DEFAULT_PREFIX.to_owned(),
            target: Uri::from_static(DEFAULT_TARGET),
            change_origin: true,
            strip_prefix: false,
        }
    }
}

impl ProxyRule {
    /// Creates a rule that changes the origin and keeps the prefix.
    ///
    /// # Errors
    ///
    /// Errors if `prefix` does not start with `/` or if `target` is not an
    /// absolute `http` URL.
    pub fn new(prefix: &str, target: &str) -> Result<ProxyRule, ProxyError> {
        if !prefix.starts_with('/') {
            return Err(ProxyError::InvalidPrefix {
                prefix: prefix.to_owned(),
            });
        }

        let uri: Uri = target.parse().map_err(|error| ProxyError::InvalidTarget {
            target: target.to_owned(),
            error,
        })?;
        if uri.scheme() != Some(&Scheme::HTTP) || uri.authority().is_none() || uri.query().is_some()
        {
            return Err(ProxyError::UnsupportedTarget {
                target: target.to_owned(),
            });
        }

        Ok(ProxyRule {
            prefix: prefix.to_owned(),
            target: uri,
            ..ProxyRule::default()
        })
    }

    #[must_use]
    pub fn with_change_origin(mut self, change_origin: bool) -> ProxyRule {
        self.change_origin = change_origin;
        self
    }

    #[must_use]
    pub fn with_strip_prefix(mut self, strip_prefix: bool) -> ProxyRule {
        self.strip_prefix = strip_prefix;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn target(&self) -> &Uri {
        &self.target
    }

    pub fn changes_origin(&self) -> bool {
        self.change_origin
    }

    pub fn strips_prefix(&self) -> bool {
        self.strip_prefix
    }

    /// Plain string prefix test, so `/api` also matches `/apidocs`.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Host and port of the target, as sent in the `Host` header.
    pub fn authority(&self) -> &str {
        self.target.authority().map_or("", |authority| authority.as_str())
    }

    /// Scheme and authority of the target, as sent in the `Origin` header.
    pub fn origin(&self) -> String {
        format!("http://{}", self.authority())
    }

    /// Builds the URL the backend is asked for.
    ///
    /// # Errors
    ///
    /// Errors if the incoming path or query contain characters that are not
    /// allowed in a URL.
    pub fn upstream_uri(&self, path: &str, query: Option<&str>) -> Result<Uri, InvalidUri> {
        let rest = if self.strip_prefix {
            path.strip_prefix(self.prefix.as_str()).unwrap_or(path)
        } else {
            path
        };

        let mut uri = self.origin();
        uri.push_str(self.target.path().trim_end_matches('/'));
        if !rest.starts_with('/') {
            uri.push('/');
        }
        uri.push_str(rest);
        if let Some(query) = query.filter(|query| !query.is_empty()) {
            uri.push('?');
            uri.push_str(query);
        }
        uri.parse()
    }
}

/// Settings of the development proxy.
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Tried in order, the first matching rule wins.
    pub rules: Vec<ProxyRule>,
    /// Serves paths not matched by any rule. Without it they answer 404.
    pub static_dir: Option<PathBuf>,
    /// Bounds each forwarded request. Unbounded if `None`.
    pub timeout: Option<Duration>,
}

impl Default for ProxyConfig {
    fn default() -> ProxyConfig {
        ProxyConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            rules: vec![ProxyRule::default()],
            static_dir: None,
            timeout: None,
        }
    }
}

impl ProxyConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn rule_for(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ProxyConfig::default();
        assert_eq!(config.addr(), "127.0.0.1:7070".parse().unwrap());
        let rule = config.rule_for("/api/suggest").expect("api rule");
        assert_eq!(rule.prefix(), "/api");
        assert_eq!(rule.authority(), "127.0.0.1:8080");
        assert!(rule.changes_origin());
        assert!(!rule.strips_prefix());
        assert!(config.rule_for("/index.html").is_none());
        assert!(config.rule_for("/").is_none());
    }

    #[test]
    fn test_prefix_is_plain_string_match() {
        let rule = ProxyRule::default();
        assert!(rule.matches("/api"));
        assert!(rule.matches("/apidocs"));
        assert!(!rule.matches("/ap"));
        assert!(!rule.matches("/v1/api"));
    }

    #[test]
    fn test_upstream_uri() {
        let rule = ProxyRule::default();
        assert_eq!(
            rule.upstream_uri("/api/suggest", None).unwrap(),
            "http://127.0.0.1:8080/api/suggest"
        );
        assert_eq!(
            rule.upstream_uri("/api/suggest/getApiMove", Some("board=0010")).unwrap(),
            "http://127.0.0.1:8080/api/suggest/getApiMove?board=0010"
        );
        assert_eq!(
            rule.upstream_uri("/api/suggest", Some("")).unwrap(),
            "http://127.0.0.1:8080/api/suggest"
        );
    }

    #[test]
    fn test_upstream_uri_strip_prefix() {
        let rule = ProxyRule::new("/api", "http://localhost:9000/engine/")
            .unwrap()
            .with_strip_prefix(true);
        assert_eq!(
            rule.upstream_uri("/api/suggest/7747", None).unwrap(),
            "http://localhost:9000/engine/suggest/7747"
        );
        assert_eq!(
            rule.upstream_uri("/api", None).unwrap(),
            "http://localhost:9000/engine/"
        );
    }

    #[test]
    fn test_invalid_rules() {
        assert!(matches!(
            ProxyRule::new("api", DEFAULT_TARGET),
            Err(ProxyError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            ProxyRule::new("/api", "https://127.0.0.1:8080"),
            Err(ProxyError::UnsupportedTarget { .. })
        ));
        assert!(matches!(
            ProxyRule::new("/api", "/relative"),
            Err(ProxyError::UnsupportedTarget { .. })
        ));
        assert!(matches!(
            ProxyRule::new("/api", "http://bad host"),
            Err(ProxyError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_first_rule_wins() {
        let config = ProxyConfig {
            rules: vec![
                ProxyRule::new("/api/suggest", "http://127.0.0.1:9000").unwrap(),
                ProxyRule::default(),
            ],
            ..ProxyConfig::default()
        };
        assert_eq!(
            config.rule_for("/api/suggest/restart").unwrap().authority(),
            "127.0.0.1:9000"
        );
        assert_eq!(
            config.rule_for("/api/other").unwrap().authority(),
            "127.0.0.1:8080"
        );
    }
}
