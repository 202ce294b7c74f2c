use crate::UrlError;
use url::Url;

/// The host a crawl job is confined to
///
/// The scope is derived from the seed URL's host. Matching is insensitive to
/// a leading `www.` on either side, so `example.com` and `www.example.com`
/// are the same scope; any other host difference (including subdomains) is
/// off-scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeDomain {
    host: String,
}

impl ScopeDomain {
    /// Derives the scope from a seed URL
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use siphon::url::ScopeDomain;
    ///
    /// let seed = Url::parse("https://www.example.com/start").unwrap();
    /// let scope = ScopeDomain::from_url(&seed).unwrap();
    /// assert_eq!(scope.host(), "example.com");
    /// ```
    pub fn from_url(url: &Url) -> Result<Self, UrlError> {
        let host = url.host_str().ok_or(UrlError::MissingHost)?;
        Ok(Self {
            host: strip_www(&host.to_lowercase()).to_string(),
        })
    }

    /// The canonical (lowercase, `www.`-stripped) scope host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Checks whether a URL's host falls inside this scope
    pub fn contains(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => strip_www(&host.to_lowercase()) == self.host,
            None => false,
        }
    }
}

impl std::fmt::Display for ScopeDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.host)
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
