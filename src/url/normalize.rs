use crate::UrlError;
use url::Url;

/// Tracking query parameters removed during normalization, in addition to
/// anything with a `utm_` prefix
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "msclkid",
    "wbraid",
    "gbraid",
    "mc_cid",
    "mc_eid",
    "_ga",
    "_gl",
    "ref",
    "source",
    "campaign",
    "medium",
    "content",
    "term",
];

/// Normalizes a URL into its canonical, deduplication-safe form
///
/// # Normalization Steps
///
/// 1. Resolve `raw` against `base` when given (relative hrefs), otherwise
///    parse it as absolute; reject if malformed
/// 2. Reject schemes other than `http` / `https`
/// 3. Lowercase scheme and host, strip default ports (done by the `url`
///    parser)
/// 4. Remove the fragment (everything after `#`)
/// 5. Remove tracking query parameters (the built-in set plus any
///    `extra_tracking` entries supplied by configuration)
/// 6. Sort remaining query parameters alphabetically
/// 7. Remove an empty query string entirely
/// 8. Strip the trailing slash, except on the root path
///
/// Two URLs that differ only in tracking parameters, fragment, parameter
/// order, or trailing slash normalize to the same value.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize (absolute, or relative to `base`)
/// * `base` - Base URL for resolving relative references
/// * `extra_tracking` - Additional tracking parameter names to strip
///
/// # Examples
///
/// ```
/// use siphon::url::normalize_url;
///
/// let url = normalize_url("HTTP://Example.COM/page/?utm_source=x#top", None, &[]).unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page");
/// ```
pub fn normalize_url(
    raw: &str,
    base: Option<&Url>,
    extra_tracking: &[String],
) -> Result<Url, UrlError> {
    // Step 1: Parse, resolving against the base when one is given
    let mut url = match base {
        Some(base) => base
            .join(raw)
            .map_err(|e| UrlError::Parse(e.to_string()))?,
        None => Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?,
    };

    // Step 2: Validate scheme
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    // Step 3: The url crate already lowercases scheme and host and drops
    // default ports; a URL without a host cannot be crawled
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    // Step 4: Remove fragment
    url.set_fragment(None);

    // Steps 5-7: Filter tracking parameters and sort what remains
    if url.query().is_some() {
        let filtered = filter_and_sort_query_params(&url, extra_tracking);

        if filtered.is_empty() {
            url.set_query(None);
        } else {
            let query_string = filtered
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        k.clone()
                    } else {
                        format!("{}={}", k, v)
                    }
                })
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query_string));
        }
    }

    // Step 8: Strip trailing slash except on the root path
    if url.path().len() > 1 && url.path().ends_with('/') {
        let trimmed = url.path().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            url.set_path("/");
        } else {
            url.set_path(&trimmed);
        }
    }

    Ok(url)
}

/// Filters out tracking parameters and sorts remaining query parameters
fn filter_and_sort_query_params(url: &Url, extra_tracking: &[String]) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key, extra_tracking))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str, extra_tracking: &[String]) -> bool {
    let key = key.to_lowercase();

    if key.starts_with("utm_") {
        return true;
    }

    if TRACKING_PARAMS.contains(&key.as_str()) {
        return true;
    }

    extra_tracking.iter().any(|p| p.eq_ignore_ascii_case(&key))
}
