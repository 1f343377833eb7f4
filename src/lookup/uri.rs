/// Resource URI parsing
use crate::error::{FingerError, FingerResult};
use url::Url;

/// A parsed resource identifier such as `acct:bob@example.com`
#[derive(Debug, Clone)]
pub struct ResourceUri {
    url: Url,
    raw: String,
}

impl ResourceUri {
    /// Parse an absolute URI
    ///
    /// The scheme is normalized to lowercase. Relative references and
    /// strings without a scheme are rejected with `MalformedUri`.
    pub fn parse(raw: &str) -> FingerResult<Self> {
        let url = Url::parse(raw)
            .map_err(|e| FingerError::MalformedUri(format!("{:?}: {}", raw, e)))?;

        Ok(Self {
            url,
            raw: raw.to_string(),
        })
    }

    /// Parse and require a specific scheme
    pub fn parse_with_scheme(raw: &str, expected: &str) -> FingerResult<Self> {
        let resource = Self::parse(raw)?;

        if resource.scheme() != expected {
            return Err(FingerError::InvalidScheme {
                expected: expected.to_string(),
                found: resource.scheme().to_string(),
            });
        }

        Ok(resource)
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Path component exactly as written, excluding any authority, query
    /// and fragment
    ///
    /// For opaque URIs (`acct:`, `mailto:`) this is everything after the
    /// colon up to `?` or `#`. Percent-escapes are left untouched.
    pub fn path(&self) -> &str {
        let rest = self
            .raw
            .split_once(':')
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        let rest = rest.split(['?', '#']).next().unwrap_or_default();

        match rest.strip_prefix("//") {
            Some(authority_and_path) => authority_and_path
                .find('/')
                .map(|start| &authority_and_path[start..])
                .unwrap_or_default(),
            None => rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_uri_parts() {
        let resource = ResourceUri::parse("acct:bob@example.com").unwrap();
        assert_eq!(resource.scheme(), "acct");
        assert_eq!(resource.path(), "bob@example.com");
    }

    #[test]
    fn test_query_and_fragment_excluded_from_path() {
        let resource = ResourceUri::parse("mailto:bob@example.com?subject=hi#top").unwrap();
        assert_eq!(resource.scheme(), "mailto");
        assert_eq!(resource.path(), "bob@example.com");
    }

    #[test]
    fn test_scheme_is_lowercased() {
        let resource = ResourceUri::parse("ACCT:bob@example.com").unwrap();
        assert_eq!(resource.scheme(), "acct");
    }

    #[test]
    fn test_hierarchical_uri_path() {
        let resource = ResourceUri::parse("https://example.com/users/bob").unwrap();
        assert_eq!(resource.scheme(), "https");
        assert_eq!(resource.path(), "/users/bob");
    }

    #[test]
    fn test_missing_scheme_is_malformed() {
        for raw in ["bob", "", "bob@example.com", ":bob@example.com"] {
            assert!(
                matches!(ResourceUri::parse(raw), Err(FingerError::MalformedUri(_))),
                "{:?} should be malformed",
                raw
            );
        }
    }

    #[test]
    fn test_scheme_mismatch() {
        let err = ResourceUri::parse_with_scheme("mailto:bob@example.com", "acct").unwrap_err();
        match err {
            FingerError::InvalidScheme { expected, found } => {
                assert_eq!(expected, "acct");
                assert_eq!(found, "mailto");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_path_is_verbatim() {
        let resource = ResourceUri::parse("mailto:b%6Fb@example.com").unwrap();
        assert_eq!(resource.path(), "b%6Fb@example.com");

        let resource = ResourceUri::parse("acct:jos\u{e9}@example.com").unwrap();
        assert_eq!(resource.path(), "jos\u{e9}@example.com");
    }

    #[test]
    fn test_authority_excluded_from_path() {
        let resource = ResourceUri::parse("acct://bob@example.com").unwrap();
        assert_eq!(resource.path(), "");
    }
}
