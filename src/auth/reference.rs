// Image reference decomposition for credential matching

/// An image reference split into its bare repository path and the
/// tag/digest suffixes that never take part in matching.
///
/// Parsing is best-effort and never fails: any string is accepted, the
/// worst case being a single-segment path that matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageReference<'a> {
    path: &'a str,
    tag: Option<&'a str>,
    digest: Option<&'a str>,
}

impl<'a> ImageReference<'a> {
    /// Parse `registry[/path...][:tag][@digest]`.
    ///
    /// The digest is everything after the last `@`. The tag is everything
    /// after the last `:` of what remains, provided no `/` follows it, so
    /// a registry port (`localhost:5000/app`) is left alone.
    pub fn parse(raw: &'a str) -> Self {
        let (rest, digest) = match raw.rfind('@') {
            Some(at) => (&raw[..at], Some(&raw[at + 1..])),
            None => (raw, None),
        };

        let (path, tag) = match rest.rfind(':') {
            Some(colon) if !rest[colon + 1..].contains('/') => {
                (&rest[..colon], Some(&rest[colon + 1..]))
            }
            _ => (rest, None),
        };

        Self { path, tag, digest }
    }

    /// The reference without tag or digest.
    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.tag
    }

    pub fn digest(&self) -> Option<&'a str> {
        self.digest
    }

    /// Path components; the first one is the registry host.
    pub fn segments(&self) -> Vec<&'a str> {
        self.path.split('/').collect()
    }

    pub fn registry(&self) -> &'a str {
        self.path.split('/').next().unwrap_or(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_repository() {
        let r = ImageReference::parse("quay.io/konflux-ci/foo");
        assert_eq!(r.path(), "quay.io/konflux-ci/foo");
        assert_eq!(r.tag(), None);
        assert_eq!(r.digest(), None);
        assert_eq!(r.segments(), vec!["quay.io", "konflux-ci", "foo"]);
        assert_eq!(r.registry(), "quay.io");
    }

    #[test]
    fn test_parse_tag_and_digest() {
        let r = ImageReference::parse("quay.io/konflux-ci/foo:0.3@sha256:1234567");
        assert_eq!(r.path(), "quay.io/konflux-ci/foo");
        assert_eq!(r.tag(), Some("0.3"));
        assert_eq!(r.digest(), Some("sha256:1234567"));
    }

    #[test]
    fn test_parse_digest_only() {
        // The colon inside the digest must not be mistaken for a tag
        let r = ImageReference::parse("reg/ns@sha256:deadbeef");
        assert_eq!(r.path(), "reg/ns");
        assert_eq!(r.tag(), None);
        assert_eq!(r.digest(), Some("sha256:deadbeef"));
    }

    #[test]
    fn test_parse_registry_port() {
        let r = ImageReference::parse("localhost:5000/app");
        assert_eq!(r.path(), "localhost:5000/app");
        assert_eq!(r.tag(), None);
        assert_eq!(r.registry(), "localhost:5000");

        let r = ImageReference::parse("localhost:5000/app:1");
        assert_eq!(r.path(), "localhost:5000/app");
        assert_eq!(r.tag(), Some("1"));
    }

    #[test]
    fn test_parse_single_segment() {
        let r = ImageReference::parse("arbitrary-input");
        assert_eq!(r.segments(), vec!["arbitrary-input"]);
        assert_eq!(r.registry(), "arbitrary-input");

        let r = ImageReference::parse("quay.io:latest");
        assert_eq!(r.segments(), vec!["quay.io"]);
    }

    #[test]
    fn test_parse_empty_string() {
        let r = ImageReference::parse("");
        assert_eq!(r.path(), "");
        assert_eq!(r.segments(), vec![""]);
    }
}
