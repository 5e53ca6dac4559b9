// Selection of the single most specific credential entry for an image

use serde_json::{Map, Value};
use tracing::debug;

use super::reference::ImageReference;

/// Registry key to credential entry, as found under `auths` in an auth file.
///
/// Entries are opaque: they are copied through untouched and never inspected.
pub type CredentialDocument = Map<String, Value>;

/// Key historically written by `docker login` for Docker Hub.
pub const LEGACY_DOCKER_HUB_KEY: &str = "https://index.docker.io/v1/";

const DOCKER_HUB_REGISTRY: &str = "docker.io";

/// Return the entry of `credentials` that best applies to `image_ref`.
///
/// A key applies when its `/`-separated segments are a prefix of the
/// reference's segments, and the longest such key wins. When nothing applies
/// to a `docker.io` reference, the legacy Docker Hub key is used instead.
/// The result holds at most one entry; no match is not an error.
pub fn resolve(image_ref: &str, credentials: &CredentialDocument) -> CredentialDocument {
    let reference = ImageReference::parse(image_ref);
    debug!(
        path = reference.path(),
        tag = ?reference.tag(),
        digest = ?reference.digest(),
        "Normalized image reference"
    );

    let mut subset = CredentialDocument::new();

    let selected = select_key(&reference, credentials.keys().map(String::as_str));
    if let Some((key, value)) = selected.and_then(|key| Some((key, credentials.get(key)?))) {
        debug!(key, "Selected credential entry");
        subset.insert(key.to_owned(), value.clone());
    } else {
        debug!(reference = image_ref, "No credential entry applies");
    }

    subset
}

/// Pick the winning key among `keys` for `reference`.
///
/// Works on keys alone, so callers with other value representations can reuse
/// the matching rules.
pub fn select_key<'k, I>(reference: &ImageReference<'_>, keys: I) -> Option<&'k str>
where
    I: IntoIterator<Item = &'k str>,
{
    let segments = reference.segments();
    let mut best: Option<(&'k str, usize)> = None;
    let mut legacy = None;

    for key in keys {
        // The legacy key is a sentinel, not a path
        if key == LEGACY_DOCKER_HUB_KEY {
            legacy = Some(key);
            continue;
        }

        let Some(specificity) = prefix_specificity(key, &segments) else {
            continue;
        };
        debug!(key, specificity, "Candidate credential key");

        // Strictly greater: on equal specificity the first key in document order stays
        if best.map_or(true, |(_, current)| specificity > current) {
            best = Some((key, specificity));
        }
    }

    match best {
        Some((key, _)) => Some(key),
        None if reference.registry() == DOCKER_HUB_REGISTRY => legacy,
        None => None,
    }
}

/// Number of segments in `key` if it is a segment-wise prefix of `segments`.
fn prefix_specificity(key: &str, segments: &[&str]) -> Option<usize> {
    let key_segments: Vec<&str> = key.split('/').collect();

    let is_prefix = key_segments.len() <= segments.len()
        && key_segments
            .iter()
            .zip(segments)
            .all(|(expected, actual)| expected == actual);

    is_prefix.then_some(key_segments.len())
}

/// Re-key a resolved subset under the reference's registry host.
///
/// Some consumers only understand host-level keys, so an entry selected as
/// `quay.io/org/app` is emitted as `quay.io`. The legacy Docker Hub key is
/// kept as is. Values are never altered.
pub fn scope_to_registry(
    subset: CredentialDocument,
    reference: &ImageReference<'_>,
) -> CredentialDocument {
    subset
        .into_iter()
        .map(|(key, value)| {
            if key == LEGACY_DOCKER_HUB_KEY {
                (key, value)
            } else {
                (reference.registry().to_owned(), value)
            }
        })
        .collect()
}
