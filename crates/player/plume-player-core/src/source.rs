//! Source descriptors: the closed set of ways to locate animation data.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PlayerError;

/// Opaque reference to a host asset bundle. Bundles are compared by their
/// identity key, never by content; the host asset-lookup mechanism resolves
/// the key to real storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleRef(String);

impl BundleRef {
    /// The application's main bundle
    #[inline]
    pub fn main() -> Self {
        Self("main".to_string())
    }

    /// A named auxiliary bundle
    #[inline]
    pub fn named(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Identity key of this bundle
    #[inline]
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl Default for BundleRef {
    fn default() -> Self {
        Self::main()
    }
}

/// Where animation data originates. Matched exhaustively by the engine
/// controller when installing, so a new source kind is a compile-time
/// checked addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationSource {
    /// An animation shipped inside a host bundle, looked up by name.
    Bundled { name: String, bundle: BundleRef },
    /// An animation fetched asynchronously from a URL.
    Remote { url: Url },
    /// An animation decoded from a local file path.
    FilePath { path: String },
}

impl AnimationSource {
    /// Bundled animation resolved against the main bundle
    #[inline]
    pub fn bundled(name: impl Into<String>) -> Self {
        Self::Bundled {
            name: name.into(),
            bundle: BundleRef::main(),
        }
    }

    /// Bundled animation resolved against a specific bundle
    #[inline]
    pub fn bundled_in(name: impl Into<String>, bundle: BundleRef) -> Self {
        Self::Bundled {
            name: name.into(),
            bundle,
        }
    }

    /// Remote animation, parsing the URL up front
    pub fn remote(url: &str) -> Result<Self, PlayerError> {
        Ok(Self::Remote {
            url: Url::parse(url)?,
        })
    }

    /// Remote animation from an already-parsed URL
    #[inline]
    pub fn remote_url(url: Url) -> Self {
        Self::Remote { url }
    }

    /// Animation loaded from a local file path
    #[inline]
    pub fn file_path(path: impl Into<String>) -> Self {
        Self::FilePath { path: path.into() }
    }

    /// Get the name of this source kind
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bundled { .. } => "bundled",
            Self::Remote { .. } => "remote",
            Self::FilePath { .. } => "file_path",
        }
    }

    /// Check whether loading this source requires an asynchronous fetch
    #[inline]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = AnimationSource::bundled("spinner");
        let b = AnimationSource::bundled_in("spinner", BundleRef::main());
        assert_eq!(a, b);

        let c = AnimationSource::bundled_in("spinner", BundleRef::named("extras"));
        assert_ne!(a, c);

        let d = AnimationSource::file_path("/tmp/spinner.json");
        assert_ne!(a, d);
    }

    #[test]
    fn test_remote_parsing() {
        let ok = AnimationSource::remote("https://example.com/anim.json").unwrap();
        assert!(ok.is_remote());
        assert_eq!(ok.kind(), "remote");

        let err = AnimationSource::remote("not a url").unwrap_err();
        assert!(matches!(err, PlayerError::InvalidUrl { .. }));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AnimationSource::bundled("x").kind(), "bundled");
        assert_eq!(AnimationSource::file_path("x").kind(), "file_path");
    }

    #[test]
    fn test_serde_round_trip() {
        let source = AnimationSource::remote("https://example.com/a.json").unwrap();
        let json = serde_json::to_string(&source).unwrap();
        let back: AnimationSource = serde_json::from_str(&json).unwrap();
        assert_eq!(source, back);
    }
}
