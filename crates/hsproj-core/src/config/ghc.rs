//! GHC compiler versions

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stackage snapshots for the GHC versions we know about
const STACK_RESOLVERS: &[(&str, &str)] = &[
    ("7.10.3", "lts-6.35"),
    ("8.0.2", "lts-9.21"),
    ("8.2.2", "lts-11.22"),
    ("8.4.4", "lts-12.26"),
    ("8.6.5", "lts-14.27"),
    ("8.8.4", "lts-16.31"),
    ("8.10.7", "lts-18.28"),
];

/// Version used when no source lists one, and always included in the build matrix
pub const DEFAULT_GHC: &str = "8.10.7";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GhcVersion(Version);

impl GhcVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    pub fn default_version() -> Self {
        DEFAULT_GHC
            .parse()
            .unwrap_or_else(|_| GhcVersion::new(8, 10, 7))
    }

    /// Stack resolver for this compiler; unknown versions fall back to a bare `ghc-X.Y.Z` resolver
    pub fn stack_resolver(&self) -> String {
        let key = self.to_string();
        STACK_RESOLVERS
            .iter()
            .find(|(ghc, _)| *ghc == key)
            .map(|(_, lts)| lts.to_string())
            .unwrap_or_else(|| format!("ghc-{}", key))
    }
}

/// Order a merged version list for consumption: ascending, distinct, default included.
///
/// Applied at finalization only; merging keeps first-occurrence order.
pub fn consumption_order(versions: &[GhcVersion]) -> Vec<GhcVersion> {
    let mut ordered: Vec<GhcVersion> = versions.to_vec();
    ordered.push(GhcVersion::default_version());
    ordered.sort();
    ordered.dedup();
    ordered
}

impl fmt::Display for GhcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GhcVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim();
        let cleaned = cleaned.strip_prefix("ghc-").unwrap_or(cleaned);
        let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
        Version::parse(cleaned)
            .map(GhcVersion)
            .map_err(|e| format!("invalid GHC version '{}': {}", s, e))
    }
}

impl TryFrom<String> for GhcVersion {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GhcVersion> for String {
    fn from(value: GhcVersion) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> GhcVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_accepts_common_spellings() {
        assert_eq!(v("8.6.5"), GhcVersion::new(8, 6, 5));
        assert_eq!(v("ghc-8.4.4"), GhcVersion::new(8, 4, 4));
        assert_eq!(v("v8.2.2"), GhcVersion::new(8, 2, 2));
        assert!("8.6".parse::<GhcVersion>().is_err());
    }

    #[test]
    fn test_consumption_order_sorts_and_adds_default() {
        let ordered = consumption_order(&[v("8.6.5"), v("8.2.2"), v("8.6.5")]);
        assert_eq!(ordered, vec![v("8.2.2"), v("8.6.5"), v(DEFAULT_GHC)]);
    }

    #[test]
    fn test_consumption_order_compares_numerically() {
        let ordered = consumption_order(&[v("8.10.7"), v("8.8.4")]);
        assert_eq!(ordered, vec![v("8.8.4"), v("8.10.7")]);
    }

    #[test]
    fn test_stack_resolver() {
        assert_eq!(v("8.6.5").stack_resolver(), "lts-14.27");
        assert_eq!(v("9.0.1").stack_resolver(), "ghc-9.0.1");
    }
}
