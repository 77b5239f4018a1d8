//! One source's partial opinion about the project configuration
//!
//! # Merging Semantics
//!
//! Every field falls into one of three kinds, each with its own named rule:
//!
//! - **Decisions** (`github`, `lib`, ...): [`Decision::merge`], the later source
//!   wins whenever it is not `Unknown`
//! - **Single values** (`owner`, `license`, `prelude`, ...): [`last_wins`]
//! - **Collections** (`ghcVersions`, `extensions`, `warnings`): [`accumulate`],
//!   concatenation keeping the first occurrence of each element
//!
//! Each rule is associative with the empty value as identity, so folding any
//! subset of sources in precedence order gives the same result as folding
//! the full list with the missing sources replaced by `PartialConfig::default()`.

use super::{GhcVersion, License, Target};
use crate::decision::Decision;
use serde::{Deserialize, Serialize};

/// A replacement prelude: the package providing it and the module to import as `Prelude`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomPrelude {
    pub package: String,
    pub module: String,
}

/// An ordered collection without duplicates.
///
/// Construction always drops repeated elements, which keeps [`accumulate`]
/// idempotent and gives it the empty collection as a two-sided identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Distinct<T>(Vec<T>);

impl<T> Default for Distinct<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: PartialEq> Distinct<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `item` unless an equal element is already present
    pub fn push(&mut self, item: T) {
        if !self.0.contains(&item) {
            self.0.push(item);
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: PartialEq> FromIterator<T> for Distinct<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut distinct = Distinct::new();
        for item in iter {
            distinct.push(item);
        }
        distinct
    }
}

impl<T: PartialEq> Extend<T> for Distinct<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Distinct<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Single-value rule: a set `later` replaces `earlier`, an unset one inherits it.
pub fn last_wins<T: Clone>(earlier: &Option<T>, later: &Option<T>) -> Option<T> {
    later.clone().or_else(|| earlier.clone())
}

/// Collection rule: `earlier` then `later`, keeping the first occurrence of each element.
pub fn accumulate<T: Clone + PartialEq>(earlier: &Distinct<T>, later: &Distinct<T>) -> Distinct<T> {
    earlier.iter().chain(later.iter()).cloned().collect()
}

/// A single source's contribution. `PartialConfig::default()` is the empty contribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub owner: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub license: Option<License>,
    pub ghc_versions: Distinct<GhcVersion>,
    pub cabal: Decision,
    pub stack: Decision,
    pub github: Decision,
    pub travis: Decision,
    pub appveyor: Decision,
    pub private: Decision,
    pub bscript: Decision,
    pub lib: Decision,
    pub exe: Decision,
    pub test: Decision,
    pub bench: Decision,
    /// Package and module travel together; never merged field-by-field
    pub prelude: Option<CustomPrelude>,
    pub extensions: Distinct<String>,
    pub warnings: Distinct<String>,
    pub no_upload: Decision,
}

impl PartialConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine with a higher-precedence contribution.
    pub fn merge(&self, later: &PartialConfig) -> PartialConfig {
        PartialConfig {
            owner: last_wins(&self.owner, &later.owner),
            full_name: last_wins(&self.full_name, &later.full_name),
            email: last_wins(&self.email, &later.email),
            license: last_wins(&self.license, &later.license),
            ghc_versions: accumulate(&self.ghc_versions, &later.ghc_versions),
            cabal: self.cabal.merge(later.cabal),
            stack: self.stack.merge(later.stack),
            github: self.github.merge(later.github),
            travis: self.travis.merge(later.travis),
            appveyor: self.appveyor.merge(later.appveyor),
            private: self.private.merge(later.private),
            bscript: self.bscript.merge(later.bscript),
            lib: self.lib.merge(later.lib),
            exe: self.exe.merge(later.exe),
            test: self.test.merge(later.test),
            bench: self.bench.merge(later.bench),
            prelude: last_wins(&self.prelude, &later.prelude),
            extensions: accumulate(&self.extensions, &later.extensions),
            warnings: accumulate(&self.warnings, &later.warnings),
            no_upload: self.no_upload.merge(later.no_upload),
        }
    }

    /// Left-to-right fold over sources ordered from lowest to highest precedence
    pub fn merge_all<'a, I>(sources: I) -> PartialConfig
    where
        I: IntoIterator<Item = &'a PartialConfig>,
    {
        sources
            .into_iter()
            .fold(PartialConfig::default(), |acc, source| acc.merge(source))
    }

    pub fn decision(&self, target: Target) -> Decision {
        match target {
            Target::Github => self.github,
            Target::Travis => self.travis,
            Target::Appveyor => self.appveyor,
            Target::Private => self.private,
            Target::Bscript => self.bscript,
            Target::Lib => self.lib,
            Target::Exe => self.exe,
            Target::Test => self.test,
            Target::Bench => self.bench,
        }
    }

    pub fn decision_mut(&mut self, target: Target) -> &mut Decision {
        match target {
            Target::Github => &mut self.github,
            Target::Travis => &mut self.travis,
            Target::Appveyor => &mut self.appveyor,
            Target::Private => &mut self.private,
            Target::Bscript => &mut self.bscript,
            Target::Lib => &mut self.lib,
            Target::Exe => &mut self.exe,
            Target::Test => &mut self.test,
            Target::Bench => &mut self.bench,
        }
    }
}
