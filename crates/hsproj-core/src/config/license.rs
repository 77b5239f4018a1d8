//! Supported license identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum License {
    #[serde(rename = "MIT")]
    #[value(name = "MIT")]
    Mit,
    #[serde(rename = "BSD2")]
    #[value(name = "BSD2")]
    Bsd2,
    #[serde(rename = "BSD3")]
    #[value(name = "BSD3")]
    Bsd3,
    #[serde(rename = "GPL-2")]
    #[value(name = "GPL-2")]
    Gpl2,
    #[serde(rename = "GPL-3")]
    #[value(name = "GPL-3")]
    Gpl3,
    #[serde(rename = "LGPL-2.1")]
    #[value(name = "LGPL-2.1")]
    Lgpl21,
    #[serde(rename = "LGPL-3")]
    #[value(name = "LGPL-3")]
    Lgpl3,
    #[serde(rename = "AGPL-3")]
    #[value(name = "AGPL-3")]
    Agpl3,
    #[serde(rename = "Apache-2.0")]
    #[value(name = "Apache-2.0")]
    Apache20,
    #[serde(rename = "MPL-2.0")]
    #[value(name = "MPL-2.0")]
    Mpl20,
    #[serde(rename = "ISC")]
    #[value(name = "ISC")]
    Isc,
    /// All rights reserved
    #[serde(rename = "NONE")]
    #[value(name = "NONE")]
    None,
}

impl License {
    pub const ALL: [License; 12] = [
        License::Mit,
        License::Bsd2,
        License::Bsd3,
        License::Gpl2,
        License::Gpl3,
        License::Lgpl21,
        License::Lgpl3,
        License::Agpl3,
        License::Apache20,
        License::Mpl20,
        License::Isc,
        License::None,
    ];

    /// Identifier used in config files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            License::Mit => "MIT",
            License::Bsd2 => "BSD2",
            License::Bsd3 => "BSD3",
            License::Gpl2 => "GPL-2",
            License::Gpl3 => "GPL-3",
            License::Lgpl21 => "LGPL-2.1",
            License::Lgpl3 => "LGPL-3",
            License::Agpl3 => "AGPL-3",
            License::Apache20 => "Apache-2.0",
            License::Mpl20 => "MPL-2.0",
            License::Isc => "ISC",
            License::None => "NONE",
        }
    }

    /// SPDX expression for the `license:` field of a cabal file
    pub fn spdx(&self) -> &'static str {
        match self {
            License::Mit => "MIT",
            License::Bsd2 => "BSD-2-Clause",
            License::Bsd3 => "BSD-3-Clause",
            License::Gpl2 => "GPL-2.0-only",
            License::Gpl3 => "GPL-3.0-only",
            License::Lgpl21 => "LGPL-2.1-only",
            License::Lgpl3 => "LGPL-3.0-only",
            License::Agpl3 => "AGPL-3.0-only",
            License::Apache20 => "Apache-2.0",
            License::Mpl20 => "MPL-2.0",
            License::Isc => "ISC",
            License::None => "NONE",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for License {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        License::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = License::ALL.iter().map(License::name).collect();
                format!("unknown license '{}' (expected one of {})", s, known.join(", "))
            })
    }
}
