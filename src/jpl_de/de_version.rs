//! Version helpers for JPL DE ASCII ephemerides.
//!
//! This module defines [`DeVersion`], an enum covering the published JPL DE
//! solutions distributed as ASCII archives, and maps each label to the
//! filenames a dataset directory is expected to contain:
//!
//! - the header file, shipped under one of several historical suffixes
//!   (`header.421_572`, `header.421`, `header.421_229`), resolved by
//!   [`DeVersion::header_candidates`] in a fixed preference order,
//! - the yearly coefficient segment files (`ascp1950.421`, `ascp2000.421`,
//!   ...), whose extension is the bare version number returned by
//!   [`DeVersion::number`].
//!
//! Typical use
//! -----------------
//! ```rust
//! use std::str::FromStr;
//! use orrery::jpl_de::de_version::DeVersion;
//!
//! let v = DeVersion::from_str("DE421").unwrap();
//! assert_eq!(v.number(), 421);
//! assert_eq!(v.header_candidates()[1], "header.421");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::orrery_errors::OrreryError;

/// Enumerates the JPL DE solutions available as ASCII distributions.
///
/// Variants correspond to public releases served from the JPL ssd FTP tree.
/// Older solutions (DE102, DE200) lack librations and carry fewer layout
/// elements; requesting a missing element on such a dataset yields
/// [`OrreryError::ElementNotFound`] at query time, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeVersion {
    DE102,
    DE200,
    DE202,
    DE403,
    DE405,
    DE406,
    DE410,
    DE413,
    DE414,
    DE418,
    DE421,
    DE422,
    DE423,
    DE430,
    DE431,
    DE440,
    DE441,
}

impl DeVersion {
    /// Bare numeric suffix of this solution, e.g. `421` for DE421.
    ///
    /// This number doubles as the file extension of both the header and the
    /// coefficient segment files in an ASCII distribution.
    pub fn number(&self) -> u16 {
        match self {
            DeVersion::DE102 => 102,
            DeVersion::DE200 => 200,
            DeVersion::DE202 => 202,
            DeVersion::DE403 => 403,
            DeVersion::DE405 => 405,
            DeVersion::DE406 => 406,
            DeVersion::DE410 => 410,
            DeVersion::DE413 => 413,
            DeVersion::DE414 => 414,
            DeVersion::DE418 => 418,
            DeVersion::DE421 => 421,
            DeVersion::DE422 => 422,
            DeVersion::DE423 => 423,
            DeVersion::DE430 => 430,
            DeVersion::DE431 => 431,
            DeVersion::DE440 => 440,
            DeVersion::DE441 => 441,
        }
    }

    /// Header filenames to try for this version, in preference order.
    ///
    /// JPL shipped some solutions with a `_572` or `_229` suffix on the
    /// header (the number of constants in the file); the first candidate
    /// that exists on disk wins.
    pub fn header_candidates(&self) -> [String; 3] {
        let n = self.number();
        [
            format!("header.{n}_572"),
            format!("header.{n}"),
            format!("header.{n}_229"),
        ]
    }
}

impl FromStr for DeVersion {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DE102" | "102" => Ok(DeVersion::DE102),
            "DE200" | "200" => Ok(DeVersion::DE200),
            "DE202" | "202" => Ok(DeVersion::DE202),
            "DE403" | "403" => Ok(DeVersion::DE403),
            "DE405" | "405" => Ok(DeVersion::DE405),
            "DE406" | "406" => Ok(DeVersion::DE406),
            "DE410" | "410" => Ok(DeVersion::DE410),
            "DE413" | "413" => Ok(DeVersion::DE413),
            "DE414" | "414" => Ok(DeVersion::DE414),
            "DE418" | "418" => Ok(DeVersion::DE418),
            "DE421" | "421" => Ok(DeVersion::DE421),
            "DE422" | "422" => Ok(DeVersion::DE422),
            "DE423" | "423" => Ok(DeVersion::DE423),
            "DE430" | "430" => Ok(DeVersion::DE430),
            "DE431" | "431" => Ok(DeVersion::DE431),
            "DE440" | "440" => Ok(DeVersion::DE440),
            "DE441" | "441" => Ok(DeVersion::DE441),
            other => Err(OrreryError::UnknownVersion(other.to_string())),
        }
    }
}

impl fmt::Display for DeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DE{}", self.number())
    }
}
