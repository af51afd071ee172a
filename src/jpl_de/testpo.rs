//! Parser for the JPL `testpo` self-check files.
//!
//! Every DE export ships a `testpo.XXX` file holding reference values
//! computed by JPL's own software. After a free-form banner terminated by
//! an `EOT` line, each row carries one check:
//!
//! ```text
//! 421 1970.01.01 2440587.50 12 11  1     -0.0014125...
//! ^   ^          ^          ^  ^   ^     ^
//! |   |          |          |  |   |     reference value (AU or AU/day)
//! |   |          |          |  |   coordinate 1..=6 (x y z vx vy vz)
//! |   |          |          |  center code
//! |   |          |          target code
//! |   |          epoch (JDE)
//! |   calendar date, informational
//! dataset number
//! ```
//!
//! Target and center codes use the testpo numbering: 1..=9 are Mercury
//! through Pluto, 10 the Moon, 11 the Sun, 12 the solar system barycenter
//! and 13 the Earth-Moon barycenter. Codes 14 and 15 check the nutation
//! and libration elements and carry no `Body` mapping.

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};

use crate::jpl_de::bodies::Body;
use crate::jpl_de::de_version::DeVersion;
use crate::jpl_de::fortran::eval_number;
use crate::orrery_errors::OrreryError;

/// Banner terminator of a `testpo` file.
const END_OF_BANNER: &str = "EOT";

/// One reference check row of a `testpo` file.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Dataset number the row was computed against.
    pub denum: u16,
    /// Calendar date of the epoch, kept verbatim.
    pub date: String,
    /// Epoch as a Julian Ephemeris Day.
    pub jde: f64,
    /// Target code in testpo numbering.
    pub target: usize,
    /// Center code in testpo numbering.
    pub center: usize,
    /// Coordinate under check, 1..=6 for x, y, z, vx, vy, vz.
    pub coordinate: usize,
    /// Reference value in AU, AU/day or radians.
    pub value: f64,
}

/// Map a testpo target or center code onto a [`Body`].
///
/// Returns `None` for the nutation and libration pseudo-targets.
pub fn body_for_code(code: usize) -> Option<Body> {
    match code {
        1 => Some(Body::Mercury),
        2 => Some(Body::Venus),
        3 => Some(Body::Earth),
        4 => Some(Body::Mars),
        5 => Some(Body::Jupiter),
        6 => Some(Body::Saturn),
        7 => Some(Body::Uranus),
        8 => Some(Body::Neptune),
        9 => Some(Body::Pluto),
        10 => Some(Body::Moon),
        11 => Some(Body::Sun),
        12 => Some(Body::SolarSystemBarycenter),
        13 => Some(Body::EarthMoonBarycenter),
        _ => None,
    }
}

/// Path of the `testpo` file of `version` under `dir`.
pub fn testpo_path(dir: &Utf8Path, version: DeVersion) -> Utf8PathBuf {
    dir.join(format!("testpo.{}", version.number()))
}

/// Parse every check row of the `testpo` file at `path`.
///
/// Return
/// ----------
/// * The rows in file order, or [`OrreryError::ChunkParse`] on a
///   malformed row or a file missing its `EOT` banner terminator.
pub fn parse_testpo(path: &Utf8Path) -> Result<Vec<TestCase>, OrreryError> {
    let reader = BufReader::new(File::open(path)?);
    let mut in_banner = true;
    let mut cases = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if in_banner {
            if line.trim() == END_OF_BANNER {
                in_banner = false;
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        cases.push(parse_row(&line)?);
    }

    if in_banner {
        return Err(OrreryError::ChunkParse(format!(
            "{path} has no {END_OF_BANNER} banner terminator"
        )));
    }
    Ok(cases)
}

fn parse_row(line: &str) -> Result<TestCase, OrreryError> {
    let bad = |reason: &str| OrreryError::ChunkParse(format!("bad testpo row ({reason}): {line}"));

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 7 {
        return Err(bad("expected 7 fields"));
    }

    Ok(TestCase {
        denum: fields[0].parse().map_err(|_| bad("dataset number"))?,
        date: fields[1].to_owned(),
        jde: eval_number(fields[2]).map_err(|_| bad("epoch"))?,
        target: fields[3].parse().map_err(|_| bad("target"))?,
        center: fields[4].parse().map_err(|_| bad("center"))?,
        coordinate: fields[5].parse().map_err(|_| bad("coordinate"))?,
        value: eval_number(fields[6]).map_err(|_| bad("value"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
EPHEMERIS TEST DATA : DE0421LE0421

EOT
 421 1970.01.01 2440587.50 12 11  1      -0.0014125331518695
 421 1970.02.01 2440618.50  3 12  4       0.0167131566968698
 421 1970.03.01 2440646.50 10  3  2      -0.0019810885675834
";

    fn write_sample(content: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("testpo.421")).unwrap();
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_parse_sample_rows() {
        let (_dir, path) = write_sample(SAMPLE);
        let cases = parse_testpo(&path).unwrap();
        assert_eq!(cases.len(), 3);

        assert_eq!(
            cases[0],
            TestCase {
                denum: 421,
                date: "1970.01.01".into(),
                jde: 2440587.50,
                target: 12,
                center: 11,
                coordinate: 1,
                value: -0.0014125331518695,
            }
        );
        assert_eq!(cases[1].coordinate, 4);
        assert_eq!(cases[2].target, 10);
    }

    #[test]
    fn test_missing_banner_terminator() {
        let (_dir, path) = write_sample("EPHEMERIS TEST DATA\nno rows here\n");
        assert!(matches!(
            parse_testpo(&path),
            Err(OrreryError::ChunkParse(_))
        ));
    }

    #[test]
    fn test_malformed_row() {
        let (_dir, path) = write_sample("EOT\n421 1970.01.01 not-a-number 12 11 1 0.5\n");
        assert!(matches!(
            parse_testpo(&path),
            Err(OrreryError::ChunkParse(_))
        ));
    }

    #[test]
    fn test_body_codes() {
        assert_eq!(body_for_code(3), Some(Body::Earth));
        assert_eq!(body_for_code(10), Some(Body::Moon));
        assert_eq!(body_for_code(12), Some(Body::SolarSystemBarycenter));
        assert_eq!(body_for_code(14), None);
    }

    #[test]
    fn test_testpo_path() {
        let path = testpo_path(Utf8Path::new("/data/de421"), DeVersion::DE421);
        assert_eq!(path, Utf8PathBuf::from("/data/de421/testpo.421"));
    }
}
