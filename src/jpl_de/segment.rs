//! Coefficient segment file discovery and selection.
//!
//! An ASCII DE distribution splits its Chebyshev coefficients over several
//! `ascpYYYY.XXX` files, each covering a contiguous year range whose start
//! is embedded in the filename. Only the file whose range contains the
//! requested epoch's calendar year ever has to be opened; this module
//! enumerates the segments of a dataset directory and performs that
//! per-year selection.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use crate::constants::{DAYS_PER_JULIAN_YEAR, JDE_J2000};
use crate::jpl_de::de_version::DeVersion;
use crate::orrery_errors::OrreryError;

/// One `ascpYYYY.XXX` coefficient file and the starting year encoded in
/// its name. The covered range ends where the next segment begins; the
/// last segment of a dataset is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFile {
    pub path: Utf8PathBuf,
    pub start_year: i32,
}

/// Calendar year containing a JDE, per the DE file naming convention:
/// `year = floor(2000 + floor((jde - 2451544.5) / 365.25))`.
pub fn jde_to_year(jde: f64) -> i32 {
    (2000.0 + ((jde - JDE_J2000) / DAYS_PER_JULIAN_YEAR).floor()) as i32
}

/// Enumerate the coefficient segment files of `version` under `dir`, in
/// ascending year order.
pub fn scan_segments(dir: &Utf8Path, version: DeVersion) -> Result<Vec<SegmentFile>, OrreryError> {
    // The year token is 1 to 6 digits; negative-era files spell the sign
    // out as a leading 'm' handled by JPL only for binary kernels, so a
    // plain digit run is sufficient here.
    let pattern = Regex::new(&format!(r"^ascp(\d{{1,6}})\.{}$", version.number()))
        .expect("segment filename pattern is valid");

    let mut segments = Vec::new();
    for entry in fs::read_dir(dir.as_std_path())? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if let Some(captures) = pattern.captures(&name) {
            let start_year: i32 = captures[1]
                .parse()
                .map_err(|_| OrreryError::ChunkParse(format!("bad year token in '{name}'")))?;
            segments.push(SegmentFile {
                path: dir.join(&name),
                start_year,
            });
        }
    }

    segments.sort_by_key(|segment| segment.start_year);
    Ok(segments)
}

/// Select the segment covering `year` from a sorted segment list.
///
/// Fails with [`OrreryError::SegmentNotFound`] when the dataset directory
/// holds no file for that year even though the epoch sits inside the
/// header-declared range (an incomplete download, typically).
pub fn select_segment<'a>(
    segments: &'a [SegmentFile],
    year: i32,
    jde: f64,
) -> Result<&'a SegmentFile, OrreryError> {
    let mut selected = None;
    for (i, segment) in segments.iter().enumerate() {
        let upper = segments.get(i + 1).map(|next| next.start_year);
        let in_range = year >= segment.start_year && upper.map_or(true, |u| year < u);
        if in_range {
            selected = Some(segment);
            break;
        }
    }

    selected.ok_or(OrreryError::SegmentNotFound { year, jde })
}
