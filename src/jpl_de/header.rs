//! DE header file parsing.
//!
//! The header of an ASCII DE distribution is a fixed, positional text
//! layout, not a self-describing one: every section sits at a known line
//! offset, and the offsets of the later sections depend on how many lines
//! the constants section occupies. The layout decoded here is:
//!
//! ```text
//! line 0                KSIZE= <k> NCOEFF= <n>
//! line 4                free-text dataset description   (GROUP 1010)
//! line 10               start JDE, final JDE, block size (GROUP 1030)
//! line 14               constant count C                 (GROUP 1040)
//! lines 15..            C constant names, 10 per line
//! line 19+ceil(C/10)..  C constant values, 3 per line    (GROUP 1041)
//! line 22+N+V           per-element coefficient start pointers (GROUP 1050)
//! line 23+N+V           per-element coefficient counts
//! line 24+N+V           per-element subinterval counts
//! ```
//!
//! with `N = ceil(C/10)` and `V = ceil(C/3)`. An off-by-one in these
//! offsets silently corrupts every subsequent coefficient lookup, so any
//! missing or non-numeric field is a hard [`OrreryError::HeaderFormat`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};

use crate::jpl_de::de_version::DeVersion;
use crate::jpl_de::fortran::{eval_number, split_fields};
use crate::orrery_errors::OrreryError;

/// Line offsets of the fixed header sections (see module docs).
const LINE_META: usize = 0;
const LINE_DESCRIPTION: usize = 4;
const LINE_EPOCHS: usize = 10;
const LINE_CONSTANT_COUNT: usize = 14;
const LINE_CONSTANT_NAMES: usize = 15;

/// Minimum number of layout elements for a usable planetary dataset.
const MIN_LAYOUT_ELEMENTS: usize = 11;

/// Coefficient layout of one ephemeris element.
///
/// Element N (1-based) of a dataset indexes `layout[N - 1]` of its header.
/// `coeff_start` is the 1-based position of the element's first Chebyshev
/// coefficient within a chunk record (positions 1 and 2 hold the record's
/// JDE bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub coeff_start: usize,
    pub coeff_count: usize,
    pub subintervals: usize,
}

/// Parsed DE header: dataset identity, epoch coverage, record geometry,
/// named constants and the per-element coefficient layout.
///
/// A `Header` is built once per dataset version and is immutable
/// afterwards, so it can be shared across threads without synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub description: String,
    pub start_epoch: f64,
    pub final_epoch: f64,
    pub block_size: f64,
    pub k_size: usize,
    pub n_coeff: usize,
    pub constants: HashMap<String, f64>,
    pub layout: Vec<LayoutEntry>,
    pub(crate) au: f64,
    pub(crate) emrat: f64,
}

impl Header {
    /// Parse the header file at `path`.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: path to a `header.XXX` file.
    ///
    /// Return
    /// ----------
    /// * The parsed [`Header`], or [`OrreryError::HeaderFormat`] if a
    ///   required section is absent or a field is non-numeric.
    pub fn parse(path: &Utf8Path) -> Result<Self, OrreryError> {
        let file = File::open(path.as_std_path())
            .map_err(|_| OrreryError::HeaderNotFound(path.to_string()))?;
        let lines: Vec<String> = BufReader::new(file)
            .lines()
            .collect::<Result<_, _>>()?;

        let (k_size, n_coeff) = parse_meta(&lines)?;
        let description = line(&lines, LINE_DESCRIPTION)?.trim().to_string();
        let (start_epoch, final_epoch, block_size) = parse_epochs(&lines)?;
        let (constants, name_lines, value_lines) = parse_constants(&lines)?;
        let layout = parse_layout(&lines, name_lines, value_lines)?;

        let au = *constants
            .get("AU")
            .ok_or_else(|| OrreryError::HeaderFormat("constant AU is missing".into()))?;
        let emrat = *constants
            .get("EMRAT")
            .ok_or_else(|| OrreryError::HeaderFormat("constant EMRAT is missing".into()))?;

        Ok(Header {
            description,
            start_epoch,
            final_epoch,
            block_size,
            k_size,
            n_coeff,
            constants,
            layout,
            au,
            emrat,
        })
    }

    /// Locate and parse the header of `version` inside the dataset
    /// directory `dir`, trying each historical filename suffix in the
    /// fixed preference order and using the first file that exists.
    pub fn find_and_parse(dir: &Utf8Path, version: DeVersion) -> Result<Self, OrreryError> {
        for candidate in version.header_candidates() {
            let path: Utf8PathBuf = dir.join(&candidate);
            if path.exists() {
                return Self::parse(&path);
            }
        }
        Err(OrreryError::HeaderNotFound(dir.to_string()))
    }

    /// Kilometers per astronomical unit, as declared by this dataset.
    pub fn au(&self) -> f64 {
        self.au
    }

    /// Earth/Moon mass ratio, as declared by this dataset.
    pub fn emrat(&self) -> f64 {
        self.emrat
    }

    /// Layout entry of element `elem` (1-based), or
    /// [`OrreryError::ElementNotFound`] if the dataset's layout table is
    /// shorter than `elem`.
    pub fn element(&self, elem: usize) -> Result<LayoutEntry, OrreryError> {
        if elem == 0 || elem > self.layout.len() {
            return Err(OrreryError::ElementNotFound(elem));
        }
        Ok(self.layout[elem - 1])
    }
}

fn line(lines: &[String], index: usize) -> Result<&str, OrreryError> {
    lines.get(index).map(String::as_str).ok_or_else(|| {
        OrreryError::HeaderFormat(format!("header is truncated before line {index}"))
    })
}

fn parse_usize(field: &str, what: &str) -> Result<usize, OrreryError> {
    field
        .parse::<usize>()
        .map_err(|_| OrreryError::HeaderFormat(format!("non-numeric {what}: '{field}'")))
}

fn parse_float(field: &str, what: &str) -> Result<f64, OrreryError> {
    eval_number(field)
        .map_err(|_| OrreryError::HeaderFormat(format!("non-numeric {what}: '{field}'")))
}

/// `KSIZE= .. NCOEFF= ..` metadata line.
fn parse_meta(lines: &[String]) -> Result<(usize, usize), OrreryError> {
    let fields: Vec<&str> = split_fields(line(lines, LINE_META)?).collect();
    if fields.len() < 4 {
        return Err(OrreryError::HeaderFormat(
            "metadata line does not hold KSIZE and NCOEFF".into(),
        ));
    }
    let k_size = parse_usize(fields[1], "KSIZE")?;
    let n_coeff = parse_usize(fields[3], "NCOEFF")?;
    Ok((k_size, n_coeff))
}

/// GROUP 1030: start epoch, final epoch and chunk span in days.
fn parse_epochs(lines: &[String]) -> Result<(f64, f64, f64), OrreryError> {
    let fields: Vec<&str> = split_fields(line(lines, LINE_EPOCHS)?).collect();
    if fields.len() < 3 {
        return Err(OrreryError::HeaderFormat(
            "epoch line does not hold start, final and block size".into(),
        ));
    }
    Ok((
        parse_float(fields[0], "start epoch")?,
        parse_float(fields[1], "final epoch")?,
        parse_float(fields[2], "block size")?,
    ))
}

/// GROUP 1040/1041: constant names then, after a computed offset, their
/// values in the same order. Returns the constants and the number of lines
/// each sub-section occupied, which the layout parser needs.
fn parse_constants(
    lines: &[String],
) -> Result<(HashMap<String, f64>, usize, usize), OrreryError> {
    let count = parse_usize(line(lines, LINE_CONSTANT_COUNT)?.trim(), "constant count")?;

    let mut names = Vec::with_capacity(count);
    let mut cursor = LINE_CONSTANT_NAMES;
    while names.len() < count {
        for field in split_fields(line(lines, cursor)?) {
            if names.len() < count {
                names.push(field.to_string());
            }
        }
        cursor += 1;
    }

    // Names span ceil(count/10) lines, values ceil(count/3); the value rows
    // start after the GROUP 1041 marker and its repeated count line.
    let name_lines = count.div_ceil(10);
    let value_lines = count.div_ceil(3);
    let mut values = Vec::with_capacity(count);
    let mut cursor = LINE_CONSTANT_NAMES + name_lines + 4;
    while values.len() < count {
        for field in split_fields(line(lines, cursor)?) {
            if values.len() < count {
                values.push(parse_float(field, "constant value")?);
            }
        }
        cursor += 1;
    }

    Ok((
        names.into_iter().zip(values).collect(),
        name_lines,
        value_lines,
    ))
}

/// GROUP 1050: three rows of integers giving, per element, the coefficient
/// start pointer, coefficient count and subinterval count.
fn parse_layout(
    lines: &[String],
    name_lines: usize,
    value_lines: usize,
) -> Result<Vec<LayoutEntry>, OrreryError> {
    let base = 22 + name_lines + value_lines;

    let row = |offset: usize, what: &str| -> Result<Vec<usize>, OrreryError> {
        split_fields(line(lines, base + offset)?)
            .map(|field| parse_usize(field, what))
            .collect()
    };

    let starts = row(0, "coefficient start pointer")?;
    let counts = row(1, "coefficient count")?;
    let sets = row(2, "subinterval count")?;

    if starts.len() != counts.len() || counts.len() != sets.len() {
        return Err(OrreryError::HeaderFormat(format!(
            "layout rows have mismatched lengths: {}/{}/{}",
            starts.len(),
            counts.len(),
            sets.len()
        )));
    }
    if starts.len() < MIN_LAYOUT_ELEMENTS {
        return Err(OrreryError::HeaderFormat(format!(
            "layout table holds {} elements, expected at least {MIN_LAYOUT_ELEMENTS}",
            starts.len()
        )));
    }

    // Start pointers are 1-based and every element carries at least one
    // coefficient over at least one subinterval; a zero in any column
    // would corrupt the chunk addressing downstream.
    for (elem, ((&start, &count), &subs)) in
        starts.iter().zip(counts.iter()).zip(sets.iter()).enumerate()
    {
        if start == 0 || count == 0 || subs == 0 {
            return Err(OrreryError::HeaderFormat(format!(
                "layout element {} has a zero start pointer, coefficient count or subinterval count",
                elem + 1
            )));
        }
    }

    Ok(starts
        .into_iter()
        .zip(counts)
        .zip(sets)
        .map(|((coeff_start, coeff_count), subintervals)| LayoutEntry {
            coeff_start,
            coeff_count,
            subintervals,
        })
        .collect())
}
