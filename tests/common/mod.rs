//! Synthetic DE dataset shared by the integration tests.
//!
//! The dataset mimics a DE421 export shrunk to 4 coefficients per
//! component: a header, two segment files of two records each and an
//! optional `testpo` self-check file. Every coefficient group holds
//! `[a, b, 0, 0]`, so each component is exactly linear in Chebyshev time
//! and every expected value has the closed form `a + b * ct`. The oracle
//! functions below evaluate that closed form independently of the crate
//! under test.

// Each integration test binary compiles its own view of this module and
// none of them uses every helper.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write as _;

use camino::{Utf8Path, Utf8PathBuf};

use orrery::jpl_de::bodies::Body;
use orrery::jpl_de::state_vector::StateVector;

pub const START_EPOCH: f64 = 2451544.5;
pub const FINAL_EPOCH: f64 = 2457388.5;
pub const BLOCK: f64 = 1461.0;
pub const AU_KM: f64 = 149597870.7;
pub const EMRAT: f64 = 81.30056;
pub const N_COEFF: usize = 190;

/// Per-element `(coeff_start, components, subintervals)`, matching the
/// GROUP 1050 table of the generated header. Coefficient counts are all 4.
pub const LAYOUT: [(usize, usize, usize); 15] = [
    (3, 3, 1),
    (15, 3, 1),
    (27, 3, 1),
    (39, 3, 1),
    (51, 3, 1),
    (63, 3, 1),
    (75, 3, 1),
    (87, 3, 1),
    (99, 3, 1),
    (111, 3, 2),
    (135, 3, 1),
    (147, 2, 2),
    (163, 3, 1),
    (175, 3, 1),
    (187, 1, 1),
];

const HEADER: &str = "\
KSIZE=   380    NCOEFF=   190

GROUP   1010

JPL Planetary Ephemeris DE421/LE421
Start Epoch: JED=  2451544.5 2000 JAN 01 00:00:00
Final Epoch: JED=  2457388.5 2016 JAN 01 00:00:00

GROUP   1030

  2451544.50  2457388.50        1461.

GROUP   1040

     4
  DENUM   AU      EMRAT   CLIGHT

GROUP   1041

     4
  0.421000000000000000D+03  0.149597870700000000D+09  0.813005600000000000D+02
  0.299792458000000000D+06

GROUP   1050

     3    15    27    39    51    63    75    87    99   111   135   147   163   175   187
     4     4     4     4     4     4     4     4     4     4     4     4     4     4     4
     1     1     1     1     1     1     1     1     1     2     1     2     1     1     1

GROUP   1070
";

/// The `[a, b]` coefficient pair of one component group, a function of the
/// element, component, record and subinterval so no two groups collide.
pub fn coeff_pair(elem: usize, comp: usize, record: usize, sub: usize) -> (f64, f64) {
    let a = (elem * 1000 + comp * 100 + record * 10 + sub) as f64;
    let b = (elem * 10 + comp + 1) as f64;
    (a, b)
}

/// Record index and Chebyshev time of `jde`, as the dataset defines them.
fn chebyshev_args(jde: f64, subs: usize) -> (usize, usize, f64) {
    let mut record = ((jde - START_EPOCH) / BLOCK).floor() as usize;
    if jde == FINAL_EPOCH {
        record -= 1;
    }
    let t = (jde - (START_EPOCH + record as f64 * BLOCK)) / BLOCK;
    if t >= 1.0 {
        return (record, subs - 1, 1.0);
    }
    let tint = t * subs as f64;
    let sub = tint.floor();
    (record, sub as usize, 2.0 * (tint - sub) - 1.0)
}

/// Closed-form position and velocity of one layout element at `jde`.
pub fn oracle_element(elem: usize, jde: f64) -> (Vec<f64>, Vec<f64>) {
    let (_, comps, subs) = LAYOUT[elem - 1];
    let (record, sub, ct) = chebyshev_args(jde, subs);

    let scale = if elem <= 11 { AU_KM } else { 1.0 };
    let mut pos = Vec::with_capacity(comps);
    let mut vel = Vec::with_capacity(comps);
    for comp in 0..comps {
        let (a, b) = coeff_pair(elem, comp, record, sub);
        pos.push((a + b * ct) / scale);
        vel.push(b * (2.0 * subs as f64 / BLOCK) / scale);
    }
    (pos, vel)
}

fn oracle_element_state(elem: usize, jde: f64) -> StateVector {
    let (pos, vel) = oracle_element(elem, jde);
    let mut c = pos;
    c.extend(vel);
    StateVector::from_components(&c)
}

/// Closed-form barycentric state of `body` at `jde`.
pub fn oracle_body(body: Body, jde: f64) -> StateVector {
    match body {
        Body::SolarSystemBarycenter => StateVector::zeros(),
        Body::Earth => {
            let emb = oracle_element_state(3, jde);
            let moon = oracle_element_state(10, jde);
            emb - moon / (1.0 + EMRAT)
        }
        Body::Moon => oracle_element_state(10, jde) + oracle_body(Body::Earth, jde),
        Body::Mercury => oracle_element_state(1, jde),
        Body::Venus => oracle_element_state(2, jde),
        Body::EarthMoonBarycenter => oracle_element_state(3, jde),
        Body::Mars => oracle_element_state(4, jde),
        Body::Jupiter => oracle_element_state(5, jde),
        Body::Saturn => oracle_element_state(6, jde),
        Body::Uranus => oracle_element_state(7, jde),
        Body::Neptune => oracle_element_state(8, jde),
        Body::Pluto => oracle_element_state(9, jde),
        Body::Sun => oracle_element_state(11, jde),
    }
}

/// Format a value the way the JPL exports print them, with a `D` exponent
/// and the mantissa normalized below one.
fn fortran_field(v: f64) -> String {
    let text = format!("{:.17E}", v);
    let (mantissa, exponent) = text.split_once('E').unwrap();
    let exponent: i32 = exponent.parse().unwrap();
    let sign = if mantissa.starts_with('-') { " -" } else { "  " };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    format!("{sign}0.{digits}D{:+03}", exponent + 1)
}

/// One full record: index line plus 64 lines of values, three per line.
fn record_text(record: usize) -> String {
    let jd0 = START_EPOCH + record as f64 * BLOCK;
    let mut values = vec![jd0, jd0 + BLOCK];

    for (elem, &(_, comps, subs)) in LAYOUT.iter().enumerate() {
        let elem = elem + 1;
        for sub in 0..subs {
            for comp in 0..comps {
                let (a, b) = coeff_pair(elem, comp, record, sub);
                values.push(a);
                values.push(b);
                values.push(0.0);
                // Element 12 carries a junk trailing coefficient on its
                // first component; it must never reach a position.
                if elem == 12 && comp == 0 && sub == 0 {
                    values.push(999.0);
                } else {
                    values.push(0.0);
                }
            }
        }
    }
    assert_eq!(values.len(), N_COEFF);

    // Pad the last line to three values.
    while values.len() % 3 != 0 {
        values.push(0.0);
    }

    let mut text = format!("{:6}{:7}\n", record + 1, N_COEFF);
    for triple in values.chunks(3) {
        for v in triple {
            write!(text, "{}", fortran_field(*v)).unwrap();
        }
        text.push('\n');
    }
    text
}

fn write_file(dir: &Utf8Path, name: &str, contents: &str) {
    let mut file = File::create(dir.join(name).as_std_path()).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}

/// Write the full dataset into `dir`: the header plus two segment files
/// of two records each, covering 2000..2016 in four 1461-day records.
pub fn write_dataset(dir: &Utf8Path) {
    write_file(dir, "header.421", HEADER);
    write_file(
        dir,
        "ascp2000.421",
        &format!("{}{}", record_text(0), record_text(1)),
    );
    write_file(
        dir,
        "ascp2008.421",
        &format!("{}{}", record_text(2), record_text(3)),
    );
}

/// Rewrite the header with the layout truncated to 11 elements, leaving
/// the segment files untouched.
pub fn truncate_header_layout(dir: &Utf8Path) {
    let truncated = HEADER
        .replace(
            "     3    15    27    39    51    63    75    87    99   111   135   147   163   175   187",
            "     3    15    27    39    51    63    75    87    99   111   135",
        )
        .replace(
            "     4     4     4     4     4     4     4     4     4     4     4     4     4     4     4",
            "     4     4     4     4     4     4     4     4     4     4     4",
        )
        .replace(
            "     1     1     1     1     1     1     1     1     1     2     1     2     1     1     1",
            "     1     1     1     1     1     1     1     1     1     2     1",
        );
    write_file(dir, "header.421", &truncated);
}

/// Write a `testpo.421` file whose reference values come from the oracle.
/// Rows cover a spread of targets, centers and coordinates.
pub fn write_testpo(dir: &Utf8Path) {
    let rows: &[(usize, usize, f64)] = &[
        (1, 11, 2451700.0),
        (3, 12, 2452300.25),
        (10, 3, 2453005.5),
        (13, 12, 2454466.5),
        (11, 13, 2456100.75),
        (12, 11, 2457000.0),
    ];

    let mut text = String::from("EPHEMERIS TEST DATA : DE0421LE0421\n\nEOT\n");
    for &(target, center, jde) in rows {
        let state = oracle_body(test_body(target), jde) - oracle_body(test_body(center), jde);
        let all = [
            state.position.x,
            state.position.y,
            state.position.z,
            state.velocity.x,
            state.velocity.y,
            state.velocity.z,
        ];
        for (i, value) in all.iter().enumerate() {
            writeln!(
                text,
                " 421 2000.01.01 {jde:.2} {target:2} {center:2}  {}{}",
                i + 1,
                fortran_field(*value)
            )
            .unwrap();
        }
    }
    write_file(dir, "testpo.421", &text);
}

fn test_body(code: usize) -> Body {
    orrery::jpl_de::testpo::body_for_code(code).unwrap()
}

/// Temp directory exposed through a UTF-8 path.
pub fn dataset_dir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    (dir, path)
}
