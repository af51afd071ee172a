//! Reading and interpolating JPL Development Ephemeris ASCII exports.
//!
//! A DE dataset directory holds one header file and a series of segment
//! files, each covering a span of years:
//!
//! ```text
//! de421/
//! ├── header.421          dataset identity, constants, coefficient layout
//! ├── ascp1900.421        Chebyshev coefficient records for 1900..1920
//! ├── ascp1920.421
//! │   ...
//! └── testpo.421          reference values for self-checking
//! ```
//!
//! Each segment file is a flat sequence of fixed-size records. A record
//! starts with an index line, followed by the coefficient values three
//! per line in Fortran `D`-exponent notation; the first two values are
//! the record's JDE interval bounds:
//!
//! ```text
//!      1   1018
//!   0.2451536500000000D+07  0.2451568500000000D+07  0.4530716382529594D+08
//!  -0.2707525080986345D+08 -0.1468485283355647D+08  ...
//! ```
//!
//! [`reader::DeReader`] is the entry point: it parses the header through
//! [`header::Header`], pulls records on demand through
//! [`chunk::ChunkStore`] and evaluates them through [`interpolation`].

pub mod bodies;
pub mod chunk;
pub mod de_version;
pub(crate) mod fortran;
pub mod header;
pub mod interpolation;
pub mod reader;
pub mod segment;
pub mod state_vector;
pub mod testpo;
