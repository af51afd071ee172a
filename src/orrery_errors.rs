use thiserror::Error;

/// Every failure the DE reading pipeline can surface, from locating the
/// dataset files down to evaluating a coefficient record.
#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("DE header file not found at: {0}")]
    HeaderNotFound(String),

    #[error("Malformed DE header: {0}")]
    HeaderFormat(String),

    #[error("No segment file covers year {year} (JDE {jde})")]
    SegmentNotFound { year: i32, jde: f64 },

    #[error("Malformed coefficient record: {0}")]
    ChunkParse(String),

    #[error("JDE {requested} is outside the dataset coverage [{start}, {end}]")]
    EpochOutOfRange {
        requested: f64,
        start: f64,
        end: f64,
    },

    #[error("Ephemeris element {0} is not present in the dataset layout")]
    ElementNotFound(usize),

    #[error("Unknown DE version: {0}")]
    UnknownVersion(String),
}

// `std::io::Error` does not compare, so equality on the I/O variant is by
// variant only. Good enough for test assertions.
impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (IoError(_), IoError(_)) => true,
            (HeaderNotFound(a), HeaderNotFound(b)) => a == b,
            (HeaderFormat(a), HeaderFormat(b)) => a == b,
            (
                SegmentNotFound { year: ya, jde: ja },
                SegmentNotFound { year: yb, jde: jb },
            ) => ya == yb && ja == jb,
            (ChunkParse(a), ChunkParse(b)) => a == b,
            (
                EpochOutOfRange {
                    requested: ra,
                    start: sa,
                    end: ea,
                },
                EpochOutOfRange {
                    requested: rb,
                    start: sb,
                    end: eb,
                },
            ) => ra == rb && sa == sb && ea == eb,
            (ElementNotFound(a), ElementNotFound(b)) => a == b,
            (UnknownVersion(a), UnknownVersion(b)) => a == b,
            _ => false,
        }
    }
}
