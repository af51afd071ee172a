//! Coefficient chunk loading and caching.
//!
//! A chunk is one `block_size`-wide record of Chebyshev coefficients inside
//! a segment file: an index line followed by the record's values printed
//! three per line, `2 + floor(n_coeff / 3)` physical lines in total. The
//! first two values of a record are the `[jd0, jd1)` JDE interval it
//! covers. Chunks are located by byte offset: the target record's line
//! window is found by positional seeking, and only that window is read and
//! parsed, never the whole file.
//!
//! [`ChunkStore`] owns the two caches of a reader session: segment handles
//! keyed by calendar year and chunks keyed by `(segment path, chunk
//! number)`. Both sit behind mutexes so concurrent readers sharing one
//! store never observe a partially-built chunk; under contention the same
//! chunk may be loaded twice, the cache is a performance layer only. File
//! handles are scoped to a single load and never retained. Neither cache
//! evicts: a reader session on a single dataset grows its working set to
//! the chunks it has touched and keeps them for its lifetime.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::sync::{Arc, Mutex};

use camino::{Utf8Path, Utf8PathBuf};

use crate::jpl_de::de_version::DeVersion;
use crate::jpl_de::fortran::{eval_number, split_fields};
use crate::jpl_de::header::Header;
use crate::jpl_de::segment::{jde_to_year, scan_segments, select_segment, SegmentFile};
use crate::orrery_errors::OrreryError;

/// One loaded coefficient record.
///
/// `coeffs` holds the full record in file order, including the two JDE
/// bounds at positions 0 and 1, so the 1-based `coeff_start` pointers of
/// the header layout index it directly (pointer 3 is `coeffs[2]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub jd0: f64,
    pub jd1: f64,
    pub coeffs: Vec<f64>,
}

/// A segment file together with its true starting JDE, read from the
/// file's own first record (segment files can start mid-span, independent
/// of the header epoch bounds).
#[derive(Debug, Clone, PartialEq)]
struct SegmentHandle {
    file: SegmentFile,
    jde0: f64,
}

/// Cache key of a loaded chunk.
type ChunkKey = (Utf8PathBuf, i64);

/// Segment and chunk cache of one reader session.
#[derive(Debug)]
pub struct ChunkStore {
    dir: Utf8PathBuf,
    version: DeVersion,
    segments: Mutex<HashMap<i32, Arc<SegmentHandle>>>,
    chunks: Mutex<HashMap<ChunkKey, Arc<Chunk>>>,
}

impl ChunkStore {
    pub fn new(dir: &Utf8Path, version: DeVersion) -> Self {
        ChunkStore {
            dir: dir.to_path_buf(),
            version,
            segments: Mutex::new(HashMap::new()),
            chunks: Mutex::new(HashMap::new()),
        }
    }

    /// Load (or fetch from cache) the chunk covering `epoch`.
    ///
    /// The caller is responsible for the header epoch-range check; this
    /// only resolves the year to a segment file and the epoch to a record
    /// within it.
    pub fn chunk(&self, header: &Header, epoch: f64) -> Result<Arc<Chunk>, OrreryError> {
        let segment = self.segment_for(epoch)?;

        let chunk_number = chunk_number(header, &segment, epoch)?;
        let key: ChunkKey = (segment.file.path.clone(), chunk_number);

        if let Some(chunk) = self.chunks.lock().expect("chunk cache poisoned").get(&key) {
            return Ok(Arc::clone(chunk));
        }

        let chunk = Arc::new(load_chunk(header, &segment, chunk_number)?);
        self.chunks
            .lock()
            .expect("chunk cache poisoned")
            .insert(key, Arc::clone(&chunk));
        Ok(chunk)
    }

    /// Resolve `epoch` to a segment handle, caching per calendar year.
    fn segment_for(&self, epoch: f64) -> Result<Arc<SegmentHandle>, OrreryError> {
        let year = jde_to_year(epoch);

        if let Some(handle) = self
            .segments
            .lock()
            .expect("segment cache poisoned")
            .get(&year)
        {
            return Ok(Arc::clone(handle));
        }

        let segments = scan_segments(&self.dir, self.version)?;
        let selected = select_segment(&segments, year, epoch)?.clone();
        let jde0 = read_segment_start(&selected.path)?;

        let handle = Arc::new(SegmentHandle {
            file: selected,
            jde0,
        });
        self.segments
            .lock()
            .expect("segment cache poisoned")
            .insert(year, Arc::clone(&handle));
        Ok(handle)
    }
}

/// Record number of `epoch` within a segment file.
fn chunk_number(
    header: &Header,
    segment: &SegmentHandle,
    epoch: f64,
) -> Result<i64, OrreryError> {
    let mut number = ((epoch - segment.jde0) / header.block_size).floor() as i64;
    if number < 0 {
        return Err(OrreryError::SegmentNotFound {
            year: jde_to_year(epoch),
            jde: epoch,
        });
    }

    // The dataset's inclusive final epoch is the closing bound of the last
    // record; fold it back onto that record instead of pointing one past
    // the end of the file.
    let lands_on_boundary = segment.jde0 + number as f64 * header.block_size == epoch;
    if number > 0 && lands_on_boundary && epoch == header.final_epoch {
        number -= 1;
    }

    Ok(number)
}

/// Read the starting JDE of a segment file from its first record.
fn read_segment_start(path: &Utf8Path) -> Result<f64, OrreryError> {
    let file = File::open(path.as_std_path())?;
    let mut reader = BufReader::new(file);

    // Skip the first record's index line, the JDE bounds open the next one.
    let mut line = String::new();
    for _ in 0..2 {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(OrreryError::ChunkParse(format!(
                "segment file '{path}' ends before its first record"
            )));
        }
    }

    let field = split_fields(&line).next().ok_or_else(|| {
        OrreryError::ChunkParse(format!("segment file '{path}' has an empty first record"))
    })?;
    eval_number(field).map_err(|_| {
        OrreryError::ChunkParse(format!(
            "segment file '{path}' has a non-numeric start epoch: '{field}'"
        ))
    })
}

/// Load record `chunk_number` of a segment file.
fn load_chunk(
    header: &Header,
    segment: &SegmentHandle,
    chunk_number: i64,
) -> Result<Chunk, OrreryError> {
    let path = &segment.file.path;
    let coeff_lines = 1 + header.n_coeff / 3;
    let lines_per_chunk = 2 + header.n_coeff / 3;
    let first_line = chunk_number as usize * lines_per_chunk + 1;

    let file = File::open(path.as_std_path())?;
    let mut reader = BufReader::new(file);

    // Positional seek: skip to the record's first coefficient line while
    // accumulating byte offsets, then pull the whole window in one read.
    let mut line = String::new();
    let mut byte_start: u64 = 0;
    for _ in 0..first_line {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            return Err(OrreryError::ChunkParse(format!(
                "segment file '{path}' ends before record {chunk_number}"
            )));
        }
        byte_start += read as u64;
    }
    let mut byte_end = byte_start;
    for _ in 0..coeff_lines {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            return Err(OrreryError::ChunkParse(format!(
                "segment file '{path}' ends inside record {chunk_number}"
            )));
        }
        byte_end += read as u64;
    }

    reader.seek(SeekFrom::Start(byte_start))?;
    let mut window = String::with_capacity((byte_end - byte_start) as usize);
    reader
        .take(byte_end - byte_start)
        .read_to_string(&mut window)?;

    let mut coeffs = Vec::with_capacity(coeff_lines * 3);
    for (offset, text) in window.lines().enumerate() {
        if text.trim().is_empty() {
            return Err(OrreryError::ChunkParse(format!(
                "record {chunk_number} of '{path}' has an empty line at offset {offset}"
            )));
        }
        for field in split_fields(text) {
            let value = eval_number(field).map_err(|_| {
                OrreryError::ChunkParse(format!(
                    "record {chunk_number} of '{path}' has a non-numeric field: '{field}'"
                ))
            })?;
            coeffs.push(value);
        }
    }

    if coeffs.len() < header.n_coeff {
        return Err(OrreryError::ChunkParse(format!(
            "record {chunk_number} of '{path}' holds {} values, expected {}",
            coeffs.len(),
            header.n_coeff
        )));
    }

    Ok(Chunk {
        jd0: coeffs[0],
        jd1: coeffs[1],
        coeffs,
    })
}
