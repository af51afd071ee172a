//! Chebyshev evaluation of a coefficient chunk.
//!
//! Given a loaded [`Chunk`], a layout element and an epoch inside the
//! chunk's interval, this module evaluates the element's position and,
//! on request, its velocity through the classic DE polynomial recurrences.
//! The arithmetic follows the JPL export conventions exactly:
//!
//! * the chunk time is reduced to the element's subinterval and rescaled
//!   onto `[-1, 1)` (Chebyshev time),
//! * the position sum stops one coefficient short of `coeff_count`: the
//!   last coefficient of each component group does not contribute to the
//!   position, only to the velocity,
//! * elements 1..=11 are stored in km and are divided by the dataset's
//!   `AU` constant; later elements (nutation, libration, TT−TDB) are
//!   already in their target unit and pass through unscaled.

use smallvec::SmallVec;

use crate::jpl_de::chunk::Chunk;
use crate::jpl_de::header::Header;
use crate::orrery_errors::OrreryError;

/// Highest element number expressed in kilometers in the raw data.
const LAST_KM_ELEMENT: usize = 11;

/// Raw interpolation output: `components` position values, followed by
/// the velocity values when requested.
pub type Components = SmallVec<[f64; 6]>;

/// Interpolate element `elem` of `chunk` at `epoch`.
///
/// Arguments
/// -----------------
/// * `header`: dataset header supplying the layout, block size and `AU`.
/// * `chunk`: coefficient chunk whose interval contains `epoch`.
/// * `elem`: 1-based layout element number.
/// * `components`: number of components this element carries (3 for
///   bodies, 2 for nutation, 1 for TT−TDB); capped at 3 for addressing.
/// * `want_velocity`: also evaluate the velocity polynomials. Only
///   meaningful for 3-component elements.
///
/// Return
/// ----------
/// * Position values in AU (elements 1..=11) or the element's native unit,
///   then velocity values in AU/day when requested.
/// * [`OrreryError::ElementNotFound`] if `elem` exceeds the layout table,
///   [`OrreryError::ChunkParse`] if the chunk is too short for the layout.
pub fn interpolate(
    header: &Header,
    chunk: &Chunk,
    elem: usize,
    epoch: f64,
    components: usize,
    want_velocity: bool,
) -> Result<Components, OrreryError> {
    let entry = header.element(elem)?;
    let n_coeff = entry.coeff_count;
    let n_sub = entry.subintervals;
    let n_groups = components.min(3);

    // Chunk-relative time, reduced to the subinterval and rescaled onto
    // the Chebyshev domain.
    let t = (epoch - chunk.jd0) / header.block_size;
    let whole = t.floor();
    let tint = (t - whole) * n_sub as f64;
    let mut seg = tint.floor();
    let mut cheb_time = 2.0 * (tint - seg) - 1.0;
    if whole >= 1.0 {
        // The closing bound of the chunk belongs to its last subinterval,
        // evaluated at Chebyshev time +1.
        seg = (n_sub - 1) as f64;
        cheb_time = 1.0;
    }

    let mut pointer = entry.coeff_start - 1;
    pointer += seg as usize * n_coeff * n_groups;

    // One coefficient slice per component group.
    let mut groups: SmallVec<[&[f64]; 3]> = SmallVec::new();
    for j in 0..n_groups {
        let start = pointer + j * n_coeff;
        let group = chunk.coeffs.get(start..start + n_coeff).ok_or_else(|| {
            OrreryError::ChunkParse(format!(
                "chunk starting at JDE {} is too short for element {elem}",
                chunk.jd0
            ))
        })?;
        groups.push(group);
    }

    // Position polynomials: P1 = 1, P2 = t, Pk = 2t·Pk−1 − Pk−2.
    let mut pos_poly = vec![0.0; n_coeff];
    pos_poly[0] = 1.0;
    if n_coeff > 1 {
        pos_poly[1] = cheb_time;
    }
    for k in 2..n_coeff {
        pos_poly[k] = 2.0 * cheb_time * pos_poly[k - 1] - pos_poly[k - 2];
    }

    let mut results: Components = SmallVec::new();
    for group in &groups {
        // The last coefficient of each group is intentionally excluded
        // from the position sum.
        let mut position = 0.0;
        for k in 0..n_coeff.saturating_sub(1) {
            position += group[k] * pos_poly[k];
        }
        if elem <= LAST_KM_ELEMENT {
            position /= header.au();
        }
        results.push(position);
    }

    if want_velocity {
        // Velocity polynomials: V1 = 0, V2 = 1, V3 = 4t,
        // Vk = 2t·Vk−1 + 2·Pk−1 − Vk−2.
        let mut vel_poly = vec![0.0; n_coeff];
        if n_coeff > 1 {
            vel_poly[1] = 1.0;
        }
        if n_coeff > 2 {
            vel_poly[2] = 4.0 * cheb_time;
        }
        for k in 3..n_coeff {
            vel_poly[k] =
                2.0 * cheb_time * vel_poly[k - 1] + 2.0 * pos_poly[k - 1] - vel_poly[k - 2];
        }

        let scale = 2.0 * n_sub as f64 / header.block_size;
        for group in &groups {
            let mut velocity = 0.0;
            for k in 0..n_coeff {
                velocity += group[k] * vel_poly[k];
            }
            velocity *= scale;
            if elem <= LAST_KM_ELEMENT {
                velocity /= header.au();
            }
            results.push(velocity);
        }
    }

    Ok(results)
}
