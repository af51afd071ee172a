//! High-level access to a DE ephemeris dataset.
//!
//! [`DeReader`] ties the parsed [`Header`] to the lazy [`ChunkStore`] and
//! exposes the astronomical queries: barycentric and relative body states,
//! light-time corrected apparent positions, nutation angles, lunar
//! libration and the TT−TDB offset.
//!
//! All positions are returned in AU and all velocities in AU/day, in the
//! ICRF frame of the underlying dataset. Epochs are Julian Ephemeris Days
//! (TDB) and must fall inside the dataset's coverage, bounds included.

use camino::Utf8Path;
use nalgebra::Vector3;

use crate::constants::{LIGHT_TIME_MAX_ITER, LIGHT_TIME_PER_AU};
use crate::jpl_de::bodies::Body;
use crate::jpl_de::chunk::ChunkStore;
use crate::jpl_de::de_version::DeVersion;
use crate::jpl_de::header::Header;
use crate::jpl_de::interpolation::{interpolate, Components};
use crate::jpl_de::state_vector::StateVector;
use crate::orrery_errors::OrreryError;

/// Layout element carrying the geocentric Moon.
const ELEM_MOON: usize = 10;

/// Layout element carrying the Earth-Moon barycenter.
const ELEM_EMB: usize = 3;

/// Layout element carrying the nutation angles.
const ELEM_NUTATION: usize = 12;

/// Layout element carrying the lunar libration angles.
const ELEM_LIBRATION: usize = 13;

/// Layout element carrying the TT−TDB offset.
const ELEM_TT_TDB: usize = 15;

/// Reader over one DE dataset directory.
///
/// Construction parses the dataset header once; coefficient chunks are
/// then loaded and cached on demand as epochs are queried. The reader is
/// `Sync` and can serve concurrent queries through a shared reference.
#[derive(Debug)]
pub struct DeReader {
    version: DeVersion,
    header: Header,
    store: ChunkStore,
}

impl DeReader {
    /// Open the DE dataset of `version` stored under `dir`.
    ///
    /// Arguments
    /// -----------------
    /// * `dir`: directory holding the header and `ascp` segment files.
    /// * `version`: dataset version, selects the file names to look for.
    ///
    /// Return
    /// ----------
    /// * A ready reader, or [`OrreryError::HeaderNotFound`] /
    ///   [`OrreryError::HeaderFormat`] if no usable header exists.
    pub fn new(dir: &Utf8Path, version: DeVersion) -> Result<Self, OrreryError> {
        let header = Header::find_and_parse(dir, version)?;
        let store = ChunkStore::new(dir, version);
        Ok(DeReader {
            version,
            header,
            store,
        })
    }

    /// Dataset version this reader serves.
    pub fn version(&self) -> DeVersion {
        self.version
    }

    /// Parsed dataset header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Barycentric state of `body` at `jde`, position in AU and velocity
    /// in AU/day.
    ///
    /// The solar system barycenter is the frame origin and always yields
    /// the zero state. The Earth and the Moon are derived from the
    /// Earth-Moon barycenter and the geocentric Moon through the
    /// dataset's `EMRAT` mass ratio; every other body maps directly onto
    /// a layout element.
    pub fn position(&self, body: Body, jde: f64) -> Result<StateVector, OrreryError> {
        match body {
            Body::SolarSystemBarycenter => {
                self.check_epoch(jde)?;
                Ok(StateVector::zeros())
            }
            Body::Earth => {
                let emb = self.element_state(ELEM_EMB, jde)?;
                let moon = self.element_state(ELEM_MOON, jde)?;
                Ok(emb - moon / (1.0 + self.header.emrat()))
            }
            Body::Moon => {
                let moon = self.element_state(ELEM_MOON, jde)?;
                let earth = self.position(Body::Earth, jde)?;
                Ok(moon + earth)
            }
            _ => self.element_state(direct_element(body), jde),
        }
    }

    /// Geometric state of `target` as seen from `center` at `jde`.
    pub fn position_relative(
        &self,
        center: Body,
        target: Body,
        jde: f64,
    ) -> Result<StateVector, OrreryError> {
        Ok(self.position(target, jde)? - self.position(center, jde)?)
    }

    /// Apparent state of `target` as seen from `center` at `jde`,
    /// antedated for light travel time, together with the converged light
    /// time in days.
    ///
    /// Each round re-evaluates the whole relative state at the retarded
    /// epoch `jde - τ`, with τ recomputed from the relative distance until
    /// it stops changing. The iteration count is capped; in practice two
    /// or three rounds suffice at planetary distances.
    pub fn apparent_position(
        &self,
        center: Body,
        target: Body,
        jde: f64,
    ) -> Result<(StateVector, f64), OrreryError> {
        let mut relative = self.position_relative(center, target, jde)?;

        let mut tau = 0.0;
        for _ in 0..LIGHT_TIME_MAX_ITER {
            let next_tau = LIGHT_TIME_PER_AU * relative.distance();
            if next_tau == tau {
                break;
            }
            tau = next_tau;
            relative = self.position_relative(center, target, jde - tau)?;
        }
        Ok((relative, tau))
    }

    /// Nutation angles `(Δψ, Δε)` in radians at `jde`.
    ///
    /// Fails with [`OrreryError::ElementNotFound`] on datasets exported
    /// without the nutation element.
    pub fn nutation(&self, jde: f64) -> Result<(f64, f64), OrreryError> {
        let r = self.interp(ELEM_NUTATION, jde, 2, false)?;
        Ok((r[0], r[1]))
    }

    /// Lunar libration Euler angles in radians at `jde`.
    pub fn libration(&self, jde: f64) -> Result<Vector3<f64>, OrreryError> {
        let r = self.interp(ELEM_LIBRATION, jde, 3, false)?;
        Ok(Vector3::new(r[0], r[1], r[2]))
    }

    /// TT−TDB offset in seconds at `jde`.
    ///
    /// Only the `t`-suffixed dataset exports carry this element; others
    /// fail with [`OrreryError::ElementNotFound`].
    pub fn tt_minus_tdb(&self, jde: f64) -> Result<f64, OrreryError> {
        let r = self.interp(ELEM_TT_TDB, jde, 1, false)?;
        Ok(r[0])
    }

    /// Interpolate one layout element at `jde`.
    fn interp(
        &self,
        elem: usize,
        jde: f64,
        components: usize,
        want_velocity: bool,
    ) -> Result<Components, OrreryError> {
        self.check_epoch(jde)?;
        let chunk = self.store.chunk(&self.header, jde)?;
        interpolate(&self.header, &chunk, elem, jde, components, want_velocity)
    }

    /// Full position and velocity state of a 3-component element.
    fn element_state(&self, elem: usize, jde: f64) -> Result<StateVector, OrreryError> {
        let components = self.interp(elem, jde, 3, true)?;
        Ok(StateVector::from_components(&components))
    }

    /// Reject epochs outside the dataset coverage, bounds included.
    fn check_epoch(&self, jde: f64) -> Result<(), OrreryError> {
        if jde < self.header.start_epoch || jde > self.header.final_epoch {
            return Err(OrreryError::EpochOutOfRange {
                requested: jde,
                start: self.header.start_epoch,
                end: self.header.final_epoch,
            });
        }
        Ok(())
    }
}

/// Layout element of a body that maps directly onto the coefficient
/// table. The barycenter, the Earth and the Moon are resolved in
/// [`DeReader::position`] instead.
fn direct_element(body: Body) -> usize {
    match body {
        Body::Mercury => 1,
        Body::Venus => 2,
        Body::EarthMoonBarycenter => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
        Body::Sun => 11,
        Body::SolarSystemBarycenter | Body::Earth | Body::Moon => {
            unreachable!("resolved before element lookup")
        }
    }
}
