//! Identifiers for bodies present in JPL DE ephemerides.
//!
//! DE datasets index their layout table by an integer element id. This enum
//! provides a typed mapping between those raw integers and the physical
//! body they stand for. Two ids are special: Earth (301) and the Moon (10)
//! have no direct barycentric slot in the data. Earth must be derived from
//! the Earth-Moon barycenter and the geocentric Moon, and the barycentric
//! Moon from the geocentric Moon plus the derived Earth. That composition
//! lives in the reader; the ids here are only used for layout lookup.

use std::fmt;

/// A solar-system body addressable through a DE ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    SolarSystemBarycenter,
    Mercury,
    Venus,
    EarthMoonBarycenter,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Moon,
    Sun,
}

impl Body {
    /// JPL DE ephemeris id of this body.
    ///
    /// Ids 1..=11 double as 1-based layout element numbers; 301 (Earth)
    /// is a synthetic id that never addresses the layout directly.
    pub fn id(&self) -> usize {
        match self {
            Body::SolarSystemBarycenter => 0,
            Body::Mercury => 1,
            Body::Venus => 2,
            Body::EarthMoonBarycenter => 3,
            Body::Earth => 301,
            Body::Mars => 4,
            Body::Jupiter => 5,
            Body::Saturn => 6,
            Body::Uranus => 7,
            Body::Neptune => 8,
            Body::Pluto => 9,
            Body::Moon => 10,
            Body::Sun => 11,
        }
    }

    /// Human-readable name, matching the JPL export conventions.
    pub fn name(&self) -> &'static str {
        match self {
            Body::SolarSystemBarycenter => "Solar System barycenter",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::EarthMoonBarycenter => "Earth-Moon barycenter",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Moon => "Moon",
            Body::Sun => "Sun",
        }
    }

    /// Short abbreviation used in diagnostic output.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Body::SolarSystemBarycenter => "SSB",
            Body::Mercury => "Me",
            Body::Venus => "V",
            Body::EarthMoonBarycenter => "EMB",
            Body::Earth => "E",
            Body::Mars => "M",
            Body::Jupiter => "J",
            Body::Saturn => "S",
            Body::Uranus => "U",
            Body::Neptune => "N",
            Body::Pluto => "P",
            Body::Moon => "Lu",
            Body::Sun => "Su",
        }
    }

    /// All bodies, in ephemeris id order.
    pub const ALL: [Body; 13] = [
        Body::SolarSystemBarycenter,
        Body::Mercury,
        Body::Venus,
        Body::EarthMoonBarycenter,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Moon,
        Body::Sun,
    ];
}

impl TryFrom<usize> for Body {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Body::SolarSystemBarycenter),
            1 => Ok(Body::Mercury),
            2 => Ok(Body::Venus),
            3 => Ok(Body::EarthMoonBarycenter),
            301 => Ok(Body::Earth),
            4 => Ok(Body::Mars),
            5 => Ok(Body::Jupiter),
            6 => Ok(Body::Saturn),
            7 => Ok(Body::Uranus),
            8 => Ok(Body::Neptune),
            9 => Ok(Body::Pluto),
            10 => Ok(Body::Moon),
            11 => Ok(Body::Sun),
            other => Err(format!("No DE body with id #{other}")),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
