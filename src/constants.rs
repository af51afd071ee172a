//! # Constants and type definitions for Orrery
//!
//! Centralizes the physical constants and conversion factors shared by the
//! DE reader modules: the J2000 reference epoch used to map a JDE onto a
//! calendar year and the light-time constant driving the apparent-position
//! iteration.
//!
//! The authoritative `AU` and `EMRAT` values always come from the dataset
//! header; the constants here only cover conversions that are independent
//! of the loaded DE version.

/// JDE of the J2000.0 calendar anchor (2000-01-01 00:00:00 TDB)
pub const JDE_J2000: f64 = 2_451_544.5;

/// Length of a Julian year in days
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Light travel time for one astronomical unit, in days
pub const LIGHT_TIME_PER_AU: f64 = 0.0057755183;

/// Iteration cap for the light-time fixed-point solver
pub const LIGHT_TIME_MAX_ITER: usize = 100;
