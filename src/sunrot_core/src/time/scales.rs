//! Time Scales
//!
//! All conversions go through TDB, which is treated as TT here.

use serde::{Deserialize, Serialize};

use super::leap_second::{tai_minus_utc_from_tai, tai_minus_utc_from_utc};
use crate::constants::SECONDS_PER_DAY;

/// Offset from JD to MJD.
pub const JD_TO_MJD: f64 = -2400000.5;

/// Offset from TT to TAI, 32.184 seconds expressed in days.
pub const TT_TO_TAI: f64 = 32.184 / SECONDS_PER_DAY;

/// Time scale of a [`super::Time`] or [`super::Duration`].
pub trait TimeScale: Sized + Sync + Send + Copy + Clone {
    /// Convert a JD in this scale to TDB.
    fn to_tdb(jd: f64) -> f64;

    /// Convert a JD in TDB to this scale.
    fn from_tdb(jd: f64) -> f64;
}

/// Barycentric Dynamical Time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TDB;

/// International Atomic Time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TAI;

/// Coordinated Universal Time.
///
/// UTC differs from TAI by the leap seconds which have been introduced since 1972.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UTC;

impl TimeScale for TDB {
    #[inline(always)]
    fn to_tdb(jd: f64) -> f64 {
        jd
    }

    #[inline(always)]
    fn from_tdb(jd: f64) -> f64 {
        jd
    }
}

impl TimeScale for TAI {
    #[inline(always)]
    fn to_tdb(jd: f64) -> f64 {
        jd + TT_TO_TAI
    }

    #[inline(always)]
    fn from_tdb(jd: f64) -> f64 {
        jd - TT_TO_TAI
    }
}

impl TimeScale for UTC {
    fn to_tdb(jd: f64) -> f64 {
        let offset = tai_minus_utc_from_utc(jd + JD_TO_MJD);
        TAI::to_tdb(jd + offset / SECONDS_PER_DAY)
    }

    fn from_tdb(jd: f64) -> f64 {
        let tai = TAI::from_tdb(jd);
        tai - tai_minus_utc_from_tai(tai + JD_TO_MJD) / SECONDS_PER_DAY
    }
}
