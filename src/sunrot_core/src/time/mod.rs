//! Time representation and conversions
//!
//! See [`TimeScale`] for a list of supported Time Scales.
//! See [`Time`] for the representation of time itself.
// BSD 3-Clause License
//
// Copyright (c) 2026, The sunrot developers
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::{
    marker::PhantomData,
    ops::{Add, Neg, Sub},
};

mod leap_second;
mod scales;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SECONDS_PER_DAY;
use crate::errors::{Error, SunrotResult};

pub use self::scales::{JD_TO_MJD, TAI, TDB, TT_TO_TAI, TimeScale, UTC};

/// Representation of Time.
///
/// This supports different time scaling standards via the [`TimeScale`] trait.
///
/// Machine precision between float 64s with numbers near J2000 (IE: 2451545.0) is
/// around 23 microseconds (2.7e-10 days). Solar rotation moves a feature on the
/// order of a micro-degree in that time, so a single f64 Julian Date is more than
/// sufficient here.
///
/// TDB is treated as equal to TT, the difference is under 2ms.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Time<T: TimeScale> {
    /// Julian Date
    pub jd: f64,

    /// [`PhantomData`] is used here as the scale is only a record keeping convenience.
    scale_type: PhantomData<T>,
}

/// Duration of time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Duration<T: TimeScale> {
    /// Elapsed time in days.
    pub elapsed: f64,

    /// [`PhantomData`] is used here as the scale is only a record keeping convenience.
    scale_type: PhantomData<T>,
}

impl<T: TimeScale> Duration<T> {
    /// Construct a new [`Duration`] object.
    pub fn new(elapsed: f64) -> Self {
        Self {
            elapsed,
            scale_type: PhantomData,
        }
    }

    /// Duration of zero length.
    pub fn zero() -> Self {
        Self::new(0.0)
    }

    /// Construct a duration from a number of seconds.
    pub fn from_seconds(seconds: f64) -> Self {
        Self::new(seconds / SECONDS_PER_DAY)
    }

    /// Elapsed time in days.
    #[must_use]
    pub fn days(&self) -> f64 {
        self.elapsed
    }

    /// True if the duration is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.elapsed == 0.0
    }

    /// Cast to TDB scaled time.
    ///
    /// Durations are short enough that leap seconds are not applied, only the
    /// rate of the time scale matters, which is identical for all supported scales.
    pub fn tdb(&self) -> Duration<TDB> {
        Duration::<TDB>::new(self.elapsed)
    }
}

impl<T: TimeScale> Neg for Duration<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.elapsed)
    }
}

impl<T: TimeScale> Add for Duration<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.elapsed + other.elapsed)
    }
}

impl<T: TimeScale> Sub for Duration<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.elapsed - other.elapsed)
    }
}

/// Julian Date of the Unix epoch, 1970-01-01T00:00:00 UTC.
const UNIX_EPOCH_JD: f64 = 2440587.5;

/// Julian Day Number of the day before 0001-01-01 in the proleptic Gregorian
/// calendar, which is day zero of [`Datelike::num_days_from_ce`].
const CE_EPOCH_JDN: i32 = 1721425;

fn out_of_range(jd: f64) -> Error {
    Error::ValueError(format!("JD {jd} is outside of the supported calendar range."))
}

impl Time<UTC> {
    /// Read time from an ISO formatted string.
    ///
    /// Full RFC 3339 strings are accepted, as are naive date-times without a zone
    /// (``2001-01-01T12:00:00``) and bare dates (``2001-01-01``), both of which are
    /// interpreted as UTC.
    ///
    /// ```
    ///     use sunrot_core::time::{Time, UTC};
    ///
    ///     let t = Time::<UTC>::from_iso("2001-01-01").unwrap();
    ///     assert_eq!(t.year_month_day().unwrap(), (2001, 1, 1, 0.0));
    ///
    ///     let t = Time::<UTC>::from_iso("2001-01-01T06:00:00").unwrap();
    ///     assert_eq!(t.year_month_day().unwrap(), (2001, 1, 1, 0.25));
    /// ```
    ///
    /// # Errors
    /// An error is returned if none of the supported formats match.
    pub fn from_iso(s: &str) -> SunrotResult<Self> {
        let s = s.trim();
        if let Ok(time) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_datetime(&time.to_utc()));
        }
        if let Ok(time) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::from_datetime(&time.and_utc()));
        }
        let time = NaiveDate::parse_from_str(s, "%Y-%m-%d")?
            .and_hms_opt(0, 0, 0)
            .ok_or(Error::ValueError("Failed to convert date.".into()))?
            .and_utc();
        Ok(Self::from_datetime(&time))
    }

    /// Construct a Time object from a UTC [`DateTime`].
    ///
    /// Every UTC day is 86400 seconds long here, leap seconds are handled by the
    /// conversion to other time scales.
    #[allow(clippy::cast_precision_loss, reason = "Timestamps are well below 2^52")]
    pub fn from_datetime(time: &DateTime<Utc>) -> Self {
        let seconds = time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) * 1e-9;
        Self::new(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// Gregorian calendar year, month, day, and fraction of the day.
    ///
    /// # Errors
    /// Fails if the date is not finite or cannot be represented by [`chrono`].
    #[allow(clippy::cast_possible_truncation, reason = "Range is checked by try_from")]
    pub fn year_month_day(&self) -> SunrotResult<(i32, u32, u32, f64)> {
        if !self.jd.is_finite() {
            return Err(out_of_range(self.jd));
        }
        let offset = self.jd + 0.5;
        let day_number = offset.floor();
        let date = i32::try_from(day_number as i64 - i64::from(CE_EPOCH_JDN))
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| out_of_range(self.jd))?;
        Ok((date.year(), date.month(), date.day(), offset - day_number))
    }

    /// Create Time from a date in the Gregorian calendar.
    ///
    /// The fraction of the day is added to midnight of the date, and may fall outside
    /// of `[0, 1)`.
    ///
    /// # Errors
    /// Fails if the date does not exist.
    pub fn from_year_month_day(
        year: i32,
        month: u32,
        day: u32,
        frac_day: f64,
    ) -> SunrotResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::ValueError(format!("{year:04}-{month:02}-{day:02} is not a valid date."))
        })?;
        let midnight = f64::from(date.num_days_from_ce() + CE_EPOCH_JDN) - 0.5;
        Ok(Self::new(midnight + frac_day))
    }

    /// Convert to a [`DateTime`], rounded to the nearest millisecond.
    ///
    /// # Errors
    /// Fails if the time cannot be represented by [`chrono`].
    #[allow(clippy::cast_possible_truncation, reason = "Out of range values are rejected")]
    pub fn to_datetime(&self) -> SunrotResult<DateTime<Utc>> {
        let millis = ((self.jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
        if !millis.is_finite() {
            return Err(out_of_range(self.jd));
        }
        DateTime::from_timestamp_millis(millis as i64).ok_or_else(|| out_of_range(self.jd))
    }

    /// RFC 3339 formatted UTC string.
    ///
    /// # Errors
    /// Fails if the time cannot be represented by [`chrono`].
    pub fn to_iso(&self) -> SunrotResult<String> {
        Ok(self.to_datetime()?.to_rfc3339())
    }
}

impl<T: TimeScale> Time<T> {
    /// Construct a new Time object.
    pub fn new(jd: f64) -> Self {
        Self {
            jd,
            scale_type: PhantomData,
        }
    }

    /// Create Time from a Modified Julian Date (MJD).
    pub fn from_mjd(mjd: f64) -> Self {
        Self {
            jd: mjd - JD_TO_MJD,
            scale_type: PhantomData,
        }
    }

    /// Cast to UTC scaled time.
    pub fn utc(&self) -> Time<UTC> {
        Time::<UTC>::new(UTC::from_tdb(T::to_tdb(self.jd)))
    }

    /// Cast to TAI scaled time.
    pub fn tai(&self) -> Time<TAI> {
        Time::<TAI>::new(TAI::from_tdb(T::to_tdb(self.jd)))
    }

    /// Cast to TDB scaled time.
    pub fn tdb(&self) -> Time<TDB> {
        Time::<TDB>::new(T::to_tdb(self.jd))
    }

    /// Convert to an MJD float.
    #[must_use]
    pub fn mjd(&self) -> f64 {
        self.jd + JD_TO_MJD
    }
}

impl<T: TimeScale> From<f64> for Time<T> {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl<T: TimeScale> From<f64> for Duration<T> {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl<A: TimeScale, B: TimeScale> Sub<Time<B>> for Time<A> {
    type Output = Duration<TDB>;

    /// Subtract two times, returning the duration in days of TDB.
    fn sub(self, other: Time<B>) -> Self::Output {
        (self.tdb().jd - other.tdb().jd).into()
    }
}

impl<A: TimeScale, B: TimeScale> Add<Duration<B>> for Time<A> {
    type Output = Self;

    /// Add a time and duration together
    fn add(self, other: Duration<B>) -> Self::Output {
        A::from_tdb(self.tdb().jd + other.tdb().elapsed).into()
    }
}

impl<A: TimeScale, B: TimeScale> Sub<Duration<B>> for Time<A> {
    type Output = Self;

    /// Subtract a duration from a time
    fn sub(self, other: Duration<B>) -> Self::Output {
        A::from_tdb(self.tdb().jd - other.tdb().elapsed).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar() {
        let t = Time::<UTC>::new(2451545.0);
        assert!(t.year_month_day().unwrap() == (2000, 1, 1, 0.5));

        // Launch of Sputnik 1, 1957 October 4.81
        let t = Time::<UTC>::from_year_month_day(1957, 10, 4, 0.81).unwrap();
        assert!((t.jd - 2436116.31).abs() < 1e-9);

        let t = Time::<UTC>::from_year_month_day(2001, 1, 2, -1.0).unwrap();
        assert!(t.jd == 2451910.5);
        assert!(t.year_month_day().unwrap() == (2001, 1, 1, 0.0));

        assert!(Time::<UTC>::from_year_month_day(2001, 2, 30, 0.0).is_err());
        assert!(Time::<UTC>::new(f64::NAN).to_datetime().is_err());
        assert!(Time::<UTC>::new(f64::NAN).year_month_day().is_err());
        assert!(Time::<UTC>::new(f64::INFINITY).year_month_day().is_err());
    }

    #[test]
    fn test_mjd() {
        let t = Time::<UTC>::from_mjd(51544.5);
        assert!(t.jd == 2451545.0);
        assert!(t.mjd() == 51544.5);
        assert!(t.year_month_day().unwrap() == (2000, 1, 1, 0.5));
    }

    #[test]
    fn test_iso() {
        let t = Time::<UTC>::from_iso("2004-02-29T18:00:00Z").unwrap();
        assert!(t.year_month_day().unwrap() == (2004, 2, 29, 0.75));
        assert!(t.to_iso().unwrap() == "2004-02-29T18:00:00+00:00");

        let t = Time::<UTC>::from_iso("2001-01-01").unwrap();
        assert!(t.jd == 2451910.5);

        let naive = Time::<UTC>::from_iso("2001-01-01T12:00:00.5").unwrap();
        assert!(((naive.jd - t.jd) * SECONDS_PER_DAY - 43200.5).abs() < 1e-4);

        assert!(Time::<UTC>::from_iso("not a time").is_err());
        assert!(Time::<UTC>::from_iso("2001-13-01").is_err());
    }

    #[test]
    fn test_time_difference() {
        let t0 = Time::<UTC>::from_iso("2001-01-02").unwrap();
        let t1 = Time::<UTC>::from_iso("2001-01-03").unwrap();
        assert!(((t1 - t0).elapsed - 1.0).abs() < 1e-9);
        assert!(((t0 - t1).elapsed + 1.0).abs() < 1e-9);

        let back = t0 + (t1 - t0);
        assert!((back.jd - t1.jd).abs() < 1e-9);
    }

    #[test]
    fn test_scale_offsets() {
        // TAI - UTC was 32 seconds for all of 2001.
        let t = Time::<UTC>::from_iso("2001-06-01").unwrap();
        let offset = (t.tai().jd - t.jd) * SECONDS_PER_DAY;
        assert!((offset - 32.0).abs() < 1e-4, "offset = {offset}");

        let offset = (t.tdb().jd - t.jd) * SECONDS_PER_DAY;
        assert!((offset - 64.184).abs() < 1e-4, "offset = {offset}");

        let round_trip = t.tdb().utc();
        assert!((round_trip.jd - t.jd).abs() < 1e-9);
    }

    #[test]
    fn test_duration_ops() {
        let a = Duration::<TDB>::new(2.0);
        let b = Duration::<TDB>::from_seconds(43200.0);
        assert!((a + b).days() == 2.5);
        assert!((a - b).days() == 1.5);
        assert!((-a).days() == -2.0);
        assert!(Duration::<TDB>::zero().is_zero());
    }
}
