//! Leap second table.
//!
//! Values are from the IERS bulletin C, each entry is the MJD (UTC) on which the
//! offset starts along with the new value of TAI - UTC in seconds.
//!
//! Dates before 1972 are clamped to the first entry, the rubber second era is not
//! modeled.

const LEAP_SECONDS: &[(f64, f64)] = &[
    (41317.0, 10.0),
    (41499.0, 11.0),
    (41683.0, 12.0),
    (42048.0, 13.0),
    (42413.0, 14.0),
    (42778.0, 15.0),
    (43144.0, 16.0),
    (43509.0, 17.0),
    (43874.0, 18.0),
    (44239.0, 19.0),
    (44786.0, 20.0),
    (45151.0, 21.0),
    (45516.0, 22.0),
    (46247.0, 23.0),
    (47161.0, 24.0),
    (47892.0, 25.0),
    (48257.0, 26.0),
    (48804.0, 27.0),
    (49169.0, 28.0),
    (49534.0, 29.0),
    (50083.0, 30.0),
    (50630.0, 31.0),
    (51179.0, 32.0),
    (53736.0, 33.0),
    (54832.0, 34.0),
    (56109.0, 35.0),
    (57204.0, 36.0),
    (57754.0, 37.0),
];

/// TAI - UTC in seconds for a UTC scaled MJD.
pub(super) fn tai_minus_utc_from_utc(mjd: f64) -> f64 {
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(start, _)| mjd >= *start)
        .map_or(LEAP_SECONDS[0].1, |(_, offset)| *offset)
}

/// TAI - UTC in seconds for a TAI scaled MJD.
pub(super) fn tai_minus_utc_from_tai(mjd: f64) -> f64 {
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(start, offset)| mjd >= start + offset / 86400.0)
        .map_or(LEAP_SECONDS[0].1, |(_, offset)| *offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_second_lookup() {
        assert!(tai_minus_utc_from_utc(40000.0) == 10.0);
        assert!(tai_minus_utc_from_utc(51910.0) == 32.0);
        assert!(tai_minus_utc_from_utc(57753.999) == 36.0);
        assert!(tai_minus_utc_from_utc(57754.0) == 37.0);
        assert!(tai_minus_utc_from_utc(60000.0) == 37.0);

        // The TAI lookup switches 37 seconds after midnight UTC.
        assert!(tai_minus_utc_from_tai(57754.0 + 36.5 / 86400.0) == 36.0);
        assert!(tai_minus_utc_from_tai(57754.0 + 37.5 / 86400.0) == 37.0);
    }
}
