//! Conversions between rotated frames and their base frames.
//!
//! Coordinates of a rotated frame with a duration `d` are the location, at the
//! observation time of the base, of a feature which will be at the given location
//! once it has rotated for `d`. Converting out of a rotated frame rotates a feature
//! forward by the duration, converting into one rotates it back.
//!
//! Rotation is applied in the heliocentric inertial frame about the solar rotation
//! axis, so latitudes and distances are unchanged. The amount of rotation depends
//! on the latitude of each point.
//!
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

use itertools::izip;
use serde::{Deserialize, Serialize};

use super::rotated::RotatedSunFrame;
use crate::constants::DEFAULT_ROTATION_MODEL;
use crate::diff_rot::{FrameTime, diff_rot_many};
use crate::errors::{Error, SunrotResult};
use crate::frames::{AnyFrame, BaseFrame, Components, SunFrame, require_obstime};
use crate::graph::require_data;
use crate::time::{Duration, TDB};

/// Amount of rotation carried by a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationParams {
    /// Rotation durations, either a single value applied to every point or one
    /// value per point.
    pub durations: Vec<Duration<TDB>>,

    /// Name of the rotation model.
    pub model: String,
}

impl RotationParams {
    /// Rotation of every point by the same duration.
    pub fn new(duration: Duration<TDB>, model: impl Into<String>) -> Self {
        Self::per_point(vec![duration], model)
    }

    /// Rotation of each point by its own duration.
    pub fn per_point(durations: Vec<Duration<TDB>>, model: impl Into<String>) -> Self {
        Self {
            durations,
            model: model.into(),
        }
    }

    /// Parameters of an unrotated frame.
    pub fn none() -> Self {
        Self::new(Duration::zero(), DEFAULT_ROTATION_MODEL)
    }

    /// True if no point is rotated.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.durations.iter().all(Duration::is_zero)
    }
}

/// Rotate spherical inertial components from one rotated state into another.
///
/// Each longitude changes by the rotation of `from` less the rotation of `to` at
/// the latitude of the point. Both models are looked up even if no rotation is
/// required, and if the net rotation is zero the components are returned as is.
///
/// ```
///     use sunrot_core::frames::Components;
///     use sunrot_core::metaframes::{RotationParams, rotate};
///     use sunrot_core::time::Duration;
///
///     let data = Components::from_degrees(10.0, 0.0, 1.0);
///     let allen = RotationParams::new(Duration::new(1.0), "allen");
///     let rotated = rotate(&data, &allen, &RotationParams::none()).unwrap();
///     assert!((rotated.point(0)[0].to_degrees() - 24.44).abs() < 1e-10);
/// ```
///
/// # Errors
/// [`Error::UnknownModel`] if either model is not registered.
/// [`Error::ValueError`] if per point durations do not match the number of points.
pub fn rotate(
    inertial: &Components,
    from: &RotationParams,
    to: &RotationParams,
) -> SunrotResult<Components> {
    let lats = inertial.component(1);
    let forward = diff_rot_many(&from.durations, lats, &from.model, FrameTime::Sidereal)?;
    let backward = diff_rot_many(&to.durations, lats, &to.model, FrameTime::Sidereal)?;

    if from == to || (from.is_zero() && to.is_zero()) {
        return Ok(inertial.clone());
    }

    let [lon, lat, distance] = inertial.clone().into_inner();
    let lon = izip!(lon, forward, backward)
        .map(|(lon, a, b)| lon + a - b)
        .collect();
    Components::new(lon, lat, distance)
}

/// Rotated frame held by a graph frame.
fn as_rotated(frame: &AnyFrame) -> SunrotResult<&RotatedSunFrame<AnyFrame>> {
    frame.as_rotated().ok_or_else(|| {
        Error::ValueError(format!("{} is not a rotated frame.", frame.frame_id()))
    })
}

/// Both ends of a conversion must have an observation time.
fn require_obstimes(from: &AnyFrame, to: &AnyFrame) -> SunrotResult<()> {
    let _ = require_obstime(from.obstime(), from.frame_id())?;
    let _ = require_obstime(to.obstime(), to.frame_id())?;
    Ok(())
}

/// Convert a base frame into a rotated frame.
///
/// # Errors
/// Fails if either frame lacks an observation time, the source holds no data, or
/// the rotation model is unknown.
pub fn base_to_rotatedsun(from: &AnyFrame, to: &AnyFrame) -> SunrotResult<AnyFrame> {
    require_obstimes(from, to)?;
    let target = as_rotated(to)?;

    let inertial = from.to_inertial(require_data(from)?)?;
    let rotated = rotate(&inertial, &RotationParams::none(), &target.params())?;
    Ok(to.realize_frame(target.base().from_inertial(&rotated)?))
}

/// Convert a rotated frame into a base frame.
///
/// The result is expressed in the target frame at its own observation time.
///
/// # Errors
/// Fails if either frame lacks an observation time, the source holds no data, or
/// the rotation model is unknown.
pub fn rotatedsun_to_base(from: &AnyFrame, to: &AnyFrame) -> SunrotResult<AnyFrame> {
    require_obstimes(from, to)?;
    let source = as_rotated(from)?;

    let inertial = source.base().to_inertial(require_data(from)?)?;
    let rotated = rotate(&inertial, &source.params(), &RotationParams::none())?;
    Ok(to.realize_frame(to.from_inertial(&rotated)?))
}

/// Convert between two rotated frames of the same base family.
///
/// Frames with identical attributes copy the data across unchanged.
///
/// # Errors
/// Fails if either frame lacks an observation time, the source holds no data, or
/// the rotation model is unknown.
pub fn rotatedsun_to_rotatedsun(from: &AnyFrame, to: &AnyFrame) -> SunrotResult<AnyFrame> {
    require_obstimes(from, to)?;
    let source = as_rotated(from)?;
    let target = as_rotated(to)?;
    let data = require_data(from)?;

    if source.base() == target.base() && source.params() == target.params() {
        return Ok(to.realize_frame(data.clone()));
    }

    let inertial = source.base().to_inertial(data)?;
    let rotated = rotate(&inertial, &source.params(), &target.params())?;
    Ok(to.realize_frame(target.base().from_inertial(&rotated)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff_rot::rotation_rate;

    fn points() -> Components {
        Components::new(
            vec![0.1, 1.0, 3.0, 5.5],
            vec![0.0, 0.3, -0.7, 1.2],
            vec![1.0, 2.0, 0.5, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_identity() {
        let data = points();
        for model in ["howard", "snodgrass", "allen", "rigid"] {
            let zero = RotationParams::new(Duration::zero(), model);
            assert!(rotate(&data, &RotationParams::none(), &zero).unwrap() == data);
            assert!(rotate(&data, &zero, &RotationParams::none()).unwrap() == data);
        }
        let same = RotationParams::new(Duration::new(3.0), "allen");
        assert!(rotate(&data, &same, &same).unwrap() == data);
    }

    #[test]
    fn test_roundtrip() {
        let data = points();
        for model in ["howard", "snodgrass", "allen", "rigid"] {
            for days in [-30.0, -1.5, 0.25, 4.0, 100.0] {
                let params = RotationParams::new(Duration::new(days), model);
                let rotated = rotate(&data, &RotationParams::none(), &params).unwrap();
                let back = rotate(&rotated, &params, &RotationParams::none()).unwrap();
                assert!(data.max_separation(&back).unwrap() < 1e-12);
            }
        }
    }

    #[test]
    fn test_latitude_preserved() {
        let data = points();
        let params = RotationParams::new(Duration::new(4.0), "howard");
        let rotated = rotate(&data, &params, &RotationParams::none()).unwrap();
        assert!(rotated.component(1) == data.component(1));
        assert!(rotated.component(2) == data.component(2));

        // Equator leads higher latitudes.
        let eq = rotated.point(0)[0] - data.point(0)[0];
        let mid = rotated.point(1)[0] - data.point(1)[0];
        assert!(eq > mid);
        assert!(mid > 0.0);
    }

    #[test]
    fn test_difference_of_angles() {
        let data = points();
        let a = RotationParams::new(Duration::new(5.0), "howard");
        let b = RotationParams::new(Duration::new(2.0), "allen");
        let direct = rotate(&data, &a, &b).unwrap();
        let via_none = rotate(
            &rotate(&data, &a, &RotationParams::none()).unwrap(),
            &RotationParams::none(),
            &b,
        )
        .unwrap();
        assert!(direct.max_separation(&via_none).unwrap() < 1e-12);
    }

    #[test]
    fn test_per_point_durations() {
        // Same latitude, different durations.
        let data = Components::new(vec![0.5, 0.5], vec![0.2, 0.2], vec![1.0, 1.0]).unwrap();
        let durations = vec![Duration::new(1.0), Duration::new(3.0)];
        let params = RotationParams::per_point(durations, "allen");
        let rotated = rotate(&data, &params, &RotationParams::none()).unwrap();

        let rate = rotation_rate("allen", 0.2).unwrap();
        let first = rotated.point(0)[0] - data.point(0)[0];
        let second = rotated.point(1)[0] - data.point(1)[0];
        assert!((first - rate).abs() < 1e-12);
        assert!((second - 3.0 * rate).abs() < 1e-12);

        let back = rotate(&rotated, &RotationParams::none(), &params).unwrap();
        assert!(data.max_separation(&back).unwrap() < 1e-12);

        let zeros = RotationParams::per_point(vec![Duration::zero(); 2], "allen");
        assert!(zeros.is_zero());
        assert!(rotate(&data, &zeros, &RotationParams::none()).unwrap() == data);
    }

    #[test]
    fn test_per_point_length_mismatch() {
        let data = points();
        let params = RotationParams::per_point(vec![Duration::new(1.0); 3], "howard");
        assert!(matches!(
            rotate(&data, &params, &RotationParams::none()),
            Err(Error::ValueError(_))
        ));
    }

    #[test]
    fn test_unknown_model() {
        let data = points();
        let bad = RotationParams::new(Duration::zero(), "not_a_model");
        assert!(matches!(
            rotate(&data, &bad, &RotationParams::none()),
            Err(Error::UnknownModel(_))
        ));
        assert!(matches!(
            rotate(&data, &RotationParams::none(), &bad),
            Err(Error::UnknownModel(_))
        ));
    }
}
