//! Sun centered spherical frames.
//!
//! These frames differ from one another only in where longitude zero is placed:
//!
//! - [`HeliographicStonyhurst`]: the projection of the Sun-Earth line onto the
//!   solar equator.
//! - [`HeliographicCarrington`]: the Carrington prime meridian, which rotates with
//!   a sidereal period of 25.38 days.
//! - [`HeliocentricInertial`]: the ascending node of the solar equator on the
//!   ecliptic, which does not rotate.
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

use serde::{Deserialize, Serialize};

use super::any::AnyFrame;
use super::definitions::{BaseFrame, FrameId, FrameKind, SunFrame, require_obstime};
use super::representation::Components;
use super::solar::{carrington_rotation_angle, earth_inertial_position};
use crate::errors::{Error, SunrotResult};
use crate::time::{Time, UTC};

/// Add an offset to the longitude of spherical components.
fn shift_longitude(data: &Components, offset: f64) -> SunrotResult<Components> {
    let [lon, lat, r] = data.clone().into_inner();
    Components::new(lon.into_iter().map(|l| l + offset).collect(), lat, r)
}

/// Error for a conversion from an [`AnyFrame`] of the wrong type.
pub(super) fn type_mismatch(expected: FrameKind, found: &AnyFrame) -> Error {
    Error::ValueError(format!(
        "Expected a {expected} frame, found {}.",
        found.frame_id()
    ))
}

/// Heliographic Stonyhurst frame.
///
/// Components are (lon, lat, radius), longitude in `[-180, 180)` degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeliographicStonyhurst {
    /// Observation time.
    pub obstime: Option<Time<UTC>>,

    data: Option<Components>,
}

impl HeliographicStonyhurst {
    /// Frame without data at the provided observation time.
    pub fn new(obstime: Option<Time<UTC>>) -> Self {
        Self {
            obstime,
            data: None,
        }
    }

    /// Rotation from Stonyhurst longitude to inertial longitude at a given time.
    pub(crate) fn inertial_offset(obstime: Time<UTC>) -> f64 {
        earth_inertial_position(obstime.tdb()).0
    }
}

impl SunFrame for HeliographicStonyhurst {
    fn frame_id(&self) -> FrameId {
        FrameId::Base(FrameKind::HeliographicStonyhurst)
    }

    fn obstime(&self) -> Option<Time<UTC>> {
        self.obstime
    }

    fn data(&self) -> Option<&Components> {
        self.data.as_ref()
    }

    fn take_data(&mut self) -> Option<Components> {
        self.data.take()
    }

    fn realize_frame(&self, mut data: Components) -> Self {
        self.layout().wrap(&mut data);
        Self {
            obstime: self.obstime,
            data: Some(data),
        }
    }

    fn into_any(self) -> AnyFrame {
        AnyFrame::HeliographicStonyhurst(self)
    }

    fn try_from_any(frame: AnyFrame) -> SunrotResult<Self> {
        match frame {
            AnyFrame::HeliographicStonyhurst(frame) => Ok(frame),
            other => Err(type_mismatch(FrameKind::HeliographicStonyhurst, &other)),
        }
    }
}

impl BaseFrame for HeliographicStonyhurst {
    fn to_inertial(&self, data: &Components) -> SunrotResult<Components> {
        let obstime = require_obstime(self.obstime, self.frame_id())?;
        shift_longitude(data, Self::inertial_offset(obstime))
    }

    fn from_inertial(&self, inertial: &Components) -> SunrotResult<Components> {
        let obstime = require_obstime(self.obstime, self.frame_id())?;
        shift_longitude(inertial, -Self::inertial_offset(obstime))
    }
}

/// Heliographic Carrington frame.
///
/// Components are (lon, lat, radius), longitude in `[0, 360)` degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeliographicCarrington {
    /// Observation time.
    pub obstime: Option<Time<UTC>>,

    data: Option<Components>,
}

impl HeliographicCarrington {
    /// Frame without data at the provided observation time.
    pub fn new(obstime: Option<Time<UTC>>) -> Self {
        Self {
            obstime,
            data: None,
        }
    }
}

impl SunFrame for HeliographicCarrington {
    fn frame_id(&self) -> FrameId {
        FrameId::Base(FrameKind::HeliographicCarrington)
    }

    fn obstime(&self) -> Option<Time<UTC>> {
        self.obstime
    }

    fn data(&self) -> Option<&Components> {
        self.data.as_ref()
    }

    fn take_data(&mut self) -> Option<Components> {
        self.data.take()
    }

    fn realize_frame(&self, mut data: Components) -> Self {
        self.layout().wrap(&mut data);
        Self {
            obstime: self.obstime,
            data: Some(data),
        }
    }

    fn into_any(self) -> AnyFrame {
        AnyFrame::HeliographicCarrington(self)
    }

    fn try_from_any(frame: AnyFrame) -> SunrotResult<Self> {
        match frame {
            AnyFrame::HeliographicCarrington(frame) => Ok(frame),
            other => Err(type_mismatch(FrameKind::HeliographicCarrington, &other)),
        }
    }
}

impl BaseFrame for HeliographicCarrington {
    fn to_inertial(&self, data: &Components) -> SunrotResult<Components> {
        let obstime = require_obstime(self.obstime, self.frame_id())?;
        shift_longitude(data, carrington_rotation_angle(obstime.tdb()))
    }

    fn from_inertial(&self, inertial: &Components) -> SunrotResult<Components> {
        let obstime = require_obstime(self.obstime, self.frame_id())?;
        shift_longitude(inertial, -carrington_rotation_angle(obstime.tdb()))
    }
}

/// Heliocentric Inertial frame.
///
/// Components are (lon, lat, distance), longitude in `[0, 360)` degrees. The
/// orientation of this frame does not depend on time, the observation time is
/// carried along but is not required for conversions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeliocentricInertial {
    /// Observation time.
    pub obstime: Option<Time<UTC>>,

    data: Option<Components>,
}

impl HeliocentricInertial {
    /// Frame without data at the provided observation time.
    pub fn new(obstime: Option<Time<UTC>>) -> Self {
        Self {
            obstime,
            data: None,
        }
    }
}

impl SunFrame for HeliocentricInertial {
    fn frame_id(&self) -> FrameId {
        FrameId::Base(FrameKind::HeliocentricInertial)
    }

    fn obstime(&self) -> Option<Time<UTC>> {
        self.obstime
    }

    fn data(&self) -> Option<&Components> {
        self.data.as_ref()
    }

    fn take_data(&mut self) -> Option<Components> {
        self.data.take()
    }

    fn realize_frame(&self, mut data: Components) -> Self {
        self.layout().wrap(&mut data);
        Self {
            obstime: self.obstime,
            data: Some(data),
        }
    }

    fn into_any(self) -> AnyFrame {
        AnyFrame::HeliocentricInertial(self)
    }

    fn try_from_any(frame: AnyFrame) -> SunrotResult<Self> {
        match frame {
            AnyFrame::HeliocentricInertial(frame) => Ok(frame),
            other => Err(type_mismatch(FrameKind::HeliocentricInertial, &other)),
        }
    }
}

impl BaseFrame for HeliocentricInertial {
    fn to_inertial(&self, data: &Components) -> SunrotResult<Components> {
        Ok(data.clone())
    }

    fn from_inertial(&self, inertial: &Components) -> SunrotResult<Components> {
        Ok(inertial.clone())
    }
}
