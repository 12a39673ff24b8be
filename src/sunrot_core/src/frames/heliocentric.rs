//! Observer centered frames.
//!
//! Both frames here are defined relative to the position of an observer, see
//! "Coordinate systems for solar image data", W. T. Thompson, A&A 449, 2006.
//!
//! [`Heliocentric`] is a Cartesian frame centered on the Sun, with the z axis
//! pointing toward the observer, the y axis in the plane containing the z axis and
//! the solar rotation axis, and the x axis toward solar west.
//!
//! [`Helioprojective`] is the spherical frame centered on the observer, with
//! angles (Tx, Ty) measured from the Sun center.
//!
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::any::AnyFrame;
use super::definitions::{BaseFrame, FrameId, FrameKind, Observer, SunFrame, require_obstime};
use super::heliographic::{HeliographicStonyhurst, type_mismatch};
use super::representation::Components;
use crate::errors::SunrotResult;
use crate::time::{Time, UTC};

/// Rotation taking Stonyhurst Cartesian vectors into the Heliocentric frame of an
/// observer at the given Stonyhurst longitude and latitude.
fn stonyhurst_to_heliocentric(lon: f64, lat: f64) -> Matrix3<f64> {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    Matrix3::new(
        -sin_lon,
        cos_lon,
        0.0,
        -sin_lat * cos_lon,
        -sin_lat * sin_lon,
        cos_lat,
        cos_lat * cos_lon,
        cos_lat * sin_lon,
        sin_lat,
    )
}

/// Heliocentric Cartesian frame.
///
/// Components are (x, y, z) in AU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heliocentric {
    /// Observation time.
    pub obstime: Option<Time<UTC>>,

    /// Observer defining the orientation of the frame.
    pub observer: Observer,

    data: Option<Components>,
}

impl Heliocentric {
    /// Frame without data for the provided observer.
    pub fn new(obstime: Option<Time<UTC>>, observer: Observer) -> Self {
        Self {
            obstime,
            observer,
            data: None,
        }
    }

    /// Stonyhurst frame at the same observation time.
    fn stonyhurst(&self) -> HeliographicStonyhurst {
        HeliographicStonyhurst::new(self.obstime)
    }

    /// Rotation to this frame from Stonyhurst Cartesian.
    fn rotation(&self) -> SunrotResult<Matrix3<f64>> {
        let obstime = require_obstime(self.obstime, self.frame_id())?;
        let (lon, lat, _) = self.observer.resolve(obstime);
        Ok(stonyhurst_to_heliocentric(lon, lat))
    }

    /// Convert Cartesian components of this frame to Stonyhurst spherical.
    fn cartesian_to_stonyhurst(&self, data: &Components) -> SunrotResult<Components> {
        let rot = self.rotation()?.transpose();
        let vecs: Vec<Vector3<f64>> = data.cartesian_to_vectors().iter().map(|v| rot * v).collect();
        Ok(Components::spherical_from_vectors(&vecs))
    }

    /// Convert Stonyhurst spherical components to Cartesian components of this frame.
    fn stonyhurst_to_cartesian(&self, data: &Components) -> SunrotResult<Components> {
        let rot = self.rotation()?;
        let vecs: Vec<Vector3<f64>> = data.spherical_to_vectors().iter().map(|v| rot * v).collect();
        Ok(Components::cartesian_from_vectors(&vecs))
    }
}

impl SunFrame for Heliocentric {
    fn frame_id(&self) -> FrameId {
        FrameId::Base(FrameKind::Heliocentric)
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

    fn realize_frame(&self, data: Components) -> Self {
        Self {
            obstime: self.obstime,
            observer: self.observer,
            data: Some(data),
        }
    }

    fn into_any(self) -> AnyFrame {
        AnyFrame::Heliocentric(self)
    }

    fn try_from_any(frame: AnyFrame) -> SunrotResult<Self> {
        match frame {
            AnyFrame::Heliocentric(frame) => Ok(frame),
            other => Err(type_mismatch(FrameKind::Heliocentric, &other)),
        }
    }
}

impl BaseFrame for Heliocentric {
    fn to_inertial(&self, data: &Components) -> SunrotResult<Components> {
        self.stonyhurst().to_inertial(&self.cartesian_to_stonyhurst(data)?)
    }

    fn from_inertial(&self, inertial: &Components) -> SunrotResult<Components> {
        self.stonyhurst_to_cartesian(&self.stonyhurst().from_inertial(inertial)?)
    }
}

/// Helioprojective frame.
///
/// Components are (Tx, Ty, distance), where Tx and Ty are in radians and the
/// distance is measured from the observer in AU. Tx is wrapped into `[-180, 180)`
/// degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Helioprojective {
    /// Observation time.
    pub obstime: Option<Time<UTC>>,

    /// Location of the observer.
    pub observer: Observer,

    data: Option<Components>,
}

impl Helioprojective {
    /// Frame without data for the provided observer.
    pub fn new(obstime: Option<Time<UTC>>, observer: Observer) -> Self {
        Self {
            obstime,
            observer,
            data: None,
        }
    }

    /// Heliocentric frame of the same observer.
    #[must_use]
    pub fn heliocentric(&self) -> Heliocentric {
        Heliocentric::new(self.obstime, self.observer)
    }

    /// Distance from the observer to the center of the Sun.
    fn observer_distance(&self) -> SunrotResult<f64> {
        let obstime = require_obstime(self.obstime, self.frame_id())?;
        Ok(self.observer.resolve(obstime).2)
    }

    /// Convert components of this frame to Heliocentric Cartesian.
    fn projective_to_heliocentric(&self, data: &Components) -> SunrotResult<Components> {
        let d0 = self.observer_distance()?;
        Ok(Components::from_points(data.points().map(|[tx, ty, d]| {
            let (sin_tx, cos_tx) = tx.sin_cos();
            let (sin_ty, cos_ty) = ty.sin_cos();
            [d * cos_ty * sin_tx, d * sin_ty, d0 - d * cos_ty * cos_tx]
        })))
    }

    /// Convert Heliocentric Cartesian components to components of this frame.
    fn heliocentric_to_projective(&self, data: &Components) -> SunrotResult<Components> {
        let d0 = self.observer_distance()?;
        let mut out = Components::from_points(data.points().map(|[x, y, z]| {
            let along = d0 - z;
            let d = (x * x + y * y + along * along).sqrt();
            let ty = if d > 0.0 { (y / d).clamp(-1.0, 1.0).asin() } else { 0.0 };
            [x.atan2(along), ty, d]
        }));
        self.layout().wrap(&mut out);
        Ok(out)
    }
}

impl SunFrame for Helioprojective {
    fn frame_id(&self) -> FrameId {
        FrameId::Base(FrameKind::Helioprojective)
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
            observer: self.observer,
            data: Some(data),
        }
    }

    fn into_any(self) -> AnyFrame {
        AnyFrame::Helioprojective(self)
    }

    fn try_from_any(frame: AnyFrame) -> SunrotResult<Self> {
        match frame {
            AnyFrame::Helioprojective(frame) => Ok(frame),
            other => Err(type_mismatch(FrameKind::Helioprojective, &other)),
        }
    }
}

impl BaseFrame for Helioprojective {
    fn to_inertial(&self, data: &Components) -> SunrotResult<Components> {
        self.heliocentric().to_inertial(&self.projective_to_heliocentric(data)?)
    }

    fn from_inertial(&self, inertial: &Components) -> SunrotResult<Components> {
        self.heliocentric_to_projective(&self.heliocentric().from_inertial(inertial)?)
    }
}
