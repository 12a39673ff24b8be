//! Type erased frames.
//!
//! The transform graph stores plain function pointers, so every frame passes
//! through it as an [`AnyFrame`].
use super::definitions::{BaseFrame, FrameId, FrameKind, Observer, SunFrame};
use super::heliocentric::{Heliocentric, Helioprojective};
use super::heliographic::{HeliocentricInertial, HeliographicCarrington, HeliographicStonyhurst};
use super::representation::Components;
use crate::errors::{Error, SunrotResult};
use crate::metaframes::RotatedSunFrame;
use crate::time::{Time, UTC};

/// Any frame known to the transform graph.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyFrame {
    /// Heliographic Stonyhurst.
    HeliographicStonyhurst(HeliographicStonyhurst),

    /// Heliographic Carrington.
    HeliographicCarrington(HeliographicCarrington),

    /// Heliocentric Inertial.
    HeliocentricInertial(HeliocentricInertial),

    /// Heliocentric Cartesian.
    Heliocentric(Heliocentric),

    /// Helioprojective.
    Helioprojective(Helioprojective),

    /// Any of the above rotated by solar differential rotation.
    RotatedSun(Box<RotatedSunFrame<AnyFrame>>),
}

impl AnyFrame {
    /// Construct a base frame of the given kind without data.
    ///
    /// Observer centered frames are constructed for an Earth observer.
    pub fn base(kind: FrameKind, obstime: Option<Time<UTC>>) -> Self {
        match kind {
            FrameKind::HeliographicStonyhurst => HeliographicStonyhurst::new(obstime).into_any(),
            FrameKind::HeliographicCarrington => HeliographicCarrington::new(obstime).into_any(),
            FrameKind::HeliocentricInertial => HeliocentricInertial::new(obstime).into_any(),
            FrameKind::Heliocentric => Heliocentric::new(obstime, Observer::Earth).into_any(),
            FrameKind::Helioprojective => {
                Helioprojective::new(obstime, Observer::Earth).into_any()
            }
        }
    }

    /// Frame used as a waypoint when a transform is routed through the graph.
    ///
    /// Rotated waypoints carry no rotation.
    ///
    /// # Errors
    /// Fails if a rotated waypoint is requested without an observation time.
    pub fn intermediate(id: FrameId, obstime: Option<Time<UTC>>) -> SunrotResult<Self> {
        match id {
            FrameId::Base(kind) => Ok(Self::base(kind, obstime)),
            FrameId::RotatedSun(kind) => Ok(RotatedSunFrame::new(Self::base(kind, obstime))?
                .into_any()),
        }
    }

    /// The rotated frame held by this frame, if any.
    #[must_use]
    pub fn as_rotated(&self) -> Option<&RotatedSunFrame<Self>> {
        match self {
            Self::RotatedSun(frame) => Some(frame.as_ref()),
            _ => None,
        }
    }

    fn not_a_base(&self) -> Error {
        Error::InvalidBase(format!("{} is not a base frame.", self.frame_id()))
    }
}

impl SunFrame for AnyFrame {
    fn frame_id(&self) -> FrameId {
        match self {
            Self::HeliographicStonyhurst(frame) => frame.frame_id(),
            Self::HeliographicCarrington(frame) => frame.frame_id(),
            Self::HeliocentricInertial(frame) => frame.frame_id(),
            Self::Heliocentric(frame) => frame.frame_id(),
            Self::Helioprojective(frame) => frame.frame_id(),
            Self::RotatedSun(frame) => frame.frame_id(),
        }
    }

    fn obstime(&self) -> Option<Time<UTC>> {
        match self {
            Self::HeliographicStonyhurst(frame) => frame.obstime(),
            Self::HeliographicCarrington(frame) => frame.obstime(),
            Self::HeliocentricInertial(frame) => frame.obstime(),
            Self::Heliocentric(frame) => frame.obstime(),
            Self::Helioprojective(frame) => frame.obstime(),
            Self::RotatedSun(frame) => frame.obstime(),
        }
    }

    fn data(&self) -> Option<&Components> {
        match self {
            Self::HeliographicStonyhurst(frame) => frame.data(),
            Self::HeliographicCarrington(frame) => frame.data(),
            Self::HeliocentricInertial(frame) => frame.data(),
            Self::Heliocentric(frame) => frame.data(),
            Self::Helioprojective(frame) => frame.data(),
            Self::RotatedSun(frame) => frame.data(),
        }
    }

    fn take_data(&mut self) -> Option<Components> {
        match self {
            Self::HeliographicStonyhurst(frame) => frame.take_data(),
            Self::HeliographicCarrington(frame) => frame.take_data(),
            Self::HeliocentricInertial(frame) => frame.take_data(),
            Self::Heliocentric(frame) => frame.take_data(),
            Self::Helioprojective(frame) => frame.take_data(),
            Self::RotatedSun(frame) => frame.take_data(),
        }
    }

    fn realize_frame(&self, data: Components) -> Self {
        match self {
            Self::HeliographicStonyhurst(frame) => frame.realize_frame(data).into_any(),
            Self::HeliographicCarrington(frame) => frame.realize_frame(data).into_any(),
            Self::HeliocentricInertial(frame) => frame.realize_frame(data).into_any(),
            Self::Heliocentric(frame) => frame.realize_frame(data).into_any(),
            Self::Helioprojective(frame) => frame.realize_frame(data).into_any(),
            Self::RotatedSun(frame) => Self::RotatedSun(Box::new(frame.realize_frame(data))),
        }
    }

    fn into_any(self) -> Self {
        self
    }

    fn try_from_any(frame: Self) -> SunrotResult<Self> {
        Ok(frame)
    }
}

impl BaseFrame for AnyFrame {
    fn to_inertial(&self, data: &Components) -> SunrotResult<Components> {
        match self {
            Self::HeliographicStonyhurst(frame) => frame.to_inertial(data),
            Self::HeliographicCarrington(frame) => frame.to_inertial(data),
            Self::HeliocentricInertial(frame) => frame.to_inertial(data),
            Self::Heliocentric(frame) => frame.to_inertial(data),
            Self::Helioprojective(frame) => frame.to_inertial(data),
            Self::RotatedSun(_) => Err(self.not_a_base()),
        }
    }

    fn from_inertial(&self, inertial: &Components) -> SunrotResult<Components> {
        match self {
            Self::HeliographicStonyhurst(frame) => frame.from_inertial(inertial),
            Self::HeliographicCarrington(frame) => frame.from_inertial(inertial),
            Self::HeliocentricInertial(frame) => frame.from_inertial(inertial),
            Self::Heliocentric(frame) => frame.from_inertial(inertial),
            Self::Helioprojective(frame) => frame.from_inertial(inertial),
            Self::RotatedSun(_) => Err(self.not_a_base()),
        }
    }
}

impl From<HeliographicStonyhurst> for AnyFrame {
    fn from(frame: HeliographicStonyhurst) -> Self {
        frame.into_any()
    }
}

impl From<HeliographicCarrington> for AnyFrame {
    fn from(frame: HeliographicCarrington) -> Self {
        frame.into_any()
    }
}

impl From<HeliocentricInertial> for AnyFrame {
    fn from(frame: HeliocentricInertial) -> Self {
        frame.into_any()
    }
}

impl From<Heliocentric> for AnyFrame {
    fn from(frame: Heliocentric) -> Self {
        frame.into_any()
    }
}

impl From<Helioprojective> for AnyFrame {
    fn from(frame: Helioprojective) -> Self {
        frame.into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_constructors() {
        let time = Time::<UTC>::from_iso("2001-01-01").unwrap();
        for kind in FrameKind::ALL {
            let frame = AnyFrame::base(kind, Some(time));
            assert!(frame.frame_id() == FrameId::Base(kind));
            assert!(frame.obstime() == Some(time));
            assert!(!frame.has_data());

            let rotated = AnyFrame::intermediate(FrameId::RotatedSun(kind), Some(time)).unwrap();
            assert!(rotated.frame_id() == FrameId::RotatedSun(kind));
            assert!(rotated.as_rotated().unwrap().duration().unwrap().is_zero());
        }
    }

    #[test]
    fn test_rotated_is_not_a_base() {
        let time = Time::<UTC>::from_iso("2001-01-01").unwrap();
        let rotated = AnyFrame::intermediate(
            FrameId::RotatedSun(FrameKind::HeliographicStonyhurst),
            Some(time),
        )
        .unwrap();
        let data = Components::from_point(0.0, 0.0, 1.0);
        assert!(matches!(rotated.to_inertial(&data), Err(Error::InvalidBase(_))));
    }
}
