//! Frame identifiers and the traits shared by every solar frame.
//!
//! Every frame provides conversions to and from the heliocentric inertial frame
//! (HCI), which is the canonical non-rotating frame of this crate. HCI is treated
//! as spherical (lon, lat, distance) with the z axis along the solar rotation axis
//! and longitude measured from the ascending node of the solar equator on the
//! ecliptic.
//!
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use super::any::AnyFrame;
use super::representation::{ComponentLayout, Components, Representation};
use super::solar::{b0, sun_earth_distance};
use crate::errors::{Error, SunrotResult};
use crate::graph::transform_any;
use crate::time::{Time, UTC};

/// Base frame families supported by the transform graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrameKind {
    /// Heliographic Stonyhurst, longitude zero is the Sun-Earth line.
    HeliographicStonyhurst,

    /// Heliographic Carrington, rotates with the Sun at the Carrington rate.
    HeliographicCarrington,

    /// Heliocentric Inertial, does not rotate.
    HeliocentricInertial,

    /// Observer centered Heliocentric Cartesian.
    Heliocentric,

    /// Observer centered Helioprojective.
    Helioprojective,
}

impl FrameKind {
    /// All base frame families.
    pub const ALL: [Self; 5] = [
        Self::HeliographicStonyhurst,
        Self::HeliographicCarrington,
        Self::HeliocentricInertial,
        Self::Heliocentric,
        Self::Helioprojective,
    ];

    /// Name of the frame family.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::HeliographicStonyhurst => "HeliographicStonyhurst",
            Self::HeliographicCarrington => "HeliographicCarrington",
            Self::HeliocentricInertial => "HeliocentricInertial",
            Self::Heliocentric => "Heliocentric",
            Self::Helioprojective => "Helioprojective",
        }
    }

    /// Component layout of the frame family.
    #[must_use]
    pub fn layout(self) -> ComponentLayout {
        let (names, representation, wrap_degrees) = match self {
            Self::HeliographicStonyhurst => {
                (["lon", "lat", "radius"], Representation::Spherical, Some(180))
            }
            Self::HeliographicCarrington => {
                (["lon", "lat", "radius"], Representation::Spherical, Some(360))
            }
            Self::HeliocentricInertial => {
                (["lon", "lat", "distance"], Representation::Spherical, Some(360))
            }
            Self::Heliocentric => (["x", "y", "z"], Representation::Cartesian, None),
            Self::Helioprojective => {
                (["Tx", "Ty", "distance"], Representation::Spherical, Some(180))
            }
        };
        ComponentLayout {
            names,
            representation,
            wrap_degrees,
        }
    }

    /// Names of the frame attributes of the family.
    #[must_use]
    pub fn attributes(self) -> &'static [&'static str] {
        match self {
            Self::HeliographicStonyhurst
            | Self::HeliographicCarrington
            | Self::HeliocentricInertial => &["obstime"],
            Self::Heliocentric | Self::Helioprojective => &["obstime", "observer"],
        }
    }
}

impl Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Node of the transform graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrameId {
    /// One of the base frame families.
    Base(FrameKind),

    /// A base frame family rotated by solar differential rotation.
    RotatedSun(FrameKind),
}

impl FrameId {
    /// The frame family this id belongs to.
    #[must_use]
    pub fn kind(self) -> FrameKind {
        match self {
            Self::Base(kind) | Self::RotatedSun(kind) => kind,
        }
    }

    /// Is this frame a kind of the other frame.
    ///
    /// Every frame is a kind of itself, and a rotated frame is a kind of its base.
    ///
    /// ```
    ///     use sunrot_core::frames::{FrameId, FrameKind};
    ///
    ///     let hgs = FrameKind::HeliographicStonyhurst;
    ///     assert!(FrameId::RotatedSun(hgs).is_kind_of(FrameId::Base(hgs)));
    ///     assert!(!FrameId::Base(hgs).is_kind_of(FrameId::RotatedSun(hgs)));
    /// ```
    #[must_use]
    pub fn is_kind_of(self, other: Self) -> bool {
        match (self, other) {
            (Self::RotatedSun(a), Self::Base(b)) => a == b,
            _ => self == other,
        }
    }

    /// True for the base frame families.
    #[must_use]
    pub fn is_base(self) -> bool {
        matches!(self, Self::Base(_))
    }

    /// Name of the frame.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Base(kind) => kind.name().to_string(),
            Self::RotatedSun(kind) => format!("RotatedSun{}", kind.name()),
        }
    }

    /// Component layout, rotated frames share the layout of their base.
    #[must_use]
    pub fn layout(self) -> ComponentLayout {
        self.kind().layout()
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Location of the observer of an observer centered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Observer {
    /// The center of the Earth at the observation time of the frame.
    Earth,

    /// Fixed Heliographic Stonyhurst position.
    Stonyhurst {
        /// Longitude in radians.
        lon: f64,

        /// Latitude in radians.
        lat: f64,

        /// Distance from the center of the Sun in AU.
        radius: f64,
    },
}

impl Observer {
    /// Stonyhurst position (lon, lat, radius) of the observer.
    #[must_use]
    pub fn resolve(&self, obstime: Time<UTC>) -> (f64, f64, f64) {
        match *self {
            Self::Earth => {
                let time = obstime.tdb();
                (0.0, b0(time), sun_earth_distance(time))
            }
            Self::Stonyhurst { lon, lat, radius } => (lon, lat, radius),
        }
    }
}

/// Return the observation time or fail with [`Error::MissingObstime`].
pub(crate) fn require_obstime(
    obstime: Option<Time<UTC>>,
    frame: FrameId,
) -> SunrotResult<Time<UTC>> {
    obstime.ok_or_else(|| {
        Error::MissingObstime(format!("{frame} requires an observation time."))
    })
}

/// Common interface of every frame in the transform graph.
///
/// Frames are values, a frame may or may not hold coordinate data. The frame
/// attributes are immutable after construction, new frames are created with
/// [`SunFrame::realize_frame`] or [`SunFrame::without_data`].
pub trait SunFrame: Debug + Clone + PartialEq + Send + Sync {
    /// Node of the transform graph this frame belongs to.
    fn frame_id(&self) -> FrameId;

    /// Component layout of this frame.
    fn layout(&self) -> ComponentLayout {
        self.frame_id().layout()
    }

    /// Observation time of the frame.
    fn obstime(&self) -> Option<Time<UTC>>;

    /// Coordinate data held by the frame.
    fn data(&self) -> Option<&Components>;

    /// Does this frame hold coordinate data.
    fn has_data(&self) -> bool {
        self.data().is_some()
    }

    /// Remove the coordinate data from the frame, returning it.
    fn take_data(&mut self) -> Option<Components>;

    /// Copy of this frame holding the provided data.
    ///
    /// Longitudes are wrapped into the range of the frame's layout.
    fn realize_frame(&self, data: Components) -> Self;

    /// Copy of this frame without any data.
    fn without_data(&self) -> Self {
        let mut frame = self.clone();
        let _ = frame.take_data();
        frame
    }

    /// Convert into the type erased [`AnyFrame`].
    fn into_any(self) -> AnyFrame;

    /// Convert back from an [`AnyFrame`].
    ///
    /// # Errors
    /// Fails with [`Error::ValueError`] if the frame is of a different type.
    fn try_from_any(frame: AnyFrame) -> SunrotResult<Self>;

    /// Transform the data of this frame into the target frame.
    ///
    /// The attributes of the target are kept, its data (if any) is replaced.
    ///
    /// # Errors
    /// Fails if there is no data, no route between the frames, or if any step of
    /// the route fails.
    fn transform_to<T: SunFrame>(&self, target: &T) -> SunrotResult<T> {
        let result = transform_any(&self.clone().into_any(), &target.clone().into_any())?;
        T::try_from_any(result)
    }
}

/// A frame which can be converted to and from the heliocentric inertial frame.
pub trait BaseFrame: SunFrame {
    /// Convert components of this frame to spherical HCI components.
    ///
    /// # Errors
    /// Fails if the frame attributes do not define the conversion.
    fn to_inertial(&self, data: &Components) -> SunrotResult<Components>;

    /// Convert spherical HCI components to components of this frame.
    ///
    /// # Errors
    /// Fails if the frame attributes do not define the conversion.
    #[allow(clippy::wrong_self_convention, reason = "Frame attributes are required.")]
    fn from_inertial(&self, inertial: &Components) -> SunrotResult<Components>;
}
