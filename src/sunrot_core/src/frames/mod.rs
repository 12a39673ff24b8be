//! Solar coordinate frames and related conversions.
//!
//! Angles are in radians, distances in AU, times are UTC observation times.
//!

mod any;
mod definitions;
mod heliocentric;
mod heliographic;
mod representation;
pub mod solar;

pub use any::AnyFrame;
pub use definitions::{BaseFrame, FrameId, FrameKind, Observer, SunFrame};
pub(crate) use definitions::require_obstime;
pub use heliocentric::{Heliocentric, Helioprojective};
pub use heliographic::{HeliocentricInertial, HeliographicCarrington, HeliographicStonyhurst};
pub use representation::{ComponentLayout, Components, Representation};
