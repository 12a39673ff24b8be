//! # sunrot Core
//! Coordinate frames of the Sun which account for solar differential rotation.
//!
//! A [`metaframes::RotatedSunFrame`] wraps any of the base solar frames in
//! [`frames`], rotating its coordinates by a duration under one of the rotation
//! models in [`diff_rot`]. Rotated frame types are constructed on first use and
//! registered in the global [`graph::TRANSFORM_GRAPH`], after which coordinates
//! may be transformed freely between rotated and unrotated frames.
//!
//! ```
//!     use sunrot_core::prelude::*;
//!
//!     let obstime = Time::<UTC>::from_iso("2001-01-01").unwrap();
//!     let base = HeliographicStonyhurst::new(Some(obstime))
//!         .realize_frame(Components::from_degrees(1.0, 2.0, 1.0));
//!
//!     let rotated = RotatedSunFrame::builder()
//!         .base(base)
//!         .duration(Duration::new(4.0))
//!         .build()
//!         .unwrap();
//!
//!     // Feature location 4 days later, expressed at the original time.
//!     let later = rotated
//!         .transform_to(&HeliographicStonyhurst::new(Some(obstime)))
//!         .unwrap();
//!     let lon = later.data().unwrap().point(0)[0].to_degrees();
//!     assert!(lon > 50.0 && lon < 60.0);
//! ```
//!

pub mod constants;
pub mod diff_rot;
pub mod errors;
pub mod frames;
pub mod graph;
pub mod metaframes;
pub mod time;
pub mod util;

/// Common useful imports
pub mod prelude {
    pub use crate::diff_rot::{FrameTime, diff_rot, register_rotation_model, rotation_rate};
    pub use crate::errors::{Error, SunrotResult};
    pub use crate::frames::{
        AnyFrame, BaseFrame, Components, FrameId, FrameKind, Heliocentric,
        HeliocentricInertial, HeliographicCarrington, HeliographicStonyhurst, Helioprojective,
        Observer, SunFrame,
    };
    pub use crate::graph::{TRANSFORM_GRAPH, transform_any};
    pub use crate::metaframes::{RotatedSunFrame, rotated_sun_type};
    pub use crate::time::{Duration, TDB, Time, UTC};
}
