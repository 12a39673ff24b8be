//! Frames which are built on top of the base solar frames.
//!
//! [`RotatedSunFrame`] accounts for solar differential rotation. The rotated frame
//! type of each base family is constructed lazily by [`rotated_sun_type`], which
//! also registers the conversions between the rotated frame and its base in the
//! global transform graph.
//!

mod rotated;
mod synthesis;
mod transforms;

pub use rotated::{RotatedSunFrame, RotatedSunFrameBuilder};
pub use synthesis::{ROTATED_SUN_CACHE, RotatedSunType, cached_rotated_types, rotated_sun_type};
pub use transforms::{
    RotationParams, base_to_rotatedsun, rotate, rotatedsun_to_base, rotatedsun_to_rotatedsun,
};
