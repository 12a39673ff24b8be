//! Frames rotated by solar differential rotation.
//!
use std::sync::Arc;

use super::synthesis::{RotatedSunType, rotated_sun_type};
use super::transforms::RotationParams;
use crate::errors::{Error, SunrotResult};
use crate::frames::{AnyFrame, BaseFrame, Components, FrameId, SunFrame, require_obstime};
use crate::time::{Duration, TDB, Time, UTC};

/// A base frame rotated by solar differential rotation over a duration.
///
/// Coordinates are given in the components of the base frame at its observation
/// time, and describe a feature which will be at that location once it has rotated
/// for the duration. The observation time of the base is required.
///
/// Component data of the base is moved into the rotated frame on construction, the
/// stored base never holds any data.
///
/// The duration is either a single value applied to every point, or one value per
/// point.
///
/// ```
///     use sunrot_core::prelude::*;
///
///     let obstime = Time::<UTC>::from_iso("2001-01-02").unwrap();
///     let base = HeliographicStonyhurst::new(Some(obstime));
///
///     let frame = RotatedSunFrame::builder()
///         .base(base)
///         .rotated_time(Time::<UTC>::from_iso("2001-01-01").unwrap())
///         .rotation_model("allen")
///         .build()
///         .unwrap();
///     assert!((frame.duration().unwrap().days() + 1.0).abs() < 1e-8);
///     assert!(frame.rotation_model() == "allen");
/// ```
#[derive(Debug, Clone)]
pub struct RotatedSunFrame<B> {
    base: B,
    obstime: Time<UTC>,
    durations: Vec<Duration<TDB>>,
    rotation_model: String,
    data: Option<Components>,
    class: Arc<RotatedSunType>,
}

impl<B: PartialEq> PartialEq for RotatedSunFrame<B> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
            && self.durations == other.durations
            && self.rotation_model == other.rotation_model
            && self.data == other.data
    }
}

/// Builder of a [`RotatedSunFrame`].
#[derive(Debug, Clone)]
#[must_use]
pub struct RotatedSunFrameBuilder<B> {
    base: Option<B>,
    durations: Option<Vec<Duration<TDB>>>,
    rotated_time: Option<Time<UTC>>,
    rotation_model: Option<String>,
    components: Option<Components>,
}

impl<B> Default for RotatedSunFrameBuilder<B> {
    fn default() -> Self {
        Self {
            base: None,
            durations: None,
            rotated_time: None,
            rotation_model: None,
            components: None,
        }
    }
}

impl<B: BaseFrame> RotatedSunFrameBuilder<B> {
    /// Frame which is rotated, along with its data if it has any.
    pub fn base(mut self, base: B) -> Self {
        self.base = Some(base);
        self
    }

    /// Duration of the rotation, applied to every point.
    pub fn duration(mut self, duration: Duration<TDB>) -> Self {
        self.durations = Some(vec![duration]);
        self
    }

    /// Duration of the rotation of each point.
    pub fn durations(mut self, durations: Vec<Duration<TDB>>) -> Self {
        self.durations = Some(durations);
        self
    }

    /// Time to rotate to, the duration is measured from the base observation time.
    pub fn rotated_time(mut self, rotated_time: Time<UTC>) -> Self {
        self.rotated_time = Some(rotated_time);
        self
    }

    /// Name of the rotation model.
    pub fn rotation_model(mut self, model: impl Into<String>) -> Self {
        self.rotation_model = Some(model.into());
        self
    }

    /// Coordinate data, for a base which holds none.
    pub fn components(mut self, components: Components) -> Self {
        self.components = Some(components);
        self
    }

    /// Validate the inputs and construct the frame.
    ///
    /// The rotation model is not checked here, unknown models fail when the frame
    /// is transformed.
    ///
    /// # Errors
    /// - [`Error::MissingBase`] if no base was provided.
    /// - [`Error::InvalidBase`] if the base is not one of the base frame families.
    /// - [`Error::MissingObstime`] if the base has no observation time.
    /// - [`Error::ValueError`] if both a duration and rotated time are provided, if
    ///   both the base and the builder provide data, or if per point durations do
    ///   not match the number of points.
    pub fn build(self) -> SunrotResult<RotatedSunFrame<B>> {
        let Some(mut base) = self.base else {
            return Err(Error::MissingBase(
                "A base frame must be provided to construct a rotated frame.".into(),
            ));
        };

        let id = base.frame_id();
        if !id.is_base() {
            return Err(Error::InvalidBase(format!(
                "{id} is not a supported base frame."
            )));
        }
        let obstime = require_obstime(base.obstime(), id)?;

        let durations = match (self.durations, self.rotated_time) {
            (Some(_), Some(_)) => {
                return Err(Error::ValueError(
                    "Only one of duration or rotated time may be provided.".into(),
                ));
            }
            (Some(durations), None) => durations,
            (None, Some(rotated_time)) => vec![rotated_time - obstime],
            (None, None) => vec![Duration::zero()],
        };
        if durations.is_empty() {
            return Err(Error::ValueError("At least one duration is required.".into()));
        }

        let data = match (base.take_data(), self.components) {
            (Some(_), Some(_)) => {
                return Err(Error::ValueError(
                    "Data was provided by both the base frame and the components.".into(),
                ));
            }
            (data, components) => data.or(components),
        };
        let data = data.map(|mut data| {
            base.layout().wrap(&mut data);
            data
        });
        if let Some(data) = &data {
            if durations.len() != 1 && durations.len() != data.len() {
                return Err(Error::ValueError(format!(
                    "{} durations were provided for {} points.",
                    durations.len(),
                    data.len()
                )));
            }
        }

        let class = rotated_sun_type(id)?;
        let rotation_model = self
            .rotation_model
            .unwrap_or_else(|| class.default_rotation_model().to_string());

        Ok(RotatedSunFrame {
            base,
            obstime,
            durations,
            rotation_model,
            data,
            class,
        })
    }
}

impl<B: BaseFrame> RotatedSunFrame<B> {
    /// Start building a new rotated frame.
    pub fn builder() -> RotatedSunFrameBuilder<B> {
        RotatedSunFrameBuilder::default()
    }

    /// Rotated frame with no rotation, taking the data of the base.
    ///
    /// # Errors
    /// See [`RotatedSunFrameBuilder::build`].
    pub fn new(base: B) -> SunrotResult<Self> {
        Self::builder().base(base).build()
    }

    /// The base frame, without data.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Rotation duration, if a single duration applies to every point.
    #[must_use]
    pub fn duration(&self) -> Option<Duration<TDB>> {
        match self.durations.as_slice() {
            [duration] => Some(*duration),
            _ => None,
        }
    }

    /// Rotation durations, a single value or one value per point.
    #[must_use]
    pub fn durations(&self) -> &[Duration<TDB>] {
        &self.durations
    }

    /// Name of the rotation model.
    #[must_use]
    pub fn rotation_model(&self) -> &str {
        &self.rotation_model
    }

    /// Time the frame is rotated to, the base observation time plus the duration.
    ///
    /// None if the frame has a duration per point, see [`Self::rotated_times`].
    #[must_use]
    pub fn rotated_time(&self) -> Option<Time<UTC>> {
        self.duration().map(|duration| self.obstime + duration)
    }

    /// Times each of the durations rotate to.
    #[must_use]
    pub fn rotated_times(&self) -> Vec<Time<UTC>> {
        self.durations
            .iter()
            .map(|duration| self.obstime + *duration)
            .collect()
    }

    /// Type of this rotated frame.
    #[must_use]
    pub fn rotated_type(&self) -> &Arc<RotatedSunType> {
        &self.class
    }

    /// Values of the named component, if the frame holds data.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&[f64]> {
        let idx = self.layout().index_of(name)?;
        self.data.as_ref().map(|data| data.component(idx))
    }

    /// Rotation carried by this frame.
    pub fn params(&self) -> RotationParams {
        RotationParams::per_point(self.durations.clone(), self.rotation_model.clone())
    }

    /// The base frame holding the data of this frame, no rotation is applied.
    pub fn as_base(&self) -> B {
        match &self.data {
            Some(data) => self.base.realize_frame(data.clone()),
            None => self.base.clone(),
        }
    }
}

impl<B: BaseFrame> SunFrame for RotatedSunFrame<B> {
    fn frame_id(&self) -> FrameId {
        self.class.frame_id()
    }

    fn obstime(&self) -> Option<Time<UTC>> {
        Some(self.obstime)
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
            base: self.base.clone(),
            obstime: self.obstime,
            durations: self.durations.clone(),
            rotation_model: self.rotation_model.clone(),
            data: Some(data),
            class: Arc::clone(&self.class),
        }
    }

    fn into_any(self) -> AnyFrame {
        AnyFrame::RotatedSun(Box::new(RotatedSunFrame {
            base: self.base.into_any(),
            obstime: self.obstime,
            durations: self.durations,
            rotation_model: self.rotation_model,
            data: self.data,
            class: self.class,
        }))
    }

    fn try_from_any(frame: AnyFrame) -> SunrotResult<Self> {
        let frame = match frame {
            AnyFrame::RotatedSun(frame) => *frame,
            other => {
                return Err(Error::ValueError(format!(
                    "Expected a rotated frame, found {}.",
                    other.frame_id()
                )));
            }
        };
        Ok(Self {
            base: B::try_from_any(frame.base)?,
            obstime: frame.obstime,
            durations: frame.durations,
            rotation_model: frame.rotation_model,
            data: frame.data,
            class: frame.class,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{FrameKind, HeliographicCarrington, HeliographicStonyhurst};

    fn obstime() -> Time<UTC> {
        Time::<UTC>::from_iso("2001-01-01").unwrap()
    }

    #[test]
    fn test_missing_base() {
        let result = RotatedSunFrame::<HeliographicStonyhurst>::builder().build();
        assert!(matches!(result, Err(Error::MissingBase(_))));
    }

    #[test]
    fn test_missing_obstime() {
        let result = RotatedSunFrame::new(HeliographicStonyhurst::new(None));
        assert!(matches!(result, Err(Error::MissingObstime(_))));
    }

    #[test]
    fn test_nested_is_invalid() {
        let inner = RotatedSunFrame::new(HeliographicStonyhurst::new(Some(obstime())))
            .unwrap()
            .into_any();
        let result = RotatedSunFrame::new(inner);
        assert!(matches!(result, Err(Error::InvalidBase(_))));
    }

    #[test]
    fn test_conflicting_inputs() {
        let base = HeliographicStonyhurst::new(Some(obstime()));
        let result = RotatedSunFrame::builder()
            .base(base.clone())
            .duration(Duration::new(1.0))
            .rotated_time(obstime())
            .build();
        assert!(matches!(result, Err(Error::ValueError(_))));

        let result = RotatedSunFrame::builder()
            .base(base.realize_frame(Components::from_degrees(1.0, 2.0, 3.0)))
            .components(Components::from_degrees(1.0, 2.0, 3.0))
            .build();
        assert!(matches!(result, Err(Error::ValueError(_))));
    }

    #[test]
    fn test_defaults() {
        let frame = RotatedSunFrame::new(HeliographicStonyhurst::new(Some(obstime()))).unwrap();
        assert!(frame.duration().unwrap().is_zero());
        assert!(frame.rotation_model() == "howard");
        assert!((frame.rotated_time().unwrap() - obstime()).days().abs() < 1e-8);
        assert!(!frame.has_data());
        assert!(frame.component("lon").is_none());
        assert!(frame.frame_id() == FrameId::RotatedSun(FrameKind::HeliographicStonyhurst));
    }

    #[test]
    fn test_components() {
        let frame = RotatedSunFrame::builder()
            .base(HeliographicCarrington::new(Some(obstime())))
            .components(Components::from_degrees(-10.0, 2.0, 3.0))
            .duration(Duration::new(4.0))
            .build()
            .unwrap();

        // Carrington longitudes wrap into [0, 360).
        let lon = frame.component("lon").unwrap()[0].to_degrees();
        assert!((lon - 350.0).abs() < 1e-10);
        assert!(frame.component("radius").unwrap() == [3.0]);
        assert!(frame.component("distance").is_none());
        assert!(((frame.rotated_time().unwrap() - obstime()).days() - 4.0).abs() < 1e-8);
    }

    #[test]
    fn test_any_roundtrip() {
        let frame = RotatedSunFrame::builder()
            .base(HeliographicStonyhurst::new(Some(obstime())))
            .components(Components::from_degrees(1.0, 2.0, 3.0))
            .duration(Duration::new(4.0))
            .rotation_model("allen")
            .build()
            .unwrap();
        let any = frame.clone().into_any();
        assert!(any.frame_id() == frame.frame_id());
        let back = RotatedSunFrame::<HeliographicStonyhurst>::try_from_any(any).unwrap();
        assert!(back == frame);
        assert!(Arc::ptr_eq(back.rotated_type(), frame.rotated_type()));

        let wrong = HeliographicStonyhurst::new(Some(obstime())).into_any();
        assert!(RotatedSunFrame::<HeliographicStonyhurst>::try_from_any(wrong).is_err());
    }
}
