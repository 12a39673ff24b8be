//! Construction of the rotated frame types.
//!
//! One [`RotatedSunType`] exists per base frame family for the lifetime of the
//! process. It is built the first time it is requested, at which point the three
//! transforms between the rotated frame and its base are added to the
//! [`TRANSFORM_GRAPH`].
//!
use std::collections::HashMap;
use std::sync::Arc;

use crossbeam::sync::ShardedLock;
use log::debug;

use super::transforms::{base_to_rotatedsun, rotatedsun_to_base, rotatedsun_to_rotatedsun};
use crate::constants::DEFAULT_ROTATION_MODEL;
use crate::errors::{Error, SunrotResult};
use crate::frames::{ComponentLayout, FrameId, FrameKind};
use crate::graph::TRANSFORM_GRAPH;
use crate::time::{Duration, TDB};

/// Description of a rotated frame type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatedSunType {
    base: FrameKind,
    name: String,
    layout: ComponentLayout,
    attributes: Vec<&'static str>,
}

impl RotatedSunType {
    fn new(base: FrameKind) -> Self {
        let mut attributes = base.attributes().to_vec();
        attributes.extend(["duration", "rotation_model"]);
        Self {
            base,
            name: FrameId::RotatedSun(base).name(),
            layout: base.layout(),
            attributes,
        }
    }

    /// Frame family which is rotated.
    #[must_use]
    pub fn base_kind(&self) -> FrameKind {
        self.base
    }

    /// Graph node of this frame.
    #[must_use]
    pub fn frame_id(&self) -> FrameId {
        FrameId::RotatedSun(self.base)
    }

    /// Name of the rotated frame, `RotatedSun` followed by the name of the base.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Component layout, the same as the base.
    #[must_use]
    pub fn layout(&self) -> ComponentLayout {
        self.layout
    }

    /// Names of the frame attributes, those of the base followed by `duration` and
    /// `rotation_model`.
    #[must_use]
    pub fn attributes(&self) -> &[&'static str] {
        &self.attributes
    }

    /// Is this frame a kind of the provided frame.
    #[must_use]
    pub fn is_kind_of(&self, other: FrameId) -> bool {
        self.frame_id().is_kind_of(other)
    }

    /// Duration used when none is provided.
    pub fn default_duration(&self) -> Duration<TDB> {
        Duration::zero()
    }

    /// Rotation model used when none is provided.
    #[must_use]
    pub fn default_rotation_model(&self) -> &'static str {
        DEFAULT_ROTATION_MODEL
    }
}

/// Rotated frame types which have been constructed, keyed on their base.
pub static ROTATED_SUN_CACHE: std::sync::LazyLock<
    ShardedLock<HashMap<FrameKind, Arc<RotatedSunType>>>,
> = std::sync::LazyLock::new(|| ShardedLock::new(HashMap::new()));

/// Add the transforms of a rotated frame to the global graph.
///
/// Returns the number of edges which were not already present.
fn register_transforms(kind: FrameKind) -> SunrotResult<usize> {
    let base = FrameId::Base(kind);
    let rotated = FrameId::RotatedSun(kind);

    let mut graph = TRANSFORM_GRAPH.write()?;
    let added = [
        graph.add_transform(base, rotated, base_to_rotatedsun),
        graph.add_transform(rotated, base, rotatedsun_to_base),
        graph.add_transform(rotated, rotated, rotatedsun_to_rotatedsun),
    ];
    Ok(added.into_iter().filter(|x| *x).count())
}

/// Rotated frame type of a base frame, constructing it on first use.
///
/// Repeated calls return the same shared type.
///
/// ```
///     use std::sync::Arc;
///     use sunrot_core::frames::{FrameId, FrameKind};
///     use sunrot_core::metaframes::rotated_sun_type;
///
///     let base = FrameId::Base(FrameKind::HeliographicCarrington);
///     let rotated = rotated_sun_type(base).unwrap();
///     assert!(rotated.name() == "RotatedSunHeliographicCarrington");
///     assert!(Arc::ptr_eq(&rotated, &rotated_sun_type(base).unwrap()));
/// ```
///
/// # Errors
/// [`Error::InvalidBase`] if the frame is not one of the base frame families.
pub fn rotated_sun_type(base: FrameId) -> SunrotResult<Arc<RotatedSunType>> {
    let FrameId::Base(kind) = base else {
        return Err(Error::InvalidBase(format!(
            "{base} is not a supported base frame."
        )));
    };

    if let Some(class) = ROTATED_SUN_CACHE.read()?.get(&kind) {
        return Ok(Arc::clone(class));
    }

    // Another thread may have constructed the type between the locks.
    let mut cache = ROTATED_SUN_CACHE.write()?;
    if let Some(class) = cache.get(&kind) {
        return Ok(Arc::clone(class));
    }

    let class = Arc::new(RotatedSunType::new(kind));
    debug!("Constructed frame type {}", class.name());

    let added = register_transforms(kind)?;
    debug!("Registered {added} transforms for {}", class.name());

    let _ = cache.insert(kind, Arc::clone(&class));
    Ok(class)
}

/// Base frame families whose rotated type has been constructed, sorted.
///
/// # Errors
/// Fails if the cache lock is poisoned.
pub fn cached_rotated_types() -> SunrotResult<Vec<FrameKind>> {
    let mut kinds: Vec<FrameKind> = ROTATED_SUN_CACHE.read()?.keys().copied().collect();
    kinds.sort();
    Ok(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_is_cached() {
        for kind in FrameKind::ALL {
            let first = rotated_sun_type(FrameId::Base(kind)).unwrap();
            let second = rotated_sun_type(FrameId::Base(kind)).unwrap();
            assert!(Arc::ptr_eq(&first, &second));
            assert!(cached_rotated_types().unwrap().contains(&kind));

            assert!(first.name().contains("RotatedSun"));
            assert!(first.name().contains(kind.name()));
            assert!(first.is_kind_of(FrameId::Base(kind)));
            assert!(first.layout() == kind.layout());
            assert!(first.attributes().ends_with(&["duration", "rotation_model"]));
            assert!(first.default_duration().is_zero());
            assert!(first.default_rotation_model() == "howard");
        }
    }

    #[test]
    fn test_edges_registered_once() {
        for kind in FrameKind::ALL {
            let _ = rotated_sun_type(FrameId::Base(kind)).unwrap();
            let _ = rotated_sun_type(FrameId::Base(kind)).unwrap();
            assert!(register_transforms(kind).unwrap() == 0);

            let graph = TRANSFORM_GRAPH.read().unwrap();
            let rotated = FrameId::RotatedSun(kind);
            let base = FrameId::Base(kind);
            assert!(graph.edges_touching(rotated).len() == 3);
            for (from, to) in [(base, rotated), (rotated, base), (rotated, rotated)] {
                assert!(graph.get_transform(from, to).unwrap().len() == 1);
            }
        }
    }

    #[test]
    fn test_invalid_base() {
        let rotated = FrameId::RotatedSun(FrameKind::HeliographicStonyhurst);
        assert!(matches!(rotated_sun_type(rotated), Err(Error::InvalidBase(_))));
    }

    #[test]
    fn test_concurrent_first_use() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    rotated_sun_type(FrameId::Base(FrameKind::Helioprojective)).unwrap()
                })
            })
            .collect();
        let types: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(types.iter().all(|t| Arc::ptr_eq(t, &types[0])));
    }
}
