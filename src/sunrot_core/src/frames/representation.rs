//! Component layouts and vectorized component storage.
//!
//! Every frame stores its coordinates as three equal length arrays of values, the
//! meaning of which is described by the frame's [`ComponentLayout`]. Angles are in
//! radians and distances in AU.
//!
//! Spherical components are always ordered as (longitude-like, latitude-like,
//! distance), where the longitude-like component is the rotational phase about the
//! frame's polar axis.
//!
use itertools::{Itertools, izip};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, SunrotResult};
use crate::util::wrap_angle;

/// How the three components of a frame are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    /// Longitude, latitude, distance.
    Spherical,

    /// X, Y, Z.
    Cartesian,
}

/// Component contract of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentLayout {
    /// Names of the three components.
    pub names: [&'static str; 3],

    /// How the components are to be interpreted.
    pub representation: Representation,

    /// Longitudes are wrapped into `[wrap - 360, wrap)` degrees, for spherical
    /// layouts only.
    pub wrap_degrees: Option<u16>,
}

impl ComponentLayout {
    /// Index of the component with the given name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }

    /// Apply the longitude wrapping of this layout in place.
    pub fn wrap(&self, components: &mut Components) {
        if let (Representation::Spherical, Some(wrap)) = (self.representation, self.wrap_degrees)
        {
            let wrap = f64::from(wrap).to_radians();
            components.0[0]
                .iter_mut()
                .for_each(|lon| *lon = wrap_angle(*lon, wrap));
        }
    }
}

/// Vectorized coordinate components.
///
/// All three arrays are guaranteed to be the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components([Vec<f64>; 3]);

impl Components {
    /// Construct components from three arrays.
    ///
    /// # Errors
    /// Fails if the arrays are not of equal length.
    pub fn new(a: Vec<f64>, b: Vec<f64>, c: Vec<f64>) -> SunrotResult<Self> {
        if a.len() != b.len() || a.len() != c.len() {
            return Err(Error::ValueError(format!(
                "Component lengths do not match ({}, {}, {}).",
                a.len(),
                b.len(),
                c.len()
            )));
        }
        Ok(Self([a, b, c]))
    }

    /// Components of a single point.
    #[must_use]
    pub fn from_point(a: f64, b: f64, c: f64) -> Self {
        Self([vec![a], vec![b], vec![c]])
    }

    /// Spherical components of a single point given in degrees and AU.
    #[must_use]
    pub fn from_degrees(lon: f64, lat: f64, distance: f64) -> Self {
        Self::from_point(lon.to_radians(), lat.to_radians(), distance)
    }

    /// Build components from an iterator of points.
    pub fn from_points(points: impl IntoIterator<Item = [f64; 3]>) -> Self {
        let (a, b, c): (Vec<_>, Vec<_>, Vec<_>) =
            points.into_iter().map(|[a, b, c]| (a, b, c)).multiunzip();
        Self([a, b, c])
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0[0].len()
    }

    /// True if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values of one of the three components.
    ///
    /// # Panics
    /// Panics if the index is larger than 2.
    #[must_use]
    pub fn component(&self, idx: usize) -> &[f64] {
        &self.0[idx]
    }

    /// The point at the specified index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    #[must_use]
    pub fn point(&self, idx: usize) -> [f64; 3] {
        [self.0[0][idx], self.0[1][idx], self.0[2][idx]]
    }

    /// Iterate over all points.
    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        izip!(&self.0[0], &self.0[1], &self.0[2]).map(|(a, b, c)| [*a, *b, *c])
    }

    /// Split into the three component arrays.
    #[must_use]
    pub fn into_inner(self) -> [Vec<f64>; 3] {
        self.0
    }

    /// Convert spherical (lon, lat, distance) components to cartesian vectors.
    #[must_use]
    pub fn spherical_to_vectors(&self) -> Vec<Vector3<f64>> {
        self.points()
            .map(|[lon, lat, r]| {
                let (sin_lon, cos_lon) = lon.sin_cos();
                let (sin_lat, cos_lat) = lat.sin_cos();
                Vector3::new(r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat)
            })
            .collect()
    }

    /// Convert cartesian vectors to spherical (lon, lat, distance) components.
    ///
    /// The origin maps to a longitude and latitude of zero.
    pub fn spherical_from_vectors<'a>(vecs: impl IntoIterator<Item = &'a Vector3<f64>>) -> Self {
        Self::from_points(vecs.into_iter().map(|v| {
            let r = v.norm();
            let lat = if r > 0.0 { (v.z / r).clamp(-1.0, 1.0).asin() } else { 0.0 };
            [v.y.atan2(v.x), lat, r]
        }))
    }

    /// Cartesian (x, y, z) components as vectors.
    #[must_use]
    pub fn cartesian_to_vectors(&self) -> Vec<Vector3<f64>> {
        self.points().map(|[x, y, z]| Vector3::new(x, y, z)).collect()
    }

    /// Cartesian (x, y, z) components from vectors.
    pub fn cartesian_from_vectors<'a>(vecs: impl IntoIterator<Item = &'a Vector3<f64>>) -> Self {
        Self::from_points(vecs.into_iter().map(|v| [v.x, v.y, v.z]))
    }

    /// Convert to vectors according to the provided representation.
    #[must_use]
    pub fn to_vectors(&self, representation: Representation) -> Vec<Vector3<f64>> {
        match representation {
            Representation::Spherical => self.spherical_to_vectors(),
            Representation::Cartesian => self.cartesian_to_vectors(),
        }
    }

    /// Maximum angular separation in radians between two sets of spherical points.
    ///
    /// # Errors
    /// Fails if the number of points differ.
    pub fn max_separation(&self, other: &Self) -> SunrotResult<f64> {
        if self.len() != other.len() {
            return Err(Error::ValueError(
                "Cannot compare components of different lengths.".into(),
            ));
        }
        Ok(self
            .spherical_to_vectors()
            .iter()
            .zip(other.spherical_to_vectors())
            .map(|(a, b)| a.angle(&b))
            .fold(0.0, f64::max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_checked() {
        assert!(Components::new(vec![1.0], vec![1.0, 2.0], vec![1.0]).is_err());
        let comps = Components::new(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]).unwrap();
        assert!(comps.len() == 2);
        assert!(comps.point(1) == [2.0, 4.0, 6.0]);
        assert!(comps.component(2) == [5.0, 6.0]);
    }

    #[test]
    fn test_spherical_roundtrip() {
        let comps = Components::new(
            vec![0.1, -2.0, 3.0],
            vec![0.2, -1.5, 0.0],
            vec![1.0, 2.0, 0.5],
        )
        .unwrap();
        let vecs = comps.spherical_to_vectors();
        let back = Components::spherical_from_vectors(&vecs);
        for (a, b) in comps.points().zip(back.points()) {
            assert!((a[0] - b[0]).abs() < 1e-12);
            assert!((a[1] - b[1]).abs() < 1e-12);
            assert!((a[2] - b[2]).abs() < 1e-12);
        }
        assert!(comps.max_separation(&back).unwrap() < 1e-12);
    }

    #[test]
    fn test_wrap() {
        let layout = ComponentLayout {
            names: ["lon", "lat", "radius"],
            representation: Representation::Spherical,
            wrap_degrees: Some(180),
        };
        let mut comps = Components::from_degrees(270.0, 10.0, 1.0);
        layout.wrap(&mut comps);
        assert!((comps.point(0)[0].to_degrees() + 90.0).abs() < 1e-10);
        assert!(layout.index_of("radius") == Some(2));
        assert!(layout.index_of("distance").is_none());
    }
}
