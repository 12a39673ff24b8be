//! # Transform Graph
//! Directed graph of the conversions between frames.
//!
//! Nodes are [`FrameId`]s and each edge holds a single function converting a frame
//! holding data into another frame. Conversions between frames without a direct
//! edge are routed through the shortest chain of edges.
//!
//! The global [`TRANSFORM_GRAPH`] is loaded with the conversions between the base
//! frames on first use, rotated frames add their edges when their type is first
//! constructed, see [`crate::metaframes::rotated_sun_type`].
//!
//! The graph is stored inside of a [`crossbeam::sync::ShardedLock`], meaning before
//! its use it must be unwrapped. Transform functions are never called while the
//! lock is held.
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

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crossbeam::sync::ShardedLock;
use itertools::Itertools;
use log::trace;
use pathfinding::prelude::dijkstra;

use crate::errors::{Error, SunrotResult};
use crate::frames::{AnyFrame, BaseFrame, Components, FrameId, FrameKind, SunFrame};
use crate::metaframes::rotated_sun_type;

/// Conversion from a frame holding data into the target frame.
///
/// The first argument is the coordinate being converted, the second is the frame
/// it is converted into. The returned frame has the attributes of the target.
pub type TransformFn = fn(&AnyFrame, &AnyFrame) -> SunrotResult<AnyFrame>;

/// Directed graph of frame conversions.
#[derive(Debug, Default)]
pub struct TransformGraph {
    /// Conversion functions keyed on (from, to).
    edges: HashMap<(FrameId, FrameId), TransformFn>,
}

/// Chain of conversions found in the [`TransformGraph`].
#[derive(Debug, Clone)]
pub struct CompositeTransform {
    /// Frames visited, starting with the source and ending with the target.
    pub path: Vec<FrameId>,

    /// One conversion per step of the path.
    pub transforms: Vec<TransformFn>,
}

impl CompositeTransform {
    /// Number of conversions in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// True if the chain holds no conversions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Apply the chain of conversions.
    ///
    /// Waypoints are constructed at the observation time of the source, or the
    /// target if the source does not have one.
    ///
    /// # Errors
    /// Fails if any of the conversions fail.
    pub fn apply(&self, from: &AnyFrame, to: &AnyFrame) -> SunrotResult<AnyFrame> {
        let obstime = from.obstime().or_else(|| to.obstime());
        let last = self.transforms.len().saturating_sub(1);

        let mut current = from.clone();
        for (idx, (func, next)) in self.transforms.iter().zip(&self.path[1..]).enumerate() {
            let target = if idx == last {
                to.clone()
            } else {
                AnyFrame::intermediate(*next, obstime)?
            };
            current = func(&current, &target)?;
        }
        Ok(current)
    }
}

impl TransformGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph holding the conversions between the base frames.
    #[must_use]
    pub fn with_base_transforms() -> Self {
        use FrameKind::{
            Heliocentric, HeliocentricInertial, HeliographicCarrington, HeliographicStonyhurst,
            Helioprojective,
        };
        let mut graph = Self::new();
        for (a, b) in [
            (HeliographicStonyhurst, HeliographicCarrington),
            (HeliographicStonyhurst, HeliocentricInertial),
            (HeliographicStonyhurst, Heliocentric),
            (Heliocentric, Helioprojective),
        ] {
            let _ = graph.add_transform(FrameId::Base(a), FrameId::Base(b), base_to_base);
            let _ = graph.add_transform(FrameId::Base(b), FrameId::Base(a), base_to_base);
        }
        for kind in FrameKind::ALL {
            let _ = graph.add_transform(FrameId::Base(kind), FrameId::Base(kind), base_to_base);
        }
        graph
    }

    /// Add a conversion to the graph.
    ///
    /// Returns false, leaving the graph untouched, if the edge already exists.
    pub fn add_transform(&mut self, from: FrameId, to: FrameId, func: TransformFn) -> bool {
        if let Entry::Vacant(entry) = self.edges.entry((from, to)) {
            let _ = entry.insert(func);
            true
        } else {
            false
        }
    }

    /// Is there a direct edge between the two frames.
    #[must_use]
    pub fn has_transform(&self, from: FrameId, to: FrameId) -> bool {
        self.edges.contains_key(&(from, to))
    }

    /// All edges of the graph, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(FrameId, FrameId)> {
        self.edges.keys().copied().sorted().collect()
    }

    /// All edges which start or end at the provided frame, sorted.
    #[must_use]
    pub fn edges_touching(&self, id: FrameId) -> Vec<(FrameId, FrameId)> {
        self.edges
            .keys()
            .filter(|(from, to)| *from == id || *to == id)
            .copied()
            .sorted()
            .collect()
    }

    /// Find the chain of conversions between two frames.
    ///
    /// A direct edge is always used if present, otherwise the chain with the
    /// fewest steps.
    ///
    /// # Errors
    /// [`Error::NoTransform`] if the frames are not connected.
    pub fn get_transform(&self, from: FrameId, to: FrameId) -> SunrotResult<CompositeTransform> {
        if let Some(func) = self.edges.get(&(from, to)) {
            return Ok(CompositeTransform {
                path: vec![from, to],
                transforms: vec![*func],
            });
        }

        let edges = &self.edges;
        let result = dijkstra(
            &from,
            |&current| {
                edges
                    .keys()
                    .filter(|(a, b)| *a == current && *b != current)
                    .map(|(_, b)| (*b, 1_u32))
                    .collect::<Vec<_>>()
            },
            |&node| node == to,
        );

        match result {
            Some((path, _)) if path.len() > 1 => {
                let transforms = path
                    .iter()
                    .tuple_windows()
                    .map(|(a, b)| edges[&(*a, *b)])
                    .collect();
                Ok(CompositeTransform { path, transforms })
            }
            _ => Err(Error::NoTransform(format!(
                "No transformation path from {from} to {to}."
            ))),
        }
    }
}

/// Global graph of frame conversions.
pub static TRANSFORM_GRAPH: std::sync::LazyLock<ShardedLock<TransformGraph>> =
    std::sync::LazyLock::new(|| ShardedLock::new(TransformGraph::with_base_transforms()));

/// Data of a frame being converted.
///
/// # Errors
/// [`Error::ValueError`] if the frame holds no data.
pub fn require_data(frame: &AnyFrame) -> SunrotResult<&Components> {
    frame.data().ok_or_else(|| {
        Error::ValueError(format!(
            "{} holds no coordinate data to transform.",
            frame.frame_id()
        ))
    })
}

/// Conversion between two base frames by way of the inertial frame.
///
/// # Errors
/// Fails if the source has no data, or either frame cannot be converted.
pub fn base_to_base(from: &AnyFrame, to: &AnyFrame) -> SunrotResult<AnyFrame> {
    let inertial = from.to_inertial(require_data(from)?)?;
    Ok(to.realize_frame(to.from_inertial(&inertial)?))
}

/// Convert a coordinate into another frame using the global graph.
///
/// The types of any rotated frames involved are constructed first, so that their
/// edges are present in the graph.
///
/// # Errors
/// Fails if there is no path between the frames, or any conversion fails.
pub fn transform_any(from: &AnyFrame, to: &AnyFrame) -> SunrotResult<AnyFrame> {
    for id in [from.frame_id(), to.frame_id()] {
        if let FrameId::RotatedSun(kind) = id {
            let _ = rotated_sun_type(FrameId::Base(kind))?;
        }
    }

    let transform = TRANSFORM_GRAPH
        .read()?
        .get_transform(from.frame_id(), to.frame_id())?;
    trace!(
        "Transforming {} to {} via {}",
        from.frame_id(),
        to.frame_id(),
        transform.path.iter().join(" -> ")
    );
    transform.apply(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{HeliographicCarrington, HeliographicStonyhurst, Helioprojective, Observer};
    use crate::time::{Time, UTC};

    fn obstime() -> Time<UTC> {
        Time::<UTC>::from_iso("2001-01-01").unwrap()
    }

    #[test]
    fn test_add_transform() {
        let mut graph = TransformGraph::new();
        let hgs = FrameId::Base(FrameKind::HeliographicStonyhurst);
        let hgc = FrameId::Base(FrameKind::HeliographicCarrington);

        assert!(graph.add_transform(hgs, hgc, base_to_base));
        assert!(!graph.add_transform(hgs, hgc, base_to_base));
        assert!(graph.has_transform(hgs, hgc));
        assert!(!graph.has_transform(hgc, hgs));
        assert!(graph.edges().len() == 1);
        assert!(graph.get_transform(hgs, hgc).unwrap().len() == 1);
        assert!(matches!(graph.get_transform(hgc, hgs), Err(Error::NoTransform(_))));
        assert!(matches!(graph.get_transform(hgs, hgs), Err(Error::NoTransform(_))));
    }

    #[test]
    fn test_shortest_path() {
        let graph = TransformGraph::with_base_transforms();
        let hgc = FrameId::Base(FrameKind::HeliographicCarrington);
        let hpc = FrameId::Base(FrameKind::Helioprojective);
        let transform = graph.get_transform(hgc, hpc).unwrap();
        assert!(transform.len() == 3);
        assert!(transform.path[0] == hgc);
        assert!(transform.path[3] == hpc);
        assert!(transform.path[2] == FrameId::Base(FrameKind::Heliocentric));

        for kind in FrameKind::ALL {
            let id = FrameId::Base(kind);
            assert!(graph.get_transform(id, id).unwrap().len() == 1);
        }
    }

    #[test]
    fn test_transform_chain() {
        let time = obstime();
        let hgc = HeliographicCarrington::new(Some(time))
            .realize_frame(Components::from_degrees(10.0, 20.0, 1.0));
        let hpc = Helioprojective::new(Some(time), Observer::Earth);

        let projected = hgc.transform_to(&hpc).unwrap();
        assert!(projected.obstime == Some(time));
        let back = projected.transform_to(&hgc.without_data()).unwrap();
        let sep = back
            .data()
            .unwrap()
            .max_separation(hgc.data().unwrap())
            .unwrap();
        assert!(sep < 1e-10);
    }

    #[test]
    fn test_missing_data() {
        let time = obstime();
        let hgs = HeliographicStonyhurst::new(Some(time));
        let hgc = HeliographicCarrington::new(Some(time));
        assert!(matches!(hgs.transform_to(&hgc), Err(Error::ValueError(_))));
    }

    #[test]
    fn test_obstime_change() {
        // Inertial coordinates are unaffected by a change in observation time.
        let time = obstime();
        let later = Time::<UTC>::from_iso("2001-01-11").unwrap();
        let hgs = HeliographicStonyhurst::new(Some(time))
            .realize_frame(Components::from_degrees(10.0, 20.0, 1.0));
        let moved = hgs
            .transform_to(&HeliographicStonyhurst::new(Some(later)))
            .unwrap();

        // Earth moves roughly 10 degrees in 10 days, so Stonyhurst longitudes drop.
        let lon = moved.data().unwrap().point(0)[0].to_degrees();
        assert!((lon - 0.0).abs() < 1.0, "lon = {lon}");
    }
}
