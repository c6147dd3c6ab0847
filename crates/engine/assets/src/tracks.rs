//! Keyframe tracks and clip baking
//!
//! Source animations are sparse keyframe tracks per node. They are sampled
//! with linear interpolation (slerp for rotations) and baked into a dense
//! sequence of skinning palettes at [`BAKE_FPS`].

use std::collections::BTreeMap;

use glam::{Quat, Vec3};

use crate::error::{AssetError, Result};
use crate::model::{AnimationClip, NodeTransform, Pose, Skeleton};

/// Frames per second of clip time used when baking
pub const BAKE_FPS: f32 = 60.0;

/// Longest clip accepted for baking, in seconds
pub const MAX_CLIP_SECONDS: f32 = 600.0;

/// Values that can be blended between two keyframes
pub trait Interpolate: Copy {
    fn interpolate(self, other: Self, t: f32) -> Self;
}

impl Interpolate for Vec3 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

impl Interpolate for Quat {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.slerp(other, t)
    }
}

/// Sorted keyframe times with one value per time
#[derive(Debug, Clone, PartialEq)]
pub struct Track<T> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolate> Track<T> {
    /// Build a track; extra times or values beyond the shorter list are dropped
    pub fn new(mut times: Vec<f32>, mut values: Vec<T>) -> Self {
        let len = times.len().min(values.len());
        times.truncate(len);
        values.truncate(len);
        Self { times, values }
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Value at time `t`, clamped to the first and last keyframes
    pub fn sample(&self, t: f32) -> Option<T> {
        let (first, last) = (self.times.first()?, self.times.last()?);
        if t <= *first || self.times.len() < 2 {
            return self.values.first().copied();
        }
        if t >= *last {
            return self.values.last().copied();
        }
        // first index with time > t; clamped for unsorted input
        let hi = self
            .times
            .partition_point(|&k| k <= t)
            .clamp(1, self.times.len() - 1);
        let lo = hi - 1;
        let span = self.times[hi] - self.times[lo];
        let f = if span > 0.0 {
            (t - self.times[lo]) / span
        } else {
            0.0
        };
        Some(self.values[lo].interpolate(self.values[hi], f))
    }
}

/// Tracks animating one node
#[derive(Debug, Clone, Default)]
pub struct NodeTracks {
    pub translation: Option<Track<Vec3>>,
    pub rotation: Option<Track<Quat>>,
    pub scale: Option<Track<Vec3>>,
}

impl NodeTracks {
    fn apply(&self, t: f32, local: &mut NodeTransform) {
        if let Some(v) = self.translation.as_ref().and_then(|tr| tr.sample(t)) {
            local.translation = v;
        }
        if let Some(q) = self.rotation.as_ref().and_then(|tr| tr.sample(t)) {
            local.rotation = q.normalize();
        }
        if let Some(s) = self.scale.as_ref().and_then(|tr| tr.sample(t)) {
            local.scale = s;
        }
    }

    fn end_time(&self) -> f32 {
        let t = self.translation.as_ref().map_or(0.0, Track::end_time);
        let r = self.rotation.as_ref().map_or(0.0, Track::end_time);
        let s = self.scale.as_ref().map_or(0.0, Track::end_time);
        t.max(r).max(s)
    }
}

/// Unbaked animation: per-node keyframe tracks
#[derive(Debug, Clone, Default)]
pub struct KeyframeClip {
    pub name: String,
    pub channels: BTreeMap<usize, NodeTracks>,
}

impl KeyframeClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: BTreeMap::new(),
        }
    }

    /// Length of the clip in seconds
    pub fn duration(&self) -> f32 {
        self.channels
            .values()
            .map(NodeTracks::end_time)
            .fold(0.0, f32::max)
    }

    /// Number of baked frames: one per `1/fps` seconds plus the end frame
    ///
    /// Fails for non-finite or over-long clips and non-positive rates.
    pub fn frame_count(&self, fps: f32) -> Result<usize> {
        let duration = self.duration();
        if !duration.is_finite() || duration > MAX_CLIP_SECONDS {
            return Err(AssetError::Invalid(format!(
                "clip {:?} lasts {duration}s (limit {MAX_CLIP_SECONDS}s)",
                self.name
            )));
        }
        if !(fps.is_finite() && fps > 0.0) {
            return Err(AssetError::Invalid(format!("bake rate {fps} is not positive")));
        }
        ((duration * fps).floor() as usize)
            .checked_add(1)
            .ok_or_else(|| AssetError::Invalid(format!("clip {:?} has too many frames", self.name)))
    }

    /// Palette at time `t`; nodes without tracks stay at rest
    pub fn sample(&self, skeleton: &Skeleton, t: f32) -> Pose {
        let mut locals = skeleton.rest.clone();
        for (&node, tracks) in &self.channels {
            if let Some(local) = locals.get_mut(node) {
                tracks.apply(t, local);
            }
        }
        skeleton.palette(&locals)
    }

    /// Sample every frame at `fps`
    pub fn bake(&self, skeleton: &Skeleton, fps: f32) -> Result<AnimationClip> {
        let frames = (0..self.frame_count(fps)?)
            .map(|i| self.sample(skeleton, i as f32 / fps))
            .collect();
        Ok(AnimationClip::new(self.name.clone(), frames))
    }
}
