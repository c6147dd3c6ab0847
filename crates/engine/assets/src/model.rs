//! Animated model data

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::error::{AssetError, Result};

// ============================================================================
// Mesh
// ============================================================================

/// Bind-pose vertex with up to four joint influences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinnedVertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Linear RGB
    pub color: Vec3,
    pub joints: [u16; 4],
    pub weights: [f32; 4],
}

impl SkinnedVertex {
    /// Vertex fully bound to joint 0
    pub fn rigid(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            color: Vec3::ONE,
            joints: [0; 4],
            weights: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

/// Drawable vertex after skinning, laid out for direct GPU upload
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PosedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Triangle list of skinned vertices
#[derive(Debug, Clone, Default)]
pub struct SkinnedMesh {
    pub vertices: Vec<SkinnedVertex>,
    pub indices: Vec<u32>,
}

// ============================================================================
// Skeleton
// ============================================================================

/// Local rest transform of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl NodeTransform {
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Node hierarchy plus the subset of nodes that act as skin joints
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// Parent of every node, `None` for roots
    pub parents: Vec<Option<usize>>,
    /// Rest transform of every node
    pub rest: Vec<NodeTransform>,
    /// Node index of each joint, in skin order
    pub joint_nodes: Vec<usize>,
    /// Inverse bind matrix of each joint, in skin order
    pub inverse_bind: Vec<Mat4>,
}

impl Skeleton {
    /// Validate the hierarchy and build a skeleton
    pub fn new(
        parents: Vec<Option<usize>>,
        rest: Vec<NodeTransform>,
        joint_nodes: Vec<usize>,
        inverse_bind: Vec<Mat4>,
    ) -> Result<Self> {
        if parents.len() != rest.len() {
            return Err(AssetError::Invalid(format!(
                "{} parents for {} nodes",
                parents.len(),
                rest.len()
            )));
        }
        if joint_nodes.len() != inverse_bind.len() {
            return Err(AssetError::Invalid(format!(
                "{} inverse bind matrices for {} joints",
                inverse_bind.len(),
                joint_nodes.len()
            )));
        }
        if let Some(&bad) = joint_nodes.iter().find(|&&n| n >= rest.len()) {
            return Err(AssetError::Invalid(format!("joint node {bad} out of range")));
        }
        if let Some(bad) = parents.iter().flatten().find(|&&p| p >= rest.len()) {
            return Err(AssetError::Invalid(format!("parent node {bad} out of range")));
        }
        if let Some(node) = find_parent_cycle(&parents) {
            return Err(AssetError::Invalid(format!("node {node} is its own ancestor")));
        }
        Ok(Self {
            parents,
            rest,
            joint_nodes,
            inverse_bind,
        })
    }

    /// One root node acting as the only joint
    pub fn single_joint() -> Self {
        Self {
            parents: vec![None],
            rest: vec![NodeTransform::default()],
            joint_nodes: vec![0],
            inverse_bind: vec![Mat4::IDENTITY],
        }
    }

    pub fn node_count(&self) -> usize {
        self.rest.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joint_nodes.len()
    }

    /// Skinning palette for the given per-node local transforms
    ///
    /// `locals` must hold one entry per node.
    pub fn palette(&self, locals: &[NodeTransform]) -> Pose {
        let mut globals: Vec<Option<Mat4>> = vec![None; self.node_count()];
        let joints = self
            .joint_nodes
            .iter()
            .zip(&self.inverse_bind)
            .map(|(&node, ibm)| self.global(node, locals, &mut globals) * *ibm)
            .collect();
        Pose { joints }
    }

    fn global(&self, node: usize, locals: &[NodeTransform], cache: &mut [Option<Mat4>]) -> Mat4 {
        if let Some(m) = cache[node] {
            return m;
        }
        let local = locals.get(node).unwrap_or(&self.rest[node]).to_matrix();
        let m = match self.parents[node] {
            Some(parent) => self.global(parent, locals, cache) * local,
            None => local,
        };
        cache[node] = Some(m);
        m
    }
}

/// First node whose parent chain loops back on itself
fn find_parent_cycle(parents: &[Option<usize>]) -> Option<usize> {
    (0..parents.len()).find(|&start| {
        let mut node = start;
        for _ in 0..parents.len() {
            match parents[node] {
                Some(parent) => node = parent,
                None => return false,
            }
        }
        true
    })
}

// ============================================================================
// Animation
// ============================================================================

/// Joint palette for one animation frame, in skin joint order
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub joints: Vec<Mat4>,
}

impl Pose {
    pub fn identity(joint_count: usize) -> Self {
        Self {
            joints: vec![Mat4::IDENTITY; joint_count],
        }
    }
}

/// Named animation baked into frames
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub frames: Vec<Pose>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, frames: Vec<Pose>) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<&Pose> {
        self.frames.get(index)
    }
}

// ============================================================================
// Model
// ============================================================================

/// Skinned mesh, its skeleton and its clips in source order
#[derive(Debug, Clone)]
pub struct AnimatedModel {
    pub mesh: SkinnedMesh,
    pub skeleton: Skeleton,
    pub clips: Vec<AnimationClip>,
}

impl AnimatedModel {
    pub fn new(mesh: SkinnedMesh, skeleton: Skeleton, clips: Vec<AnimationClip>) -> Self {
        Self {
            mesh,
            skeleton,
            clips,
        }
    }

    pub fn clip(&self, index: usize) -> Option<&AnimationClip> {
        self.clips.get(index)
    }

    pub fn clip_index(&self, name: &str) -> Option<usize> {
        self.clips.iter().position(|c| c.name == name)
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().map(|c| c.name.as_str())
    }
}
