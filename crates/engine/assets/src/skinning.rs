//! CPU linear blend skinning

use glam::{Mat4, Vec3};

use crate::model::{Pose, PosedVertex, SkinnedMesh, SkinnedVertex};

/// Blend of the joint matrices influencing `vertex`
///
/// Influences pointing past the palette are ignored; a vertex with no usable
/// weight keeps its bind pose.
fn skin_matrix(vertex: &SkinnedVertex, pose: &Pose) -> Mat4 {
    let mut total = 0.0;
    let mut m = Mat4::ZERO;
    for (&joint, &weight) in vertex.joints.iter().zip(&vertex.weights) {
        if weight <= 0.0 {
            continue;
        }
        if let Some(joint_m) = pose.joints.get(joint as usize) {
            m += *joint_m * weight;
            total += weight;
        }
    }
    if total <= f32::EPSILON {
        Mat4::IDENTITY
    } else {
        m * (1.0 / total)
    }
}

/// Skin every mesh vertex with `pose`, reusing `out`'s allocation
pub fn skin_vertices(mesh: &SkinnedMesh, pose: &Pose, out: &mut Vec<PosedVertex>) {
    out.clear();
    out.extend(mesh.vertices.iter().map(|v| {
        let m = skin_matrix(v, pose);
        let position = m.transform_point3(v.position);
        let normal = m.transform_vector3(v.normal).normalize_or(Vec3::Y);
        PosedVertex {
            position: position.to_array(),
            normal: normal.to_array(),
            color: v.color.to_array(),
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh() -> SkinnedMesh {
        SkinnedMesh {
            vertices: vec![
                SkinnedVertex::rigid(Vec3::ZERO, Vec3::Y),
                SkinnedVertex {
                    joints: [0, 1, 0, 0],
                    weights: [0.5, 0.5, 0.0, 0.0],
                    ..SkinnedVertex::rigid(Vec3::X, Vec3::Y)
                },
            ],
            indices: vec![0, 1, 0],
        }
    }

    #[test]
    fn test_rigid_vertex_follows_joint() {
        let pose = Pose {
            joints: vec![Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), Mat4::IDENTITY],
        };
        let mut out = Vec::new();
        skin_vertices(&mesh(), &pose, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(out[0].normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_weights_blend() {
        let pose = Pose {
            joints: vec![Mat4::IDENTITY, Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0))],
        };
        let mut out = Vec::new();
        skin_vertices(&mesh(), &pose, &mut out);
        let p = Vec3::from_array(out[1].position);
        assert!((p - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_missing_joint_keeps_bind_pose() {
        let pose = Pose { joints: vec![] };
        let mut out = vec![PosedVertex::default(); 8];
        skin_vertices(&mesh(), &pose, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].position, [1.0, 0.0, 0.0]);
    }
}
