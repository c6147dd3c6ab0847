//! glTF / GLB import
//!
//! Reads the first node carrying both a mesh and a skin, merges all of that
//! mesh's primitives into one triangle list, and bakes every animation in
//! document order.

use std::path::Path;

use glam::{Mat4, Quat, Vec3, Vec4};
use gltf::animation::util::ReadOutputs;
use gltf::animation::Property;
use gltf::mesh::util::{ReadIndices, ReadJoints, ReadWeights};

use crate::error::{AssetError, Result};
use crate::model::{AnimatedModel, NodeTransform, Skeleton, SkinnedMesh, SkinnedVertex};
use crate::tracks::{KeyframeClip, NodeTracks, Track, BAKE_FPS};

/// Load a skinned, animated model from a `.gltf` or `.glb` file
pub fn load_animated_model(path: impl AsRef<Path>) -> Result<AnimatedModel> {
    let path = path.as_ref();
    std::fs::metadata(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (doc, buffers, _images) = gltf::import(path).map_err(|source| AssetError::Gltf {
        path: path.to_path_buf(),
        source,
    })?;
    let data = |b: gltf::Buffer| buffers.get(b.index()).map(|d| d.0.as_slice());

    let node = doc
        .nodes()
        .find(|n| n.mesh().is_some() && n.skin().is_some())
        .ok_or_else(|| AssetError::NoSkinnedMesh(path.to_path_buf()))?;
    let (Some(mesh), Some(skin)) = (node.mesh(), node.skin()) else {
        return Err(AssetError::NoSkinnedMesh(path.to_path_buf()));
    };

    let skinned = read_mesh(&mesh, &data)?;
    let skeleton = read_skeleton(&doc, &skin, &data)?;

    let clips = doc
        .animations()
        .enumerate()
        .map(|(i, anim)| {
            let name = anim
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("clip{i}"));
            read_animation(&anim, name, &data)?.bake(&skeleton, BAKE_FPS)
        })
        .collect::<Result<Vec<_>>>()?;
    if clips.is_empty() {
        return Err(AssetError::NoAnimations(path.to_path_buf()));
    }

    tracing::info!(
        "Loaded {}: {} vertices, {} joints, {} clips",
        path.display(),
        skinned.vertices.len(),
        skeleton.joint_count(),
        clips.len()
    );
    for (i, clip) in clips.iter().enumerate() {
        tracing::debug!("  clip {i}: {:?} ({} frames)", clip.name, clip.frame_count());
    }

    Ok(AnimatedModel::new(skinned, skeleton, clips))
}

fn read_mesh<'s, F>(mesh: &gltf::Mesh, data: &F) -> Result<SkinnedMesh>
where
    F: Clone + for<'b> Fn(gltf::Buffer<'b>) -> Option<&'s [u8]>,
{
    let mut out = SkinnedMesh::default();

    for prim in mesh.primitives() {
        let reader = prim.reader(data.clone());
        let positions: Vec<Vec3> = reader
            .read_positions()
            .ok_or(AssetError::MissingAttribute("POSITION"))?
            .map(Vec3::from)
            .collect();
        let count = positions.len();

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(it) => it.map(Vec3::from).collect(),
            None => vec![Vec3::Y; count],
        };
        let joints: Vec<[u16; 4]> = match reader.read_joints(0) {
            Some(ReadJoints::U8(it)) => it.map(|j| j.map(u16::from)).collect(),
            Some(ReadJoints::U16(it)) => it.collect(),
            None => return Err(AssetError::MissingAttribute("JOINTS_0")),
        };
        let weights: Vec<[f32; 4]> = match reader.read_weights(0) {
            Some(ReadWeights::F32(it)) => it.collect(),
            Some(ReadWeights::U16(it)) => it.map(|w| w.map(|v| v as f32 / 65535.0)).collect(),
            Some(ReadWeights::U8(it)) => it.map(|w| w.map(|v| v as f32 / 255.0)).collect(),
            None => return Err(AssetError::MissingAttribute("WEIGHTS_0")),
        };
        if normals.len() != count || joints.len() != count || weights.len() != count {
            return Err(AssetError::Invalid(format!(
                "primitive attribute counts differ: {count} positions, {} normals, {} joints, {} weights",
                normals.len(),
                joints.len(),
                weights.len()
            )));
        }

        let color = Vec4::from(prim.material().pbr_metallic_roughness().base_color_factor()).truncate();

        let base = out.vertices.len() as u32;
        let indices: Vec<u32> = match reader.read_indices() {
            Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
            Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
            Some(ReadIndices::U32(it)) => it.collect(),
            None => (0..count as u32).collect(),
        };
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= count) {
            return Err(AssetError::Invalid(format!("index {bad} out of range")));
        }
        out.indices.extend(indices.into_iter().map(|i| base + i));

        out.vertices.extend((0..count).map(|i| SkinnedVertex {
            position: positions[i],
            normal: normals[i],
            color,
            joints: joints[i],
            weights: weights[i],
        }));
    }

    if out.vertices.is_empty() {
        return Err(AssetError::Invalid(format!(
            "mesh {:?} has no vertices",
            mesh.name().unwrap_or("")
        )));
    }
    Ok(out)
}

fn read_skeleton<'s, F>(doc: &gltf::Document, skin: &gltf::Skin, data: &F) -> Result<Skeleton>
where
    F: Clone + for<'b> Fn(gltf::Buffer<'b>) -> Option<&'s [u8]>,
{
    let node_count = doc.nodes().len();
    let mut parents = vec![None; node_count];
    let mut rest = vec![NodeTransform::default(); node_count];
    for node in doc.nodes() {
        for child in node.children() {
            parents[child.index()] = Some(node.index());
        }
        rest[node.index()] = node_transform(&node);
    }

    let joint_nodes: Vec<usize> = skin.joints().map(|j| j.index()).collect();
    let inverse_bind = match skin.reader(data.clone()).read_inverse_bind_matrices() {
        Some(it) => it.map(|m| Mat4::from_cols_array_2d(&m)).collect(),
        None => vec![Mat4::IDENTITY; joint_nodes.len()],
    };

    Skeleton::new(parents, rest, joint_nodes, inverse_bind)
}

fn node_transform(node: &gltf::Node) -> NodeTransform {
    let (translation, rotation, scale) = node.transform().decomposed();
    NodeTransform {
        translation: Vec3::from(translation),
        rotation: Quat::from_array(rotation).normalize(),
        scale: Vec3::from(scale),
    }
}

fn read_animation<'s, F>(anim: &gltf::Animation, name: String, data: &F) -> Result<KeyframeClip>
where
    F: Clone + for<'b> Fn(gltf::Buffer<'b>) -> Option<&'s [u8]>,
{
    let mut clip = KeyframeClip::new(name);
    for channel in anim.channels() {
        let node = channel.target().node().index();
        let reader = channel.reader(data.clone());
        let (Some(inputs), Some(outputs)) = (reader.read_inputs(), reader.read_outputs()) else {
            continue;
        };
        let times: Vec<f32> = inputs.collect();
        if times.iter().any(|t| !t.is_finite()) {
            return Err(AssetError::Invalid(format!(
                "animation {:?} has a non-finite keyframe time on node {node}",
                clip.name
            )));
        }
        let tracks = clip.channels.entry(node).or_insert_with(NodeTracks::default);
        match (channel.target().property(), outputs) {
            (Property::Translation, ReadOutputs::Translations(it)) => {
                tracks.translation = Some(Track::new(times, it.map(Vec3::from).collect()));
            }
            (Property::Rotation, ReadOutputs::Rotations(it)) => {
                let values = it.into_f32().map(|q| Quat::from_array(q).normalize()).collect();
                tracks.rotation = Some(Track::new(times, values));
            }
            (Property::Scale, ReadOutputs::Scales(it)) => {
                tracks.scale = Some(Track::new(times, it.map(Vec3::from).collect()));
            }
            (property, _) => {
                tracing::debug!("Skipping unsupported animation channel {:?} on node {}", property, node);
            }
        }
    }
    Ok(clip)
}
