use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use log::{debug, info, warn};
use std::path::Path;

/// Render-side summary of the car model the camera follows
#[derive(Debug, Clone, PartialEq)]
pub struct CarModel {
    pub name: String,
    pub meshes: usize,
    pub vertices: usize,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    /// Longest animation clip, if the model is rigged
    pub animation_duration: Option<f32>,
}

impl CarModel {
    /// Unit box stand-in used when no model file is supplied
    pub fn placeholder() -> Self {
        Self {
            name: String::from("placeholder"),
            meshes: 0,
            vertices: 0,
            bounds_min: Vec3::splat(-0.5),
            bounds_max: Vec3::splat(0.5),
            animation_duration: None,
        }
    }

    pub fn size(&self) -> Vec3 {
        self.bounds_max - self.bounds_min
    }
}

/// Loads a glTF car model and summarises its geometry
pub fn load_car_model(path: impl AsRef<Path>) -> Result<CarModel> {
    let path = path.as_ref();
    info!("Loading car model: {:?}", path);

    let (gltf, buffers, _images) = gltf::import(path)
        .with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    debug!(
        "glTF: {} scenes, {} nodes, {} meshes, {} animations",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count(),
        gltf.animations().count()
    );

    let mut vertices = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            collect_node(&node, &buffers, &Mat4::IDENTITY, &mut vertices)?;
        }
    }

    if vertices.is_empty() {
        warn!("No geometry found in {:?}, using unit bounds", path);
    }
    let (bounds_min, bounds_max) = if vertices.is_empty() {
        (Vec3::splat(-0.5), Vec3::splat(0.5))
    } else {
        compute_mesh_bounds(&vertices)
    };

    let animation_duration = gltf
        .animations()
        .map(|animation| animation_duration(&animation, &buffers))
        .reduce(f32::max);

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("model"));

    let model = CarModel {
        name,
        meshes: gltf.meshes().count(),
        vertices: vertices.len(),
        bounds_min,
        bounds_max,
        animation_duration,
    };
    info!("Car model ready: {} meshes, {} vertices", model.meshes, model.vertices);
    Ok(model)
}

/// Recursively gathers world-space vertex positions
fn collect_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    out: &mut Vec<Vec3>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let positions = reader
                .read_positions()
                .context("Mesh primitive has no positions")?;
            out.extend(positions.map(|p| global_transform.transform_point3(Vec3::from_array(p))));
        }
    }

    for child in node.children() {
        collect_node(&child, buffers, &global_transform, out)?;
    }

    Ok(())
}

fn animation_duration(animation: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> f32 {
    let mut max_time = 0.0f32;

    for channel in animation.channels() {
        let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));

        if let Some(inputs) = reader.read_inputs() {
            for time in inputs {
                max_time = max_time.max(time);
            }
        }
    }

    max_time
}

/// Component-wise min and max over a non-empty vertex set
pub fn compute_mesh_bounds(vertices: &[Vec3]) -> (Vec3, Vec3) {
    let Some(&first) = vertices.first() else {
        return (Vec3::ZERO, Vec3::ZERO);
    };

    vertices
        .iter()
        .skip(1)
        .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)))
}
