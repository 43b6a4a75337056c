use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::tempdir;

use crate::ocean::OceanSimulation;

/// Writes the current frame of `ocean` as binary glTF, instanced on a
/// `tiles_x` x `tiles_z` grid.
///
/// Tiles are spaced exactly one tile size apart, so the replicated border
/// vertices of neighbouring tiles coincide.
pub fn export_glb<W: Write>(
    ocean: &OceanSimulation,
    writer: &mut W,
    tiles_x: usize,
    tiles_z: usize,
) -> io::Result<()> {
    // mesh_tools only exports to a path
    let temp_dir = tempdir()?;
    let temp_file_path = temp_dir.path().join("ocean.glb");

    let mut builder = mesh_tools::GltfBuilder::new();

    let water_material = builder.create_metallic_material(
        Some("WaterMaterial".to_string()),
        [0.0, 0.4, 0.8, 0.8],
        0.9,
        0.1,
    );

    if let Some(materials) = &mut builder.gltf.materials {
        if let Some(material) = materials.get_mut(water_material) {
            material.double_sided = Some(true);
            material.alpha_mode = Some("BLEND".to_string());
        }
    }

    let vertices = ocean.vertices();
    let tile_size = ocean.tile_size();
    let mut positions = Vec::with_capacity(vertices.len());
    let mut normals = Vec::with_capacity(vertices.len());
    let mut texcoords = Vec::with_capacity(vertices.len());

    for vertex in vertices {
        positions.push(mesh_tools::compat::point3::new(
            vertex.position.x,
            vertex.position.y,
            vertex.position.z,
        ));
        normals.push(mesh_tools::compat::vector3::new(
            vertex.normal.x,
            vertex.normal.y,
            vertex.normal.z,
        ));
    }

    let point_count = ocean.mesh().grid().point_count();
    let segments = (point_count - 1).max(1) as f32;
    for z in 0..point_count {
        for x in 0..point_count {
            texcoords.push(mesh_tools::compat::vector2::new(x as f32 / segments, z as f32 / segments));
        }
    }

    let triangles: Vec<mesh_tools::Triangle> = ocean
        .mesh()
        .faces()
        .map(|face| mesh_tools::Triangle::new(face.0, face.1, face.2))
        .collect();

    let mesh_index = builder.create_simple_mesh(
        Some("OceanMesh".to_string()),
        &positions,
        &triangles,
        Some(normals),
        Some(texcoords),
        Some(water_material),
    );

    // center the whole grid of tiles around the origin
    let origin_x = -(tiles_x.saturating_sub(1) as f32) * tile_size / 2.0;
    let origin_z = -(tiles_z.saturating_sub(1) as f32) * tile_size / 2.0;

    let mut grid_nodes = Vec::with_capacity(tiles_x * tiles_z);
    for row in 0..tiles_z {
        for col in 0..tiles_x {
            let node_index = builder.add_node(
                Some(format!("OceanTile_{}_{}", row, col)),
                Some(mesh_index),
                Some([
                    origin_x + col as f32 * tile_size,
                    0.0,
                    origin_z + row as f32 * tile_size,
                ]),
                None,
                None,
            );
            grid_nodes.push(node_index);
        }
    }

    let grid_parent = builder.add_node_with_children(
        Some("OceanGrid".to_string()),
        None,
        None,
        None,
        None,
        grid_nodes,
    );

    let scene_index = builder.add_scene(Some("OceanScene".to_string()), Some(vec![grid_parent]));
    builder.gltf.scene = Some(scene_index);

    let temp_file_str = temp_file_path.to_str().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Failed to convert path to string")
    })?;

    builder.export_glb(temp_file_str).map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("Failed to export GLB: {}", e))
    })?;

    let glb_data = std::fs::read(&temp_file_path)?;
    writer.write_all(&glb_data)?;

    Ok(())
}

/// Saves the current frame of `ocean` to a GLB file.
pub fn save_glb<P: AsRef<Path>>(
    ocean: &OceanSimulation,
    path: P,
    tiles_x: usize,
    tiles_z: usize,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    export_glb(ocean, &mut file, tiles_x, tiles_z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OceanParams;
    use std::fs;

    #[test]
    fn test_glb_export() {
        let mut ocean = OceanSimulation::new(OceanParams {
            point_count: 4,
            max_wave_length: 4.0,
            ..OceanParams::default()
        })
        .expect("valid parameters");
        ocean.simulate(1.0);

        let temp_dir = tempdir().expect("Failed to create temp directory");
        let test_path = temp_dir.path().join("ocean.glb");

        save_glb(&ocean, &test_path, 2, 2).expect("Failed to save GLB file");

        assert!(test_path.exists(), "GLB file was not created");
        let data = fs::read(&test_path).expect("Failed to read GLB file");
        assert!(data.len() > 12, "GLB file is empty");
        assert_eq!(&data[..4], b"glTF");
    }
}
