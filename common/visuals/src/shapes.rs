//! The star and the cloud are drawn from plain geometry.

use bevy::{
    math::{Vec2, Vec3},
    render::{
        mesh::{Indices, Mesh, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
};

/// Default size of a star.
pub const STAR_SIZE: Vec2 = Vec2::splat(50.0);

/// Default size of a cloud.
pub const CLOUD_SIZE: Vec2 = Vec2::new(120.0, 80.0);

/// Corners of a four point star centered at the origin: top, right, bottom
/// and left.
pub fn diamond_corners(size: Vec2) -> [Vec3; 4] {
    let half = size / 2.0;

    [
        Vec3::new(0.0, half.y, 0.0),
        Vec3::new(half.x, 0.0, 0.0),
        Vec3::new(0.0, -half.y, 0.0),
        Vec3::new(-half.x, 0.0, 0.0),
    ]
}

/// Two counter-clockwise triangles over [`diamond_corners`].
pub const DIAMOND_INDICES: [u32; 6] = [0, 3, 2, 0, 2, 1];

/// A four point star that fits the given size.
pub fn star_mesh(size: Vec2) -> Mesh {
    let corners = diamond_corners(size);

    let positions: Vec<[f32; 3]> = corners.iter().map(|c| c.to_array()).collect();
    let uvs: Vec<[f32; 2]> = corners
        .iter()
        .map(|c| [c.x / size.x + 0.5, 0.5 - c.y / size.y])
        .collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; 4])
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(DIAMOND_INDICES.to_vec()))
}

/// One circle of a cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Puff {
    /// Relative to the cloud center.
    pub center: Vec2,
    /// In pixels.
    pub radius: f32,
}

/// Overlapping circles that together read as a cloud of the given size.
/// One big puff on top, three smaller ones along the flat bottom.
pub fn cloud_puffs(size: Vec2) -> [Puff; 4] {
    let (w, h) = (size.x, size.y);

    [
        Puff {
            center: Vec2::new(w * 0.05, h * 0.1),
            radius: h * 0.4,
        },
        Puff {
            center: Vec2::new(-w * 0.25, -h * 0.225),
            radius: h * 0.275,
        },
        Puff {
            center: Vec2::new(0.0, -h * 0.2),
            radius: h * 0.3,
        },
        Puff {
            center: Vec2::new(w * 0.25, -h * 0.2),
            radius: h * 0.3,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn it_spans_the_star_size() {
        let [top, right, bottom, left] = diamond_corners(STAR_SIZE);

        assert_eq!(Vec3::new(0.0, 25.0, 0.0), top);
        assert_eq!(Vec3::new(25.0, 0.0, 0.0), right);
        assert_eq!(Vec3::new(0.0, -25.0, 0.0), bottom);
        assert_eq!(Vec3::new(-25.0, 0.0, 0.0), left);
    }

    #[test]
    fn it_winds_star_triangles_counter_clockwise() {
        let corners = diamond_corners(STAR_SIZE);

        for triangle in DIAMOND_INDICES.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| corners[triangle[i] as usize]);
            assert!((b - a).cross(c - a).z > 0.0, "{triangle:?} is clockwise");
        }
    }

    #[test]
    fn it_builds_star_mesh() {
        let mesh = star_mesh(STAR_SIZE);

        assert_eq!(4, mesh.count_vertices());
        assert_eq!(6, mesh.indices().map(Indices::len).unwrap_or_default());
    }

    #[test]
    fn it_keeps_puffs_inside_the_cloud() {
        let half = CLOUD_SIZE / 2.0;

        for Puff { center, radius } in cloud_puffs(CLOUD_SIZE) {
            assert!(center.x - radius >= -half.x - EPSILON);
            assert!(center.x + radius <= half.x + EPSILON);
            assert!(center.y - radius >= -half.y - EPSILON);
            assert!(center.y + radius <= half.y + EPSILON);
        }
    }

    #[test]
    fn it_touches_top_and_bottom_of_the_cloud() {
        let half = CLOUD_SIZE / 2.0;
        let puffs = cloud_puffs(CLOUD_SIZE);

        let top = puffs
            .iter()
            .map(|p| p.center.y + p.radius)
            .fold(f32::MIN, f32::max);
        let bottom = puffs
            .iter()
            .map(|p| p.center.y - p.radius)
            .fold(f32::MAX, f32::min);

        assert!((top - half.y).abs() < EPSILON);
        assert!((bottom + half.y).abs() < EPSILON);
    }
}
