/// Procedural building shells: N-sided prisms, frustums and cones
use std::f32::consts::TAU;

use nalgebra::{Point3, Vector3};

use crate::error::{GeomError, GeomResult};
use crate::geometry::{face_normal, Face, Mesh};

pub const MIN_SIDES: u32 = 3;
pub const MAX_SIDES: u32 = 36;

/// Parameters of a closed N-sided frustum standing on the XZ plane.
///
/// Equal radii give a prism, a zero top radius gives a cone. Generation
/// is fully deterministic: the same parameters always produce the same
/// mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    sides: u32,
    height: f32,
    bottom_radius: f32,
    top_radius: f32,
}

impl Frustum {
    /// Validate the side count and build the parameter set. Side counts
    /// outside `[MIN_SIDES, MAX_SIDES]` are rejected.
    pub fn new(sides: u32, height: f32, bottom_radius: f32, top_radius: f32) -> GeomResult<Self> {
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(GeomError::InvalidSideCount(sides));
        }
        Ok(Self {
            sides,
            height,
            bottom_radius,
            top_radius,
        })
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Generate the closed mesh: both rings, the two cap centers, one
    /// shared normal per side panel (pushed once per quad triangle) and
    /// the cap fans. All face indices are 1-based.
    pub fn mesh(&self) -> GeomResult<Mesh> {
        let sides = self.sides as usize;
        let mut mesh = Mesh::with_capacity(2 * sides + 2, 2 * sides + 2, 4 * sides);

        for i in 0..sides {
            let angle = i as f32 * TAU / sides as f32;
            mesh.push_vertex(Point3::new(
                angle.cos() * self.bottom_radius,
                0.0,
                angle.sin() * self.bottom_radius,
            ));
        }
        for i in 0..sides {
            let angle = i as f32 * TAU / sides as f32;
            mesh.push_vertex(Point3::new(
                angle.cos() * self.top_radius,
                self.height,
                angle.sin() * self.top_radius,
            ));
        }
        let bottom_center = mesh.push_vertex(Point3::new(0.0, 0.0, 0.0));
        let top_center = mesh.push_vertex(Point3::new(0.0, self.height, 0.0));

        mesh.push_normal(Vector3::new(0.0, -1.0, 0.0));
        mesh.push_normal(Vector3::new(0.0, 1.0, 0.0));

        // One normal per side panel, shared by both quad triangles.
        for i in 0..sides {
            let next = (i + 1) % sides;
            let normal = face_normal(
                &mesh.vertices()[i],
                &mesh.vertices()[next],
                &mesh.vertices()[i + sides],
            )?;
            mesh.push_normal(normal);
            mesh.push_normal(normal);
        }

        let base_normal = 3;
        for i in 0..self.sides {
            let next = (i + 1) % self.sides;

            let b1 = i + 1;
            let b2 = next + 1;
            let t1 = i + 1 + self.sides;
            let t2 = next + 1 + self.sides;

            let n = base_normal + i * 2;
            mesh.add_face(Face::new([b1, b2, t1], n));
            mesh.add_face(Face::new([b2, t2, t1], n + 1));
        }

        for i in 0..self.sides {
            let next = (i + 1) % self.sides;
            mesh.add_face(Face::new([bottom_center, next + 1, i + 1], 1));
        }
        for i in 0..self.sides {
            let next = (i + 1) % self.sides;
            mesh.add_face(Face::new(
                [top_center, i + 1 + self.sides, next + 1 + self.sides],
                2,
            ));
        }

        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::to_obj_string;

    #[test]
    fn test_square_prism_counts() {
        let mesh = Frustum::new(4, 1.0, 1.0, 1.0).unwrap().mesh().unwrap();
        // 4 bottom + 4 top + 2 centers
        assert_eq!(mesh.vertex_count(), 10);
        // 2 caps + one per quad triangle
        assert_eq!(mesh.normal_count(), 10);
        // 8 side triangles + 4 bottom + 4 top
        assert_eq!(mesh.face_count(), 16);
    }

    #[test]
    fn test_cap_normals() {
        let mesh = Frustum::new(6, 2.0, 1.0, 0.5).unwrap().mesh().unwrap();
        assert_eq!(mesh.normals()[0], Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(mesh.normals()[1], Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_prism_side_normals_are_horizontal_unit_vectors() {
        let mesh = Frustum::new(8, 3.0, 1.0, 1.0).unwrap().mesh().unwrap();
        for normal in &mesh.normals()[2..] {
            assert!(normal.y.abs() < 1e-6);
            assert!((normal.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_side_count_bounds() {
        assert!(matches!(
            Frustum::new(2, 1.0, 1.0, 1.0),
            Err(GeomError::InvalidSideCount(2))
        ));
        assert!(matches!(
            Frustum::new(37, 1.0, 1.0, 1.0),
            Err(GeomError::InvalidSideCount(37))
        ));
        assert!(Frustum::new(3, 1.0, 1.0, 1.0).is_ok());
        assert!(Frustum::new(36, 1.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_all_face_indices_in_range() {
        for sides in [3, 8, 36] {
            let mesh = Frustum::new(sides, 6.0, 1.0, 0.8).unwrap().mesh().unwrap();
            assert!(mesh.validate().is_ok());
            assert_eq!(mesh.vertex_count(), 2 * sides as usize + 2);
            assert_eq!(mesh.normal_count(), 2 * sides as usize + 2);
            assert_eq!(mesh.face_count(), 4 * sides as usize);
        }
    }

    #[test]
    fn test_cone_generates_cleanly() {
        // top ring collapses onto the axis, side panels stay non-degenerate
        let mesh = Frustum::new(5, 2.0, 1.0, 0.0).unwrap().mesh().unwrap();
        assert!(mesh.validate().is_ok());
        for normal in mesh.normals() {
            assert!(normal.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Frustum::new(12, 6.0, 1.0, 0.8).unwrap().mesh().unwrap();
        let b = Frustum::new(12, 6.0, 1.0, 0.8).unwrap().mesh().unwrap();
        assert_eq!(to_obj_string(&a), to_obj_string(&b));
    }
}
