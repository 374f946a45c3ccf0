/// Indexed mesh primitives shared by the generator and the viewers
use nalgebra::{Point3, Vector3};

use crate::error::{GeomError, GeomResult};

/// A triangular face referencing mesh data by 1-based index, as in the
/// OBJ interchange format. All three corners share one face normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertices: [u32; 3],
    pub normal: u32,
}

impl Face {
    pub fn new(vertices: [u32; 3], normal: u32) -> Self {
        Self { vertices, normal }
    }
}

/// A 3D mesh with positions, face normals and indexed triangular faces.
///
/// Vertices and normals are append-only while the mesh is being built and
/// are read back through slice accessors once construction is done.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, normals: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(normals),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Append a vertex and return its 1-based index.
    pub fn push_vertex(&mut self, vertex: Point3<f32>) -> u32 {
        self.vertices.push(vertex);
        self.vertices.len() as u32
    }

    /// Append a normal and return its 1-based index.
    pub fn push_normal(&mut self, normal: Vector3<f32>) -> u32 {
        self.normals.push(normal);
        self.normals.len() as u32
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check that every face index is within `[1, vertex_count]` for
    /// vertices and `[1, normal_count]` for the normal.
    pub fn validate(&self) -> GeomResult<()> {
        let nv = self.vertices.len() as u32;
        let nn = self.normals.len() as u32;
        for (i, face) in self.faces.iter().enumerate() {
            for &v in &face.vertices {
                if v == 0 || v > nv {
                    return Err(GeomError::InvalidObj(format!(
                        "face {} references vertex {} of {}",
                        i + 1,
                        v,
                        nv
                    )));
                }
            }
            if face.normal == 0 || face.normal > nn {
                return Err(GeomError::InvalidObj(format!(
                    "face {} references normal {} of {}",
                    i + 1,
                    face.normal,
                    nn
                )));
            }
        }
        Ok(())
    }

    /// Resolve each face to its corner positions and shared normal.
    ///
    /// Indices must already have been checked with [`Mesh::validate`];
    /// the generator and the OBJ parser only hand out meshes that pass.
    pub fn triangles(&self) -> impl Iterator<Item = ([Point3<f32>; 3], Vector3<f32>)> + '_ {
        self.faces.iter().map(|face| {
            let [a, b, c] = face.vertices;
            (
                [
                    self.vertices[(a - 1) as usize],
                    self.vertices[(b - 1) as usize],
                    self.vertices[(c - 1) as usize],
                ],
                self.normals[(face.normal - 1) as usize],
            )
        })
    }
}

/// Unit normal of the triangle `(a, b, c)` from the cross product of its
/// edge vectors. A zero-length cross product means the corners are
/// collinear and fails rather than producing NaNs.
pub fn face_normal(
    a: &Point3<f32>,
    b: &Point3<f32>,
    c: &Point3<f32>,
) -> GeomResult<Vector3<f32>> {
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    if len <= f32::EPSILON {
        return Err(GeomError::DegenerateFace);
    }
    Ok(n / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal_is_unit_cross_product() {
        let n = face_normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        assert!((n.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_corners_are_degenerate() {
        let result = face_normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 1.0, 1.0),
            &Point3::new(2.0, 2.0, 2.0),
        );
        assert!(matches!(result, Err(GeomError::DegenerateFace)));
    }

    #[test]
    fn test_validate_catches_out_of_range_indices() {
        let mut mesh = Mesh::new();
        mesh.push_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.push_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.push_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.push_normal(Vector3::new(0.0, 0.0, 1.0));

        mesh.add_face(Face::new([1, 2, 3], 1));
        assert!(mesh.validate().is_ok());

        mesh.add_face(Face::new([1, 2, 5], 1));
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_push_returns_one_based_indices() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.push_vertex(Point3::new(0.0, 0.0, 0.0)), 1);
        assert_eq!(mesh.push_vertex(Point3::new(1.0, 0.0, 0.0)), 2);
        assert_eq!(mesh.push_normal(Vector3::new(0.0, 1.0, 0.0)), 1);
    }

    #[test]
    fn test_triangles_resolve_faces() {
        let mut mesh = Mesh::new();
        mesh.push_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.push_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.push_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.push_normal(Vector3::new(0.0, 0.0, 1.0));
        mesh.add_face(Face::new([1, 2, 3], 1));

        let (corners, normal) = mesh.triangles().next().unwrap();
        assert_eq!(corners[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(normal, Vector3::new(0.0, 0.0, 1.0));
    }
}
