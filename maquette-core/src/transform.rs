/// 2D affine transformation matrices and node placement
use nalgebra::{Matrix3, Point2, Vector2};

/// Position, rotation and uniform scale of a 2D scene node.
///
/// Angles are in radians. This is the unit of state a parameter panel
/// mutates between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub rot: f32,
    pub scale: f32,
}

impl Placement {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            rot: 0.0,
            scale: 1.0,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Transform builder for 2D homogeneous matrices.
///
/// All matrices are `Matrix3<f32>` in 2D homogeneous coordinates. nalgebra
/// stores matrices column-major, so `as_slice()` (and [`Transform2::to_uniform`])
/// yield the flat 9-element layout a WebGL `mat3` uniform expects: the
/// translation of [`Transform2::translation_matrix`] sits at flat indices
/// 6 and 7. Points transform as `M * [x, y, 1]`, so in a product the
/// rightmost factor is applied first.
pub struct Transform2;

impl Transform2 {
    /// The multiplicative identity.
    pub fn identity() -> Matrix3<f32> {
        Matrix3::identity()
    }

    /// Create a scale matrix.
    pub fn scale_matrix(sx: f32, sy: f32) -> Matrix3<f32> {
        Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy))
    }

    /// Create a translation matrix.
    pub fn translation_matrix(tx: f32, ty: f32) -> Matrix3<f32> {
        Matrix3::new_translation(&Vector2::new(tx, ty))
    }

    /// Create a counterclockwise rotation matrix (angle in radians).
    pub fn rotation_matrix(theta: f32) -> Matrix3<f32> {
        Matrix3::new_rotation(theta)
    }

    /// Matrix product `a * b`: applying the result is `b` first, then `a`.
    pub fn multiply(a: &Matrix3<f32>, b: &Matrix3<f32>) -> Matrix3<f32> {
        a * b
    }

    /// Transform a point through a homogeneous matrix.
    pub fn apply(m: &Matrix3<f32>, p: &Point2<f32>) -> Point2<f32> {
        m.transform_point(p)
    }

    /// Flatten a matrix into the column-major form used as a `mat3` uniform.
    pub fn to_uniform(m: &Matrix3<f32>) -> [f32; 9] {
        let mut out = [0.0; 9];
        out.copy_from_slice(m.as_slice());
        out
    }

    /// Build the model matrix for a placement rotating about `pivot`.
    ///
    /// Evaluation order, rightmost first: translate the pivot to the
    /// origin, rotate, translate back, scale, then move into position.
    pub fn model_matrix(placement: &Placement, pivot: &Point2<f32>) -> Matrix3<f32> {
        let mut m = Self::translation_matrix(-pivot.x, -pivot.y);
        m = Self::multiply(&Self::rotation_matrix(placement.rot), &m);
        m = Self::multiply(&Self::translation_matrix(pivot.x, pivot.y), &m);
        m = Self::multiply(&Self::scale_matrix(placement.scale, placement.scale), &m);
        m = Self::multiply(&Self::translation_matrix(placement.x, placement.y), &m);
        m
    }
}
