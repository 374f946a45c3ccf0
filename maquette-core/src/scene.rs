/// Scene description for the smiley face demo
use nalgebra::{Matrix3, Point2, Vector2};

use crate::transform::{Placement, Transform2};

/// The 2D scene as a plain value: the face placement, the rotation pivot
/// and the offsets of the face's parts in face-local coordinates.
///
/// The scene is owned by the caller and handed to the renderer on every
/// frame; nothing here is shared or implicit. A parameter panel edits the
/// `face` placement and the `pivot` position between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub face: Placement,
    pub pivot: Point2<f32>,
    pub left_eye_offset: Vector2<f32>,
    pub right_eye_offset: Vector2<f32>,
    pub mouth_offset: Vector2<f32>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            face: Placement::new(120.0, 0.0),
            pivot: Point2::new(400.0, 250.0),
            left_eye_offset: Vector2::new(-30.0, -50.0),
            right_eye_offset: Vector2::new(30.0, -50.0),
            mouth_offset: Vector2::new(0.0, 40.0),
        }
    }

    /// Model matrix of the face: rotate about the pivot, scale, then move
    /// into position (rightmost factor first).
    pub fn face_matrix(&self) -> Matrix3<f32> {
        Transform2::model_matrix(&self.face, &self.pivot)
    }

    /// Model matrix of a face part: the part follows the face, displaced
    /// by its offset in face-local coordinates.
    pub fn part_matrix(&self, offset: &Vector2<f32>) -> Matrix3<f32> {
        Transform2::multiply(
            &self.face_matrix(),
            &Transform2::translation_matrix(offset.x, offset.y),
        )
    }

    /// Model matrix of the pivot marker.
    pub fn pivot_matrix(&self) -> Matrix3<f32> {
        Transform2::translation_matrix(self.pivot.x, self.pivot.y)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_keeps_pivot_fixed() {
        let mut scene = Scene::new();
        scene.face.rot = 0.8;
        let p = Transform2::apply(&scene.face_matrix(), &scene.pivot);
        // pivot only picks up the face position
        assert!((p - Point2::new(520.0, 250.0)).norm() < 1e-3);
    }

    #[test]
    fn test_part_offsets_follow_the_face() {
        let mut scene = Scene::new();
        scene.face = Placement::new(120.0, 0.0);

        // unrotated: part origin lands at face position + offset
        let m = scene.part_matrix(&scene.mouth_offset);
        let p = Transform2::apply(&m, &Point2::new(0.0, 0.0));
        assert!((p - Point2::new(120.0, 40.0)).norm() < 1e-4);

        // rotated about a pivot at the origin: the offset rotates too
        scene.pivot = Point2::new(0.0, 0.0);
        scene.face.rot = FRAC_PI_2;
        let m = scene.part_matrix(&scene.mouth_offset);
        let p = Transform2::apply(&m, &Point2::new(0.0, 0.0));
        assert!((p - Point2::new(80.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_pivot_marker_sits_on_the_pivot() {
        let scene = Scene::new();
        let p = Transform2::apply(&scene.pivot_matrix(), &Point2::new(0.0, 0.0));
        assert!((p - scene.pivot).norm() < 1e-6);
    }
}
