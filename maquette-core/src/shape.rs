/// Flat 2D shapes tessellated as indexed triangle lists
use nalgebra::Point2;

/// A 2D shape ready for a vertex buffer: point positions plus `u16`
/// triangle indices. Coordinates are in pixels about the shape's own
/// origin; the model matrix places it in the canvas.
#[derive(Debug, Clone)]
pub struct Shape {
    pub positions: Vec<Point2<f32>>,
    pub indices: Vec<u16>,
}

impl Shape {
    pub fn new(positions: Vec<Point2<f32>>, indices: Vec<u16>) -> Self {
        Self { positions, indices }
    }

    /// The face disc: an octagon fanned out from the center.
    pub fn smiley() -> Self {
        let positions = [
            (0.0, 0.0),
            (0.0, 100.0),
            (70.0, 70.0),
            (100.0, 0.0),
            (70.0, -70.0),
            (0.0, -100.0),
            (-70.0, -70.0),
            (-100.0, 0.0),
            (-70.0, 70.0),
            (0.0, 100.0),
        ]
        .iter()
        .map(|&(x, y)| Point2::new(x, y))
        .collect();
        let indices = vec![
            0, 1, 2, //
            0, 2, 3, //
            0, 3, 4, //
            0, 4, 5, //
            0, 5, 6, //
            0, 6, 7, //
            0, 7, 8, //
            0, 8, 9,
        ];
        Self::new(positions, indices)
    }

    /// One eye, a small downward-pointing triangle.
    pub fn eye() -> Self {
        Self::new(
            vec![
                Point2::new(-10.0, -10.0),
                Point2::new(10.0, -10.0),
                Point2::new(0.0, 10.0),
            ],
            vec![0, 1, 2],
        )
    }

    /// The mouth, a wide triangle.
    pub fn mouth() -> Self {
        Self::new(
            vec![
                Point2::new(-30.0, -10.0),
                Point2::new(30.0, -10.0),
                Point2::new(0.0, 10.0),
            ],
            vec![0, 1, 2],
        )
    }

    /// A small square marking the rotation pivot.
    pub fn pivot_marker() -> Self {
        Self::new(
            vec![
                Point2::new(-5.0, -5.0),
                Point2::new(5.0, -5.0),
                Point2::new(5.0, 5.0),
                Point2::new(-5.0, 5.0),
            ],
            vec![0, 1, 2, 2, 3, 0],
        )
    }

    /// Positions flattened to `x, y` pairs for buffer upload.
    pub fn position_data(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    pub fn index_count(&self) -> i32 {
        self.indices.len() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smiley_is_an_eight_triangle_fan() {
        let shape = Shape::smiley();
        assert_eq!(shape.positions.len(), 10);
        assert_eq!(shape.indices.len(), 24);
        // every triangle fans out from the center point
        for tri in shape.indices.chunks(3) {
            assert_eq!(tri[0], 0);
        }
    }

    #[test]
    fn test_indices_are_in_range() {
        for shape in [
            Shape::smiley(),
            Shape::eye(),
            Shape::mouth(),
            Shape::pivot_marker(),
        ] {
            let max = shape.positions.len() as u16;
            assert!(shape.indices.iter().all(|&i| i < max));
            assert_eq!(shape.indices.len() % 3, 0);
        }
    }

    #[test]
    fn test_position_data_interleaves_pairs() {
        let data = Shape::eye().position_data();
        assert_eq!(data, vec![-10.0, -10.0, 10.0, -10.0, 0.0, 10.0]);
    }
}
