//! The falling piece

use crate::grid::Rgb;
use crate::shape::Shape;

/// A shape placed on the board
///
/// `(x, y)` is the top-left corner of the shape's pattern box, so a piece at
/// `y = 0` whose pattern starts with an empty row has its first block in row 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub x: i32,
    pub y: i32,
    pub shape: Shape,
    pub color: Rgb,
    /// Rotation counter; wraps modulo the shape's rotation count
    pub rotation: usize,
}

impl Piece {
    /// Create a piece at `(x, y)` in its first rotation
    pub fn new(x: i32, y: i32, shape: Shape, color: Rgb) -> Self {
        Self { x, y, shape, color, rotation: 0 }
    }

    /// Board cells covered by the piece in its current rotation
    pub fn cells(&self) -> Vec<(i32, i32)> {
        self.shape
            .cells(self.rotation)
            .iter()
            .map(|&(col, row)| (self.x + col, self.y + row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeCatalog;

    #[test]
    fn test_cells_offset_by_origin() {
        let shape = ShapeCatalog::cat_pieces().shapes()[0].clone();
        let piece = Piece::new(3, 0, shape, [255, 182, 193]);
        assert_eq!(piece.cells(), vec![(5, 1), (5, 2), (5, 3), (5, 4), (5, 5)]);
    }

    #[test]
    fn test_cells_follow_rotation() {
        let shape = Shape::new("S", [vec!["CC"], vec!["C", "C"]]).unwrap();
        let mut piece = Piece::new(1, 1, shape, [0, 0, 0]);
        assert_eq!(piece.cells(), vec![(1, 1), (2, 1)]);

        piece.rotation += 1;
        assert_eq!(piece.cells(), vec![(1, 1), (1, 2)]);

        piece.rotation += 1;
        assert_eq!(piece.cells(), vec![(1, 1), (2, 1)]);
    }
}
