//! Board state: locked cells and the derived color grid

use std::collections::HashMap;

use crate::piece::Piece;

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Colors of blocks that have come to rest, keyed by `(x, y)`
///
/// Cells above the visible board (`y < 0`) can be locked too; they never show
/// up in a [`Grid`] but they count for [`check_lost`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedPositions {
    cells: HashMap<(i32, i32), Rgb>,
}

impl LockedPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock a single cell, replacing whatever was there
    pub fn lock(&mut self, x: i32, y: i32, color: Rgb) {
        self.cells.insert((x, y), color);
    }

    /// Lock every cell of a piece in its current position
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.lock(x, y, piece.color);
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.cells.get(&(x, y)).copied()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.contains_key(&(x, y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), Rgb)> + '_ {
        self.cells.iter().map(|(&pos, &color)| (pos, color))
    }
}

/// Fixed-size board of cell colors; `None` is an empty cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Row-major cells
    cells: Vec<Option<Rgb>>,
}

impl Grid {
    /// An empty board
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self { width, height, cells: vec![None; len] }
    }

    /// A board showing every locked cell that lies inside it
    pub fn from_locked(width: i32, height: i32, locked: &LockedPositions) -> Self {
        let mut grid = Self::new(width, height);
        for ((x, y), color) in locked.iter() {
            grid.set(x, y, color);
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y * self.width + x) as usize)
    }

    /// Color of a cell; `None` when empty or outside the board
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    /// Paint a cell; writes outside the board are ignored
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Some(color);
        }
    }

    /// True for an in-bounds cell with nothing in it
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i].is_none())
    }

    /// Whether `piece` fits on the board
    ///
    /// Cells above the top edge (`y < 0`) are always accepted so pieces can
    /// hang partly off the top; every other cell must be free and in bounds.
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .into_iter()
            .all(|(x, y)| y < 0 || self.is_free(x, y))
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = ((i32, i32), Rgb)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let x = i as i32 % self.width;
            let y = i as i32 / self.width;
            cell.map(|color| ((x, y), color))
        })
    }
}

/// Remove every full row and drop the rows above it; returns rows cleared
///
/// Each remaining cell moves down by the number of cleared rows beneath it,
/// so clears that are not contiguous still leave the stack intact.
pub fn clear_rows(locked: &mut LockedPositions, width: i32, height: i32) -> u32 {
    let full_rows: Vec<i32> = (0..height)
        .filter(|&y| (0..width).all(|x| locked.contains(x, y)))
        .collect();

    if full_rows.is_empty() {
        return 0;
    }

    locked.cells = std::mem::take(&mut locked.cells)
        .into_iter()
        .filter(|((_, y), _)| !full_rows.contains(y))
        .map(|((x, y), color)| {
            let below = full_rows.iter().filter(|&&row| row > y).count() as i32;
            ((x, y + below), color)
        })
        .collect();

    full_rows.len() as u32
}

/// True when any locked cell reached the top row
pub fn check_lost(locked: &LockedPositions) -> bool {
    locked.iter().any(|((_, y), _)| y < 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Shape, ShapeCatalog};

    const RED: Rgb = [255, 0, 0];
    const BLUE: Rgb = [0, 0, 255];

    fn fill_row(locked: &mut LockedPositions, y: i32, width: i32) {
        for x in 0..width {
            locked.lock(x, y, RED);
        }
    }

    fn cat_piece(x: i32, y: i32) -> Piece {
        Piece::new(x, y, ShapeCatalog::cat_pieces().shapes()[0].clone(), BLUE)
    }

    #[test]
    fn test_from_locked_ignores_out_of_bounds() {
        let mut locked = LockedPositions::new();
        locked.lock(1, 2, RED);
        locked.lock(4, -1, RED);
        locked.lock(20, 0, RED);

        let grid = Grid::from_locked(10, 20, &locked);
        assert_eq!(grid.get(1, 2), Some(RED));
        assert_eq!(grid.occupied().count(), 1);
    }

    #[test]
    fn test_black_locked_cell_is_occupied() {
        let mut locked = LockedPositions::new();
        locked.lock(0, 0, [0, 0, 0]);
        let grid = Grid::from_locked(10, 20, &locked);
        assert!(!grid.is_free(0, 0));
    }

    #[test]
    fn test_valid_space() {
        let mut locked = LockedPositions::new();
        locked.lock(5, 10, RED);
        let grid = Grid::from_locked(10, 20, &locked);

        assert!(grid.is_valid(&cat_piece(3, 0)));
        // Column 5 rows 6..=10 hits the locked block
        assert!(!grid.is_valid(&cat_piece(3, 5)));
        // Off the left and right edges
        assert!(!grid.is_valid(&cat_piece(-3, 0)));
        assert!(!grid.is_valid(&cat_piece(8, 0)));
        // Off the bottom
        assert!(!grid.is_valid(&cat_piece(0, 15)));
    }

    #[test]
    fn test_cells_above_top_are_accepted() {
        let grid = Grid::new(10, 20);
        // Rows -4..=0: only row 0 is checked
        assert!(grid.is_valid(&cat_piece(3, -5)));

        // Above the top even a column outside the board is accepted
        let shape = Shape::new("dot", [vec!["C"]]).unwrap();
        assert!(grid.is_valid(&Piece::new(-1, -1, shape, RED)));
    }

    #[test]
    fn test_clear_single_row() {
        let mut locked = LockedPositions::new();
        fill_row(&mut locked, 19, 10);
        locked.lock(3, 18, BLUE);

        assert_eq!(clear_rows(&mut locked, 10, 20), 1);
        assert_eq!(locked.len(), 1);
        assert_eq!(locked.get(3, 19), Some(BLUE));
    }

    #[test]
    fn test_clear_four_rows() {
        let mut locked = LockedPositions::new();
        for y in 16..20 {
            fill_row(&mut locked, y, 10);
        }
        locked.lock(0, 15, BLUE);

        assert_eq!(clear_rows(&mut locked, 10, 20), 4);
        assert_eq!(locked.len(), 1);
        assert_eq!(locked.get(0, 19), Some(BLUE));
    }

    #[test]
    fn test_clear_non_contiguous_rows() {
        let mut locked = LockedPositions::new();
        fill_row(&mut locked, 19, 10);
        locked.lock(2, 18, BLUE);
        fill_row(&mut locked, 17, 10);
        locked.lock(7, 16, BLUE);

        assert_eq!(clear_rows(&mut locked, 10, 20), 2);
        assert_eq!(locked.get(2, 19), Some(BLUE));
        assert_eq!(locked.get(7, 18), Some(BLUE));
        assert_eq!(locked.len(), 2);
    }

    #[test]
    fn test_no_full_rows() {
        let mut locked = LockedPositions::new();
        locked.lock(0, 19, RED);
        let before = locked.clone();
        assert_eq!(clear_rows(&mut locked, 10, 20), 0);
        assert_eq!(locked, before);
    }

    #[test]
    fn test_check_lost() {
        let mut locked = LockedPositions::new();
        locked.lock(4, 1, RED);
        assert!(!check_lost(&locked));

        locked.lock(4, 0, RED);
        assert!(check_lost(&locked));

        let mut above = LockedPositions::new();
        above.lock(4, -2, RED);
        assert!(check_lost(&above));
    }
}
