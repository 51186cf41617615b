//! Piece shapes
//!
//! A shape is a list of rotations, each written as rows of text where `C`
//! marks a filled cell and any other character is empty. Parsing turns each
//! rotation into `(column, row)` offsets relative to the piece origin.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The cat piece: a straight five-block column inside a 5x7 box
pub const CAT_I_PATTERN: [&str; 7] = [
    ".....",
    "..C..",
    "..C..",
    "..C..",
    "..C..",
    "..C..",
    ".....",
];

/// Serializable shape description (as written in config files)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Display name, also used by the piece chooser
    pub name: String,
    /// Rotations, each a list of text rows
    pub rotations: Vec<Vec<String>>,
}

impl ShapeConfig {
    /// The built-in cat piece
    pub fn cat_i() -> Self {
        Self {
            name: "I".to_string(),
            rotations: vec![CAT_I_PATTERN.iter().map(|row| row.to_string()).collect()],
        }
    }
}

/// A parsed piece shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: String,
    /// Filled cells per rotation as (column, row) offsets
    rotations: Vec<Vec<(i32, i32)>>,
}

impl Shape {
    /// Parse a shape from rotation patterns
    ///
    /// Every rotation must contain at least one `C` cell.
    pub fn new<R, S>(name: impl Into<String>, rotations: impl IntoIterator<Item = R>) -> Result<Self, ShapeError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut parsed = Vec::new();

        for (index, rows) in rotations.into_iter().enumerate() {
            let cells = parse_rotation(rows.as_ref());
            if cells.is_empty() {
                return Err(ShapeError::EmptyRotation { name, rotation: index });
            }
            parsed.push(cells);
        }

        if parsed.is_empty() {
            return Err(ShapeError::NoRotations { name });
        }

        Ok(Self { name, rotations: parsed })
    }

    /// Parse a shape from its config description
    pub fn from_config(config: &ShapeConfig) -> Result<Self, ShapeError> {
        Self::new(config.name.clone(), &config.rotations)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct rotations
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Cell offsets for a rotation index; indices wrap around
    pub fn cells(&self, rotation: usize) -> &[(i32, i32)] {
        &self.rotations[rotation % self.rotations.len()]
    }
}

fn parse_rotation<S: AsRef<str>>(rows: &[S]) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        for (col, ch) in line.as_ref().chars().enumerate() {
            if ch == 'C' {
                cells.push((col as i32, row as i32));
            }
        }
    }
    cells
}

/// The ordered set of shapes pieces are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl ShapeCatalog {
    /// Build a catalog; it must be non-empty and names must be unique
    pub fn new(shapes: Vec<Shape>) -> Result<Self, ShapeError> {
        if shapes.is_empty() {
            return Err(ShapeError::EmptyCatalog);
        }

        if let Some(dup) = Self::first_duplicate(&shapes) {
            return Err(ShapeError::DuplicateName(dup));
        }

        Ok(Self { shapes })
    }

    fn first_duplicate(shapes: &[Shape]) -> Option<String> {
        let mut seen = HashSet::new();
        shapes
            .iter()
            .find(|shape| !seen.insert(shape.name()))
            .map(|shape| shape.name().to_string())
    }

    /// Build a catalog from config descriptions
    pub fn from_configs(configs: &[ShapeConfig]) -> Result<Self, ShapeError> {
        let shapes = configs
            .iter()
            .map(Shape::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(shapes)
    }

    /// The default cat piece set
    pub fn cat_pieces() -> Self {
        Self {
            shapes: vec![Shape {
                name: "I".to_string(),
                rotations: vec![parse_rotation(&CAT_I_PATTERN)],
            }],
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Always false; catalogs are non-empty by construction
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Shape names in catalog order
    pub fn names(&self) -> Vec<String> {
        self.shapes.iter().map(|s| s.name().to_string()).collect()
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::cat_pieces()
    }
}

/// Errors from building shapes and catalogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Shape has no rotations at all
    NoRotations { name: String },
    /// A rotation has no `C` cells
    EmptyRotation { name: String, rotation: usize },
    /// Catalog has no shapes
    EmptyCatalog,
    /// Two shapes share a name
    DuplicateName(String),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::NoRotations { name } => write!(f, "Shape '{}' has no rotations", name),
            ShapeError::EmptyRotation { name, rotation } => {
                write!(f, "Shape '{}' rotation {} has no filled cells", name, rotation)
            }
            ShapeError::EmptyCatalog => write!(f, "Shape catalog is empty"),
            ShapeError::DuplicateName(name) => write!(f, "Duplicate shape name '{}'", name),
        }
    }
}

impl std::error::Error for ShapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_piece_cells() {
        let catalog = ShapeCatalog::cat_pieces();
        let shape = &catalog.shapes()[0];
        assert_eq!(shape.name(), "I");
        assert_eq!(shape.rotation_count(), 1);
        assert_eq!(shape.cells(0), &[(2, 1), (2, 2), (2, 3), (2, 4), (2, 5)]);
    }

    #[test]
    fn test_rotation_index_wraps() {
        let shape = Shape::new("L", [vec!["C.", "CC"], vec!["CC", "C."]]).unwrap();
        assert_eq!(shape.cells(2), shape.cells(0));
        assert_eq!(shape.cells(3), shape.cells(1));
    }

    #[test]
    fn test_config_matches_builtin() {
        let from_config = ShapeCatalog::from_configs(&[ShapeConfig::cat_i()]).unwrap();
        assert_eq!(from_config, ShapeCatalog::cat_pieces());
    }

    #[test]
    fn test_empty_rotation_rejected() {
        let err = Shape::new("X", [vec!["...", "..."]]).unwrap_err();
        assert_eq!(err, ShapeError::EmptyRotation { name: "X".to_string(), rotation: 0 });
    }

    #[test]
    fn test_no_rotations_rejected() {
        let rotations: Vec<Vec<String>> = Vec::new();
        let err = Shape::new("X", &rotations).unwrap_err();
        assert_eq!(err, ShapeError::NoRotations { name: "X".to_string() });
    }

    #[test]
    fn test_catalog_validation() {
        assert_eq!(ShapeCatalog::new(Vec::new()), Err(ShapeError::EmptyCatalog));

        let a = Shape::new("A", [vec!["C"]]).unwrap();
        let err = ShapeCatalog::new(vec![a.clone(), a]).unwrap_err();
        assert_eq!(err, ShapeError::DuplicateName("A".to_string()));
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", ShapeError::EmptyRotation { name: "Z".to_string(), rotation: 1 });
        assert!(msg.contains("'Z'"));
        assert!(msg.contains("rotation 1"));
    }
}
