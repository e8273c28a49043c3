//! Shapes and catalogs
//!
//! A shape is a set of offset cells normalized so the smallest x and the
//! smallest y are both zero. The offset (0, 0) of the bounding box maps onto
//! the anchor cell when placed.
//!
//! Catalogs are built once by a loader and stay read-only for the level's
//! lifetime.

use std::fmt;

use crate::cell_set::CellSet;
use crate::types::{Cell, ShapeId, ThemeId};

/// Rejection reasons for shape construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    Empty,
    DuplicateCell(Cell),
    /// Offsets spread too far apart to normalize into `i32`
    OffsetOutOfRange(Cell),
}

impl ShapeError {
    pub fn code(self) -> &'static str {
        match self {
            ShapeError::Empty => "empty_shape",
            ShapeError::DuplicateCell(_) => "duplicate_cell",
            ShapeError::OffsetOutOfRange(_) => "offset_out_of_range",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ShapeError::Empty => "shape has no cells",
            ShapeError::DuplicateCell(_) => "shape lists the same cell twice",
            ShapeError::OffsetOutOfRange(_) => "shape offsets span too wide a range",
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::DuplicateCell(cell) | ShapeError::OffsetOutOfRange(cell) => {
                write!(f, "{} at {}", self.message(), cell)
            }
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for ShapeError {}

/// A placeable piece definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    id: ShapeId,
    cells: Vec<Cell>,
    width: i32,
    height: i32,
}

impl Shape {
    /// Normalize and validate a list of cells
    ///
    /// Offsets are shifted so min x and min y become zero. Input order is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_core::shape::Shape;
    /// use block_grid_core::types::{Cell, ShapeId};
    ///
    /// let bar = Shape::new(ShapeId(1), [(3, 5), (4, 5), (5, 5)]).unwrap();
    /// assert_eq!(bar.cells(), &[Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]);
    /// assert_eq!((bar.width(), bar.height()), (3, 1));
    /// ```
    pub fn new<I, C>(id: ShapeId, cells: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let raw: Vec<Cell> = cells.into_iter().map(Into::into).collect();
        if raw.is_empty() {
            return Err(ShapeError::Empty);
        }

        let min_x = raw.iter().map(|c| c.x).min().unwrap_or(0);
        let min_y = raw.iter().map(|c| c.y).min().unwrap_or(0);

        let mut normalized: Vec<Cell> = Vec::with_capacity(raw.len());
        for c in raw {
            let (Some(x), Some(y)) = (c.x.checked_sub(min_x), c.y.checked_sub(min_y)) else {
                return Err(ShapeError::OffsetOutOfRange(c));
            };
            let cell = Cell::new(x, y);
            if normalized.contains(&cell) {
                return Err(ShapeError::DuplicateCell(cell));
            }
            normalized.push(cell);
        }

        // Normalized offsets are >= 0, so only the + 1 can overflow
        let widest = normalized.iter().copied().max_by_key(|c| c.x);
        let tallest = normalized.iter().copied().max_by_key(|c| c.y);
        let (widest, tallest) = (widest.unwrap_or(Cell::ORIGIN), tallest.unwrap_or(Cell::ORIGIN));
        let width = widest
            .x
            .checked_add(1)
            .ok_or(ShapeError::OffsetOutOfRange(widest))?;
        let height = tallest
            .y
            .checked_add(1)
            .ok_or(ShapeError::OffsetOutOfRange(tallest))?;

        Ok(Self {
            id,
            cells: normalized,
            width,
            height,
        })
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Normalized offsets
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; kept for the `len` convention
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box width
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Bounding box height
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Absolute cells when anchored at `anchor`
    pub fn cells_at(&self, anchor: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().map(move |&offset| anchor + offset)
    }

    /// Mask of the anchored shape, None if any cell falls off the board
    pub fn mask_at(&self, anchor: Cell) -> Option<CellSet> {
        let mut mask = CellSet::EMPTY;
        for cell in self.cells_at(anchor) {
            if !mask.insert(cell) {
                return None;
            }
        }
        Some(mask)
    }
}

/// Rejection reasons for catalog construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateShape(ShapeId),
    DuplicateTheme(ThemeId),
}

impl CatalogError {
    pub fn code(self) -> &'static str {
        match self {
            CatalogError::DuplicateShape(_) => "duplicate_shape",
            CatalogError::DuplicateTheme(_) => "duplicate_theme",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CatalogError::DuplicateShape(_) => "shape id listed twice",
            CatalogError::DuplicateTheme(_) => "theme id listed twice",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateShape(id) => write!(f, "{}: {}", self.message(), id),
            CatalogError::DuplicateTheme(id) => write!(f, "{}: {}", self.message(), id),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered, read-only collection of shapes
///
/// May be empty; generation reports an empty catalog as an error instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl ShapeCatalog {
    pub fn new(shapes: Vec<Shape>) -> Result<Self, CatalogError> {
        for (i, shape) in shapes.iter().enumerate() {
            if shapes[..i].iter().any(|s| s.id() == shape.id()) {
                return Err(CatalogError::DuplicateShape(shape.id()));
            }
        }
        Ok(Self { shapes })
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }
}

/// Ordered, read-only collection of distinct theme ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeCatalog {
    themes: Vec<ThemeId>,
}

impl ThemeCatalog {
    pub fn new(themes: Vec<ThemeId>) -> Result<Self, CatalogError> {
        for (i, theme) in themes.iter().enumerate() {
            if themes[..i].contains(theme) {
                return Err(CatalogError::DuplicateTheme(*theme));
            }
        }
        Ok(Self { themes })
    }

    /// Ids `0..count`
    pub fn sequential(count: u32) -> Self {
        Self {
            themes: (0..count).map(ThemeId).collect(),
        }
    }

    pub fn themes(&self) -> &[ThemeId] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn contains(&self, id: ThemeId) -> bool {
        self.themes.contains(&id)
    }
}
