//! Data files for the block grid puzzle
//!
//! Shape tables and theme tables are plain JSON so they can be edited
//! outside the game:
//!
//! ```json
//! { "shapes": [ { "id": 0, "cells": [ { "x": 0, "y": 0 } ] } ] }
//! { "themes": [ { "id": 0, "asset": "blue" } ] }
//! ```
//!
//! Cells are normalized on load; the offsets in the file do not need to
//! start at the origin.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use block_grid_core::{Shape, ShapeCatalog, ThemeCatalog};
use block_grid_types::{Cell, ShapeId, ThemeId};

/// Built-in shape table: dot, bars, squares and corners
const DEFAULT_SHAPES_JSON: &str = include_str!("../data/block_shapes.json");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
struct CellRecord {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShapeRecord {
    id: u32,
    cells: Vec<CellRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShapeFile {
    shapes: Vec<ShapeRecord>,
}

/// One theme with the name of the asset it is drawn with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeEntry {
    pub id: u32,
    #[serde(default)]
    pub asset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeFile {
    themes: Vec<ThemeEntry>,
}

/// Loaded theme table: the catalog used for generation plus asset lookup
#[derive(Debug, Clone)]
pub struct ThemeTable {
    entries: Vec<ThemeEntry>,
    catalog: ThemeCatalog,
}

impl ThemeTable {
    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn entries(&self) -> &[ThemeEntry] {
        &self.entries
    }

    pub fn get(&self, id: ThemeId) -> Option<&ThemeEntry> {
        self.entries.iter().find(|e| e.id == id.0)
    }

    /// Asset name for `id`, None when the theme is unknown
    pub fn asset(&self, id: ThemeId) -> Option<&str> {
        self.get(id).map(|e| e.asset.as_str())
    }
}

/// Parse a shape table from JSON text
pub fn parse_shapes(json: &str) -> Result<ShapeCatalog> {
    let file: ShapeFile = serde_json::from_str(json).context("invalid shape table JSON")?;
    if file.shapes.is_empty() {
        bail!("shape table has no shapes");
    }

    let mut shapes = Vec::with_capacity(file.shapes.len());
    for record in file.shapes {
        let cells = record.cells.iter().map(|c| Cell::new(c.x, c.y));
        let shape = Shape::new(ShapeId(record.id), cells)
            .with_context(|| format!("shape {} is invalid", record.id))?;
        shapes.push(shape);
    }

    Ok(ShapeCatalog::new(shapes)?)
}

/// Read and parse a shape table file
pub fn load_shapes(path: impl AsRef<Path>) -> Result<ShapeCatalog> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read shape table {}", path.display()))?;
    parse_shapes(&json).with_context(|| format!("failed to load {}", path.display()))
}

/// Serialize a catalog back to the table format, pretty-printed
pub fn shapes_to_json(catalog: &ShapeCatalog) -> Result<String> {
    let file = ShapeFile {
        shapes: catalog
            .shapes()
            .iter()
            .map(|shape| ShapeRecord {
                id: shape.id().0,
                cells: shape
                    .cells()
                    .iter()
                    .map(|c| CellRecord { x: c.x, y: c.y })
                    .collect(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// The built-in shape table
pub fn default_shapes() -> Result<ShapeCatalog> {
    parse_shapes(DEFAULT_SHAPES_JSON).context("built-in shape table")
}

/// Parse a theme table from JSON text
pub fn parse_themes(json: &str) -> Result<ThemeTable> {
    let file: ThemeFile = serde_json::from_str(json).context("invalid theme table JSON")?;
    if file.themes.is_empty() {
        bail!("theme table has no themes");
    }

    let catalog = ThemeCatalog::new(file.themes.iter().map(|e| ThemeId(e.id)).collect())?;
    Ok(ThemeTable {
        entries: file.themes,
        catalog,
    })
}

/// Read and parse a theme table file
pub fn load_themes(path: impl AsRef<Path>) -> Result<ThemeTable> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read theme table {}", path.display()))?;
    parse_themes(&json).with_context(|| format!("failed to load {}", path.display()))
}
