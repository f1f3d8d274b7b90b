//! Terrain sources: where the required signature of each cell comes from
//!
//! Coordinates are y-down (row 0 at the top), matching Tiled.

use wangmap_core::{ColorIndex, WangId, WangPosition};

/// A grid that can describe the terrain around each of its cells
pub trait TerrainSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Required signature of the cell, or `None` when nothing is drawn there
    fn wang_id_at(&self, x: u32, y: u32) -> Option<WangId>;
}

/// Terrain given by a function of (x, y, position)
pub struct FnTerrainSource<F> {
    width: u32,
    height: u32,
    color_at: F,
}

impl<F> FnTerrainSource<F>
where
    F: Fn(u32, u32, WangPosition) -> ColorIndex,
{
    pub fn new(width: u32, height: u32, color_at: F) -> Self {
        Self {
            width,
            height,
            color_at,
        }
    }
}

impl<F> TerrainSource for FnTerrainSource<F>
where
    F: Fn(u32, u32, WangPosition) -> ColorIndex,
{
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn wang_id_at(&self, x: u32, y: u32) -> Option<WangId> {
        let mut wang_id = WangId::WILDCARD;
        for position in WangPosition::ALL {
            wang_id.set(position, (self.color_at)(x, y, position));
        }
        Some(wang_id)
    }
}

/// How neighbors outside the map are treated by [`CellTerrainMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Out-of-bounds cells are empty, so terrain gets an edge at the map border
    #[default]
    Empty,
    /// Out-of-bounds cells repeat the nearest in-bounds cell
    Extend,
}

/// One terrain color per cell (0 = empty)
///
/// A cell's edge carries its color when the neighbor across that edge has the
/// same color. A corner carries it only when both adjacent edge neighbors and
/// the diagonal neighbor do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTerrainMap {
    width: u32,
    height: u32,
    cells: Vec<ColorIndex>,
    border: BorderMode,
}

impl CellTerrainMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
            border: BorderMode::Empty,
        }
    }

    /// Wrap row-major cell data; `None` if the length does not match
    pub fn from_cells(width: u32, height: u32, cells: Vec<ColorIndex>) -> Option<Self> {
        if cells.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
            border: BorderMode::Empty,
        })
    }

    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    pub fn get(&self, x: u32, y: u32) -> ColorIndex {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.cells[grid_index(self.width as usize, x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: ColorIndex) {
        if x < self.width && y < self.height {
            self.cells[grid_index(self.width as usize, x, y)] = color;
        }
    }

    /// Fill a rectangle, clipped to the map
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: ColorIndex) {
        for cy in y..y.saturating_add(h).min(self.height) {
            for cx in x..x.saturating_add(w).min(self.width) {
                self.set(cx, cy, color);
            }
        }
    }

    fn neighbor(&self, x: u32, y: u32, position: WangPosition) -> ColorIndex {
        let (dx, dy) = position.offset();
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        let oob = nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64;

        if !oob {
            return self.get(nx as u32, ny as u32);
        }
        match self.border {
            BorderMode::Empty => 0,
            BorderMode::Extend => {
                let cx = nx.clamp(0, self.width as i64 - 1) as u32;
                let cy = ny.clamp(0, self.height as i64 - 1) as u32;
                self.get(cx, cy)
            }
        }
    }
}

impl TerrainSource for CellTerrainMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn wang_id_at(&self, x: u32, y: u32) -> Option<WangId> {
        let color = self.get(x, y);
        if color == 0 {
            return None;
        }

        let same = |p: WangPosition| self.neighbor(x, y, p) == color;
        let mut wang_id = WangId::WILDCARD;

        for position in WangPosition::ALL {
            let connected = if position.is_corner() {
                same(position) && same(position.prev()) && same(position.next())
            } else {
                same(position)
            };
            if connected {
                wang_id.set(position, color);
            }
        }

        Some(wang_id)
    }
}

/// Tiled-native terrain storage: colors live on the corner lattice and on
/// the edges between cells rather than on the cells themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexTerrainMap {
    width: u32,
    height: u32,
    /// (width + 1) × (height + 1) lattice points
    corners: Vec<ColorIndex>,
    /// width × (height + 1) edges between rows
    horizontal_edges: Vec<ColorIndex>,
    /// (width + 1) × height edges between columns
    vertical_edges: Vec<ColorIndex>,
}

impl VertexTerrainMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            corners: vec![0; (width as usize + 1) * (height as usize + 1)],
            horizontal_edges: vec![0; width as usize * (height as usize + 1)],
            vertical_edges: vec![0; (width as usize + 1) * height as usize],
        }
    }

    /// Set the lattice point at the top-left corner of cell (corner_x, corner_y)
    pub fn set_corner(&mut self, corner_x: u32, corner_y: u32, color: ColorIndex) -> bool {
        if corner_x > self.width || corner_y > self.height {
            return false;
        }
        self.corners[grid_index(self.width as usize + 1, corner_x, corner_y)] = color;
        true
    }

    /// Set the edge along the top of cell (tile_x, edge_y)
    pub fn set_horizontal_edge(&mut self, tile_x: u32, edge_y: u32, color: ColorIndex) -> bool {
        if tile_x >= self.width || edge_y > self.height {
            return false;
        }
        self.horizontal_edges[grid_index(self.width as usize, tile_x, edge_y)] = color;
        true
    }

    /// Set the edge along the left of cell (edge_x, tile_y)
    pub fn set_vertical_edge(&mut self, edge_x: u32, tile_y: u32, color: ColorIndex) -> bool {
        if edge_x > self.width || tile_y >= self.height {
            return false;
        }
        self.vertical_edges[grid_index(self.width as usize + 1, edge_x, tile_y)] = color;
        true
    }

    /// Assign one color to all 8 positions around a cell
    pub fn fill_cell(&mut self, x: u32, y: u32, color: ColorIndex) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        for (cx, cy) in [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)] {
            self.set_corner(cx, cy, color);
        }
        self.set_horizontal_edge(x, y, color);
        self.set_horizontal_edge(x, y + 1, color);
        self.set_vertical_edge(x, y, color);
        self.set_vertical_edge(x + 1, y, color);
        true
    }

    fn corner(&self, corner_x: u32, corner_y: u32) -> ColorIndex {
        self.corners[grid_index(self.width as usize + 1, corner_x, corner_y)]
    }

    fn horizontal_edge(&self, tile_x: u32, edge_y: u32) -> ColorIndex {
        self.horizontal_edges[grid_index(self.width as usize, tile_x, edge_y)]
    }

    fn vertical_edge(&self, edge_x: u32, tile_y: u32) -> ColorIndex {
        self.vertical_edges[grid_index(self.width as usize + 1, edge_x, tile_y)]
    }
}

impl TerrainSource for VertexTerrainMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    /// `None` for cells no terrain touches
    fn wang_id_at(&self, x: u32, y: u32) -> Option<WangId> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let wang_id = WangId::new([
            self.horizontal_edge(x, y),
            self.corner(x + 1, y),
            self.vertical_edge(x + 1, y),
            self.corner(x + 1, y + 1),
            self.horizontal_edge(x, y + 1),
            self.corner(x, y + 1),
            self.vertical_edge(x, y),
            self.corner(x, y),
        ]);

        if wang_id.is_wildcard() {
            None
        } else {
            Some(wang_id)
        }
    }
}

/// Row-major index, computed in `usize` so large maps do not wrap
fn grid_index(row_len: usize, x: u32, y: u32) -> usize {
    y as usize * row_len + x as usize
}
