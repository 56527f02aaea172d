use crate::foundation::core::{CellKey, GridDims, Rect, RoundedRectRadii, Vec2, square_corners};

/// Which image edges a cell touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CellEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// Immutable descriptor of one grid cell.
///
/// Positions are fractions of the image size, so a cell set built for one rect stays
/// valid for any other rect with the same grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    /// Cell bounds in unit image space; `x0`/`y0` are the fractional offsets in `[0,1)`.
    pub frac: Rect,
    pub edges: CellEdges,
}

impl Cell {
    pub fn key(&self) -> CellKey {
        CellKey::new(self.row, self.col)
    }

    pub fn fractional_x(&self) -> f64 {
        self.frac.x0
    }

    pub fn fractional_y(&self) -> f64 {
        self.frac.y0
    }

    pub fn is_corner(&self) -> bool {
        (self.edges.top || self.edges.bottom) && (self.edges.left || self.edges.right)
    }

    /// Radii for this cell: each outer corner inherits the image's radius on that corner,
    /// every interior corner stays square.
    pub fn corner_radii(&self, source: RoundedRectRadii) -> RoundedRectRadii {
        let pick = |a: bool, b: bool, r: f64| if a && b { r } else { 0.0 };
        let e = self.edges;
        RoundedRectRadii::new(
            pick(e.top, e.left, source.top_left),
            pick(e.top, e.right, source.top_right),
            pick(e.bottom, e.right, source.bottom_right),
            pick(e.bottom, e.left, source.bottom_left),
        )
    }

    /// Absolute page rect for an image whose viewport-relative rect is `image_rect`.
    pub fn page_rect(&self, image_rect: Rect, scroll: Vec2) -> Rect {
        let w = image_rect.width();
        let h = image_rect.height();
        Rect::new(
            image_rect.x0 + self.frac.x0 * w,
            image_rect.y0 + self.frac.y0 * h,
            image_rect.x0 + self.frac.x1 * w,
            image_rect.y0 + self.frac.y1 * h,
        ) + scroll
    }
}

/// Page-space geometry resolved for one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGeometry {
    pub key: CellKey,
    pub rect: Rect,
    pub radii: RoundedRectRadii,
}

/// Partition the unit square into `dims.rows × dims.cols` cells, row-major.
pub fn build_cells(dims: GridDims) -> Vec<Cell> {
    let rows = dims.rows.max(1);
    let cols = dims.cols.max(1);
    let mut cells = Vec::with_capacity(rows as usize * cols as usize);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(Cell {
                row,
                col,
                frac: Rect::new(
                    f64::from(col) / f64::from(cols),
                    f64::from(row) / f64::from(rows),
                    f64::from(col + 1) / f64::from(cols),
                    f64::from(row + 1) / f64::from(rows),
                ),
                edges: CellEdges {
                    top: row == 0,
                    bottom: row + 1 == rows,
                    left: col == 0,
                    right: col + 1 == cols,
                },
            });
        }
    }
    cells
}

/// Resolve page geometry for every cell. Pure; no rendering involved.
pub fn layout_cells(
    cells: &[Cell],
    image_rect: Rect,
    scroll: Vec2,
    radii: RoundedRectRadii,
) -> Vec<TileGeometry> {
    cells
        .iter()
        .map(|cell| TileGeometry {
            key: cell.key(),
            rect: cell.page_rect(image_rect, scroll),
            radii: if cell.is_corner() {
                cell.corner_radii(radii)
            } else {
                square_corners()
            },
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/grid/builder.rs"]
mod tests;
