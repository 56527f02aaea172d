//! Traversal ranks over a fixed grid.
//!
//! Ranks only feed delay computation; they are recomputed on every plan and never stored.

use crate::foundation::core::{CellKey, GridDims};

/// Every rank the policies use for one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Ranks {
    /// Row-major ("Z") rank.
    pub z: u32,
    /// Column-major ("reverse-N") rank.
    pub n: u32,
    /// Column-major boustrophedon rank.
    pub alt: u32,
}

/// `row * cols + col`.
pub fn z_rank(key: CellKey, dims: GridDims) -> u32 {
    key.row * dims.cols + key.col
}

/// `col * rows + row`.
pub fn n_rank(key: CellKey, dims: GridDims) -> u32 {
    key.col * dims.rows + key.row
}

/// Column-major snake: even columns run top to bottom, odd columns bottom to top.
pub fn alt_rank(key: CellKey, dims: GridDims) -> u32 {
    let within = if key.col % 2 == 0 {
        key.row
    } else {
        dims.rows.saturating_sub(1).saturating_sub(key.row)
    };
    key.col * dims.rows + within
}

pub fn ranks(key: CellKey, dims: GridDims) -> Ranks {
    Ranks {
        z: z_rank(key, dims),
        n: n_rank(key, dims),
        alt: alt_rank(key, dims),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/rank.rs"]
mod tests;
