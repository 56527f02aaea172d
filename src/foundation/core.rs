use std::fmt;

use crate::foundation::error::{VeilError, VeilResult};

pub use kurbo::{Point, Rect, RoundedRectRadii, Size, Vec2};

/// Position of a tagged image in document order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ImageIndex(pub usize);

impl fmt::Display for ImageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grid coordinate of a cell. Displays as `"row-col"`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CellKey {
    pub row: u32,
    pub col: u32,
}

impl CellKey {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Grid dimensions, both at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridDims {
    pub rows: u32,
    pub cols: u32,
}

impl GridDims {
    /// The degenerate one-tile grid.
    pub const SINGLE: Self = Self { rows: 1, cols: 1 };

    /// Largest accepted `rows * cols`. Ranks and per-tile delays stay well inside `u32`/`u64`.
    pub const MAX_CELLS: u32 = 4096;

    pub fn new(rows: u32, cols: u32) -> VeilResult<Self> {
        let dims = Self { rows, cols };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(self) -> VeilResult<()> {
        if self.rows == 0 {
            return Err(VeilError::validation("grid rows must be >= 1"));
        }
        if self.cols == 0 {
            return Err(VeilError::validation("grid cols must be >= 1"));
        }
        match self.rows.checked_mul(self.cols) {
            Some(n) if n <= Self::MAX_CELLS => Ok(()),
            _ => Err(VeilError::validation(format!(
                "grid {}x{} exceeds {} cells",
                self.rows,
                self.cols,
                Self::MAX_CELLS
            ))),
        }
    }

    pub fn cell_count(self) -> u32 {
        self.rows.saturating_mul(self.cols)
    }

    pub fn contains(self, key: CellKey) -> bool {
        key.row < self.rows && key.col < self.cols
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self { rows: 6, cols: 8 }
    }
}

/// Straight (non-premultiplied) RGBA8 fill color.
///
/// Serializes as a hex string; `white` and `black` are accepted on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn parse(s: &str) -> VeilResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }

        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| VeilError::validation(format!("color '{s}' must start with '#'")))?;
        if !hex.is_ascii() {
            return Err(VeilError::validation(format!("color '{s}' is not hex")));
        }
        let nibble = |i: usize| -> VeilResult<u8> {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map_err(|_| VeilError::validation(format!("color '{s}' is not hex")))
        };
        let byte = |i: usize| -> VeilResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| VeilError::validation(format!("color '{s}' is not hex")))
        };

        match hex.len() {
            3 => Ok(Self::opaque(
                nibble(0)? * 17,
                nibble(1)? * 17,
                nibble(2)? * 17,
            )),
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(VeilError::validation(format!(
                "color '{s}' must be #rgb, #rrggbb or #rrggbbaa"
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = VeilError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

/// Replace an unmeasurable rect (any non-finite coordinate) with a zero-size rect at the
/// origin, and normalize negative extents.
pub fn sanitize_rect(rect: Rect) -> Rect {
    let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Rect::ZERO;
    }
    rect.abs()
}

/// Corner radii with every corner at zero.
pub fn square_corners() -> RoundedRectRadii {
    RoundedRectRadii::from_single_radius(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
