use super::*;
use crate::foundation::core::{Point, Size};

fn corner_flags(cell: &Cell) -> usize {
    let e = cell.edges;
    [
        e.top && e.left,
        e.top && e.right,
        e.bottom && e.right,
        e.bottom && e.left,
    ]
    .iter()
    .filter(|v| **v)
    .count()
}

#[test]
fn default_grid_is_row_major_48_cells() {
    let cells = build_cells(GridDims::default());
    assert_eq!(cells.len(), 48);
    for (i, cell) in cells.iter().enumerate() {
        assert_eq!(cell.row as usize, i / 8);
        assert_eq!(cell.col as usize, i % 8);
    }
    assert_eq!(cells[0].key().to_string(), "0-0");
    assert_eq!(cells[47].key().to_string(), "5-7");
}

#[test]
fn fractions_tile_the_unit_square_for_all_small_dims() {
    for rows in 1..=9u32 {
        for cols in 1..=9u32 {
            let dims = GridDims::new(rows, cols).unwrap();
            let cells = build_cells(dims);
            assert_eq!(cells.len(), (rows * cols) as usize);

            let area: f64 = cells.iter().map(|c| c.frac.area()).sum();
            assert!((area - 1.0).abs() < 1e-9, "{rows}x{cols} area {area}");

            for cell in &cells {
                assert!(cell.fractional_x() >= 0.0 && cell.fractional_x() < 1.0);
                assert!(cell.fractional_y() >= 0.0 && cell.fractional_y() < 1.0);
                if cell.col == 0 {
                    assert_eq!(cell.frac.x0, 0.0);
                }
                if cell.col + 1 == cols {
                    assert_eq!(cell.frac.x1, 1.0);
                } else {
                    let right = &cells[(cell.row * cols + cell.col + 1) as usize];
                    assert_eq!(cell.frac.x1, right.frac.x0);
                }
                if cell.row + 1 == rows {
                    assert_eq!(cell.frac.y1, 1.0);
                } else {
                    let below = &cells[((cell.row + 1) * cols + cell.col) as usize];
                    assert_eq!(cell.frac.y1, below.frac.y0);
                }
            }

            let corners: usize = cells.iter().map(corner_flags).sum();
            assert_eq!(corners, 4, "{rows}x{cols}");
            if rows >= 2 && cols >= 2 {
                assert_eq!(cells.iter().filter(|c| c.is_corner()).count(), 4);
            }
        }
    }
}

#[test]
fn single_cell_takes_all_corners() {
    let cells = build_cells(GridDims::SINGLE);
    assert_eq!(cells.len(), 1);
    let radii = RoundedRectRadii::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(cells[0].corner_radii(radii), radii);
}

#[test]
fn corner_cells_inherit_matching_radius_only() {
    let cells = build_cells(GridDims::default());
    let radii = RoundedRectRadii::new(1.0, 2.0, 3.0, 4.0);
    let geo = layout_cells(&cells, Rect::new(0.0, 0.0, 80.0, 60.0), Vec2::ZERO, radii);

    let at = |row: u32, col: u32| geo[(row * 8 + col) as usize].radii;
    assert_eq!(at(0, 0), RoundedRectRadii::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!(at(0, 7), RoundedRectRadii::new(0.0, 2.0, 0.0, 0.0));
    assert_eq!(at(5, 7), RoundedRectRadii::new(0.0, 0.0, 3.0, 0.0));
    assert_eq!(at(5, 0), RoundedRectRadii::new(0.0, 0.0, 0.0, 4.0));
    assert_eq!(at(2, 3), square_corners());
    assert_eq!(at(0, 3), square_corners());
}

#[test]
fn layout_places_cells_in_page_space() {
    let cells = build_cells(GridDims::default());
    let image = Rect::from_origin_size(Point::new(100.0, 50.0), Size::new(800.0, 600.0));
    let geo = layout_cells(&cells, image, Vec2::new(0.0, 1000.0), square_corners());

    assert_eq!(geo[0].rect, Rect::new(100.0, 1050.0, 200.0, 1150.0));
    let last = geo[47].rect;
    assert_eq!(last.x1, 900.0);
    assert_eq!(last.y1, 1650.0);
    for g in &geo {
        assert!((g.rect.width() - 100.0).abs() < 1e-9);
        assert!((g.rect.height() - 100.0).abs() < 1e-9);
    }
}

#[test]
fn relayout_with_new_rect_keeps_structure() {
    let cells = build_cells(GridDims::default());
    let a = layout_cells(&cells, Rect::new(0.0, 0.0, 80.0, 60.0), Vec2::ZERO, square_corners());
    let b = layout_cells(
        &cells,
        Rect::new(10.0, 10.0, 170.0, 130.0),
        Vec2::ZERO,
        square_corners(),
    );
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.key, y.key);
        assert_eq!(x.radii, y.radii);
    }
}

#[test]
fn zero_size_rect_yields_degenerate_tiles() {
    let cells = build_cells(GridDims::default());
    let geo = layout_cells(&cells, Rect::ZERO, Vec2::new(3.0, 4.0), square_corners());
    for g in &geo {
        assert_eq!(g.rect, Rect::new(3.0, 4.0, 3.0, 4.0));
    }
}
