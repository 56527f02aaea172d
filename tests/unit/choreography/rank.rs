use super::*;

fn all_keys(dims: GridDims) -> Vec<CellKey> {
    let mut keys = Vec::new();
    for row in 0..dims.rows {
        for col in 0..dims.cols {
            keys.push(CellKey::new(row, col));
        }
    }
    keys
}

#[test]
fn each_rank_is_a_permutation() {
    for (rows, cols) in [(1, 1), (1, 5), (4, 1), (6, 8), (3, 7)] {
        let dims = GridDims::new(rows, cols).unwrap();
        let n = dims.cell_count() as usize;
        for f in [z_rank, n_rank, alt_rank] {
            let mut seen = vec![false; n];
            for key in all_keys(dims) {
                let r = f(key, dims) as usize;
                assert!(r < n);
                assert!(!seen[r], "duplicate rank {r} in {rows}x{cols}");
                seen[r] = true;
            }
        }
    }
}

#[test]
fn known_ranks_on_default_grid() {
    let dims = GridDims::default();
    assert_eq!(ranks(CellKey::new(0, 0), dims), Ranks { z: 0, n: 0, alt: 0 });
    assert_eq!(
        ranks(CellKey::new(5, 7), dims),
        Ranks {
            z: 47,
            n: 47,
            alt: 42
        }
    );
    // Second column runs upward.
    assert_eq!(alt_rank(CellKey::new(5, 1), dims), 6);
    assert_eq!(alt_rank(CellKey::new(0, 1), dims), 11);
    assert_eq!(n_rank(CellKey::new(0, 1), dims), 6);
    assert_eq!(z_rank(CellKey::new(1, 0), dims), 8);
}
