use bn_core::grid::{StyledCell, StyledGrid};

/// Segment contigu de cellules modifiées sur une ligne.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowRun {
    /// Ligne du segment.
    pub y: u16,
    /// Colonne de départ.
    pub x0: u16,
    /// Cellules à réécrire, de gauche à droite.
    pub cells: Vec<StyledCell>,
}

/// Longueur maximale d'un trou de cellules identiques absorbé dans un run.
/// Réécrire deux cellules inchangées coûte moins qu'un repositionnement
/// curseur supplémentaire.
const MERGE_GAP: u16 = 2;

/// Calcule les segments à réécrire pour passer de `prev` à `next`.
///
/// Les deux grilles doivent avoir les mêmes dimensions ; l'appelant fait un
/// redraw complet sinon. Propriété : `apply_runs(prev, &runs) == next`.
///
/// # Example
/// ```
/// use bn_core::grid::StyledGrid;
/// use bn_render::{apply_runs, diff_frames};
/// let a = StyledGrid::new(8, 2);
/// let b = StyledGrid::new(8, 2);
/// assert!(diff_frames(&a, &b).is_empty());
/// ```
#[must_use]
pub fn diff_frames(prev: &StyledGrid, next: &StyledGrid) -> Vec<RowRun> {
    debug_assert_eq!((prev.width, prev.height), (next.width, next.height));
    let mut runs = Vec::new();
    for y in 0..next.height {
        let mut x = 0u16;
        while x < next.width {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            // Début d'un run : étendre tant que ça change, en absorbant les
            // petits trous identiques.
            let x0 = x;
            let mut end = x + 1;
            let mut gap = 0u16;
            for probe in (x + 1)..next.width {
                if prev.get(probe, y) == next.get(probe, y) {
                    gap += 1;
                    if gap > MERGE_GAP {
                        break;
                    }
                } else {
                    gap = 0;
                    end = probe + 1;
                }
            }
            let cells = (x0..end).map(|cx| *next.get(cx, y)).collect();
            runs.push(RowRun { y, x0, cells });
            x = end + gap;
        }
    }
    runs
}

/// Rejoue des segments sur une grille. Inverse de `diff_frames` :
/// `apply_runs(prev, &diff_frames(prev, next)) == next`.
#[must_use]
pub fn apply_runs(base: &StyledGrid, runs: &[RowRun]) -> StyledGrid {
    let mut out = base.clone();
    for run in runs {
        for (i, cell) in run.cells.iter().enumerate() {
            let x = run.x0 + i as u16;
            if x < out.width && run.y < out.height {
                out.set(x, run.y, *cell);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(u16, u16, char)]) -> StyledGrid {
        let mut g = StyledGrid::new(12, 4);
        for &(x, y, ch) in cells {
            g.set(
                x,
                y,
                StyledCell {
                    ch,
                    fg: Some((10, 20, 30)),
                    bg: None,
                    bold: false,
                    dim: false,
                },
            );
        }
        g
    }

    #[test]
    fn identical_frames_produce_no_runs() {
        let a = grid_with(&[(1, 1, 'A'), (2, 1, 'B')]);
        assert!(diff_frames(&a, &a.clone()).is_empty());
    }

    #[test]
    fn single_cell_change_is_one_run() {
        let a = grid_with(&[(3, 2, 'X')]);
        let b = grid_with(&[(3, 2, 'Y')]);
        let runs = diff_frames(&a, &b);
        assert_eq!(runs.len(), 1);
        assert_eq!((runs[0].y, runs[0].x0), (2, 3));
        assert_eq!(runs[0].cells.len(), 1);
    }

    #[test]
    fn nearby_changes_merge_into_one_run() {
        // Changements en x=2 et x=4 : trou de 1 ≤ MERGE_GAP, run unique.
        let a = grid_with(&[]);
        let b = grid_with(&[(2, 0, 'A'), (4, 0, 'B')]);
        let runs = diff_frames(&a, &b);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].cells.len(), 3);
    }

    #[test]
    fn distant_changes_stay_separate_runs() {
        let a = grid_with(&[]);
        let b = grid_with(&[(0, 0, 'A'), (9, 0, 'B')]);
        let runs = diff_frames(&a, &b);
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn diff_then_apply_roundtrips() {
        let a = grid_with(&[(0, 0, '#'), (5, 1, '@'), (11, 3, '%')]);
        let b = grid_with(&[(0, 0, '#'), (6, 1, '@'), (7, 2, '·'), (11, 3, '▒')]);
        let runs = diff_frames(&a, &b);
        assert_eq!(apply_runs(&a, &runs), b);
    }

    #[test]
    fn attribute_only_change_is_detected() {
        let a = grid_with(&[(4, 0, 'Z')]);
        let mut b = a.clone();
        b.set(
            4,
            0,
            StyledCell {
                bold: true,
                ..*a.get(4, 0)
            },
        );
        assert_eq!(diff_frames(&a, &b).len(), 1);
    }
}
