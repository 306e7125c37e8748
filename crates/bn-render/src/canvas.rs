use bn_core::grid::StyledGrid;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};

/// Écrit directement une `StyledGrid` dans un `ratatui::Buffer`.
///
/// Pas de widget Canvas ratatui — écriture directe pour zéro overhead.
/// Utilisé pour l'aperçu du menu ; la lecture plein écran passe par
/// `TerminalPresenter`.
pub fn render_grid(buf: &mut Buffer, area: Rect, grid: &StyledGrid) {
    for cy in 0..grid.height.min(area.height) {
        for cx in 0..grid.width.min(area.width) {
            let cell = grid.get(cx, cy);
            if cell.is_blank() {
                continue;
            }
            if let Some(buf_cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                buf_cell.set_char(cell.ch);
                match cell.fg {
                    Some((r, g, b)) => {
                        buf_cell.set_fg(Color::Rgb(r, g, b));
                    }
                    None => {
                        buf_cell.set_fg(Color::Reset);
                    }
                }
                if let Some((r, g, b)) = cell.bg {
                    buf_cell.set_bg(Color::Rgb(r, g, b));
                }
                let mut modifier = Modifier::empty();
                if cell.bold {
                    modifier |= Modifier::BOLD;
                }
                if cell.dim {
                    modifier |= Modifier::DIM;
                }
                if !modifier.is_empty() {
                    buf_cell.modifier = modifier;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bn_core::grid::StyledCell;

    #[test]
    fn writes_cells_inside_area_only() {
        let mut grid = StyledGrid::new(10, 3);
        grid.set(
            0,
            0,
            StyledCell {
                ch: 'A',
                fg: Some((1, 2, 3)),
                bg: None,
                bold: false,
                dim: false,
            },
        );
        grid.set(
            9,
            2,
            StyledCell {
                ch: 'Z',
                fg: None,
                bg: None,
                bold: false,
                dim: false,
            },
        );
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        render_grid(&mut buf, area, &grid);
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some("A"));
        // (9,2) est hors zone : rien d'écrit, pas de panique.
        assert!(buf.cell((4, 1)).is_some());
    }

    #[test]
    fn blank_cells_leave_buffer_untouched() {
        let grid = StyledGrid::new(3, 1);
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        render_grid(&mut buf, area, &grid);
        assert_eq!(buf.cell((1, 0)).map(|c| c.symbol()), Some(" "));
    }
}
