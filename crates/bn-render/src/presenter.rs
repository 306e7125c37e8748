use std::io::Write;

use bn_core::error::SurfaceError;
use bn_core::grid::{Rgb, StyledCell, StyledGrid};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::diff::{RowRun, diff_frames};

/// Profondeur couleur négociée avec le terminal hôte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorDepth {
    /// 24 bits par canal (SGR 38;2).
    TrueColor,
    /// Palette indexée 256 (cube 6×6×6 + rampe de gris).
    Ansi256,
    /// Aucune couleur, attributs seuls.
    Mono,
}

impl ColorDepth {
    /// Détection depuis l'environnement : `NO_COLOR` prime, puis
    /// `COLORTERM`, puis `TERM`.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
            std::env::var("NO_COLOR").is_ok(),
        )
    }

    /// Variante pure de `detect`, testable sans toucher à l'environnement.
    #[must_use]
    pub fn from_env(colorterm: Option<&str>, term: Option<&str>, no_color: bool) -> Self {
        if no_color {
            return Self::Mono;
        }
        if let Some(ct) = colorterm
            && (ct.contains("truecolor") || ct.contains("24bit"))
        {
            return Self::TrueColor;
        }
        match term {
            Some(t) if t.contains("256") => Self::Ansi256,
            Some("dumb") => Self::Mono,
            _ => Self::Ansi256,
        }
    }
}

/// Présente les frames d'animation par écriture différentielle.
///
/// Garde la dernière frame affichée ; la suivante ne réécrit que les
/// segments modifiés (`diff_frames`). Un changement de dimensions force un
/// redraw complet. L'écrivain est générique pour capturer la sortie en
/// test.
pub struct TerminalPresenter<W: Write> {
    out: W,
    depth: ColorDepth,
    /// Coin haut-gauche de la surface dans le terminal.
    origin: (u16, u16),
    last: Option<StyledGrid>,
}

impl<W: Write> TerminalPresenter<W> {
    #[must_use]
    pub fn new(out: W, depth: ColorDepth, origin: (u16, u16)) -> Self {
        if depth != ColorDepth::TrueColor {
            log::debug!("profondeur couleur dégradée: {depth:?}");
        }
        Self {
            out,
            depth,
            origin,
            last: None,
        }
    }

    #[must_use]
    pub fn depth(&self) -> ColorDepth {
        self.depth
    }

    /// Oublie la dernière frame : la prochaine `present` redessine tout.
    /// À appeler sur resize du terminal.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Affiche une frame. Différentiel si la précédente a les mêmes
    /// dimensions, redraw complet sinon.
    pub fn present(&mut self, frame: &StyledGrid) -> Result<(), SurfaceError> {
        let runs = match &self.last {
            Some(prev) if (prev.width, prev.height) == (frame.width, frame.height) => {
                diff_frames(prev, frame)
            }
            _ => full_runs(frame),
        };
        for run in &runs {
            self.emit_run(run)?;
        }
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        self.last = Some(frame.clone());
        Ok(())
    }

    fn emit_run(&mut self, run: &RowRun) -> Result<(), SurfaceError> {
        let (ox, oy) = self.origin;
        queue!(self.out, MoveTo(ox + run.x0, oy + run.y))?;
        let mut current: Option<(Option<Rgb>, bool, bool)> = None;
        for cell in &run.cells {
            let style = (cell.fg, cell.bold, cell.dim);
            if current != Some(style) {
                self.emit_style(cell)?;
                current = Some(style);
            }
            queue!(self.out, Print(cell.ch))?;
        }
        Ok(())
    }

    fn emit_style(&mut self, cell: &StyledCell) -> Result<(), SurfaceError> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        if cell.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if cell.dim {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        match (self.depth, cell.fg) {
            (ColorDepth::Mono, _) | (_, None) => queue!(self.out, ResetColor)?,
            (ColorDepth::TrueColor, Some((r, g, b))) => {
                queue!(self.out, SetForegroundColor(Color::Rgb { r, g, b }))?;
            }
            (ColorDepth::Ansi256, Some((r, g, b))) => {
                queue!(
                    self.out,
                    SetForegroundColor(Color::AnsiValue(rgb_to_256(r, g, b)))
                )?;
            }
        }
        Ok(())
    }
}

/// Redraw complet : un run par ligne.
fn full_runs(frame: &StyledGrid) -> Vec<RowRun> {
    (0..frame.height)
        .map(|y| RowRun {
            y,
            x0: 0,
            cells: (0..frame.width).map(|x| *frame.get(x, y)).collect(),
        })
        .collect()
}

/// RGB → indice 256 le plus proche : rampe de gris pour les teintes
/// neutres, cube 6×6×6 sinon. Les niveaux du cube [0,95,135,175,215,255]
/// ne sont pas uniformes, d'où les seuils aux points médians.
#[must_use]
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((r - 8) / 10).min(23);
    }
    16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b)
}

fn cube_index(v: u8) -> u8 {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        (v - 35) / 40
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(ch: char) -> StyledGrid {
        let mut g = StyledGrid::new(4, 2);
        g.set(
            1,
            0,
            StyledCell {
                ch,
                fg: Some((255, 0, 0)),
                bg: None,
                bold: true,
                dim: false,
            },
        );
        g
    }

    #[test]
    fn first_present_writes_full_frame() {
        let mut p = TerminalPresenter::new(Vec::new(), ColorDepth::TrueColor, (0, 0));
        p.present(&frame('A')).unwrap();
        let text = String::from_utf8_lossy(&p.out).into_owned();
        assert!(text.contains('A'));
    }

    #[test]
    fn identical_second_frame_writes_almost_nothing() {
        let mut p = TerminalPresenter::new(Vec::new(), ColorDepth::TrueColor, (0, 0));
        p.present(&frame('A')).unwrap();
        let after_first = p.out.len();
        p.present(&frame('A')).unwrap();
        // Seuls le reset final et le flush : pas de cellules réécrites.
        assert!(p.out.len() - after_first < 16);
    }

    #[test]
    fn changed_cell_is_rewritten() {
        let mut p = TerminalPresenter::new(Vec::new(), ColorDepth::TrueColor, (0, 0));
        p.present(&frame('A')).unwrap();
        let after_first = p.out.len();
        p.present(&frame('B')).unwrap();
        let tail = String::from_utf8_lossy(&p.out[after_first..]).into_owned();
        assert!(tail.contains('B'));
        assert!(!tail.contains('A'));
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut p = TerminalPresenter::new(Vec::new(), ColorDepth::TrueColor, (0, 0));
        p.present(&frame('A')).unwrap();
        let wider = StyledGrid::new(9, 2);
        // Dimensions différentes : aucun diff possible, redraw complet.
        p.present(&wider).unwrap();
        assert_eq!(p.last.as_ref().map(|g| g.width), Some(9));
    }

    #[test]
    fn mono_depth_emits_no_color_sequences() {
        let mut p = TerminalPresenter::new(Vec::new(), ColorDepth::Mono, (0, 0));
        p.present(&frame('A')).unwrap();
        let text = String::from_utf8_lossy(&p.out).into_owned();
        assert!(!text.contains("38;2;"));
        assert!(!text.contains("38;5;"));
    }

    #[test]
    fn depth_detection_precedence() {
        assert_eq!(
            ColorDepth::from_env(Some("truecolor"), Some("xterm-256color"), false),
            ColorDepth::TrueColor
        );
        assert_eq!(
            ColorDepth::from_env(Some("truecolor"), None, true),
            ColorDepth::Mono
        );
        assert_eq!(
            ColorDepth::from_env(None, Some("xterm-256color"), false),
            ColorDepth::Ansi256
        );
        assert_eq!(ColorDepth::from_env(None, Some("dumb"), false), ColorDepth::Mono);
    }

    #[test]
    fn rgb_to_256_grayscale_and_cube() {
        assert_eq!(rgb_to_256(0, 0, 0), 16);
        assert_eq!(rgb_to_256(255, 255, 255), 231);
        assert_eq!(rgb_to_256(128, 128, 128), 232 + 12);
        assert_eq!(rgb_to_256(255, 0, 0), 196);
        assert_eq!(rgb_to_256(0, 255, 0), 46);
        assert_eq!(rgb_to_256(0, 0, 255), 21);
    }
}
