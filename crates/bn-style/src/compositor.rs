use bn_core::gradient::{Direction, Gradient, hsv_to_rgb, rgb_to_hsv};
use bn_core::grid::{CharGrid, Rgb, StyledCell, StyledGrid};
use bn_core::profile::Profile;

/// Glyphe de l'ombre portée.
const SHADOW_CH: char = '▒';
/// Glyphe du contour.
const OUTLINE_CH: char = '·';
/// Décalage de l'ombre (dx, dy).
const SHADOW_OFFSET: (u16, u16) = (1, 1);

/// Paramètres de style, extraits du profil.
///
/// # Example
/// ```
/// use bn_style::StyleSpec;
/// use bn_core::profile::Profile;
/// let spec = StyleSpec::from_profile(&Profile::default());
/// assert!(spec.outline && spec.shadow);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StyleSpec {
    /// Rampe de couleur.
    pub gradient: Gradient,
    /// Axe de projection de la rampe.
    pub direction: Direction,
    /// Contour autour des glyphes.
    pub outline: bool,
    /// Ombre portée décalée.
    pub shadow: bool,
    /// Couleurs terminal par défaut uniquement.
    pub monochrome: bool,
}

impl StyleSpec {
    /// Extrait les champs de style d'un profil.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            gradient: Gradient::from_name(&profile.gradient),
            direction: Direction::from_name(&profile.gradient_dir),
            outline: profile.outline,
            shadow: profile.shadow,
            monochrome: profile.monochrome,
        }
    }
}

/// Compose une `StyledGrid` depuis une grille brute.
///
/// Fonction pure : mêmes entrées ⇒ même sortie, aucun état caché.
///
/// Ordre de composition, du fond vers l'avant :
/// 1. ombre — copie décalée de (+1,+1), glyphe `▒`, couleur désaturée et
///    assombrie, clippée aux bords (jamais de wrap) ;
/// 2. contour — `·` sur les cellules vides ayant un voisin (8-voisinage)
///    non vide, couleur assombrie ; ne recouvre jamais une cellule source
///    non vide ;
/// 3. glyphes sources — couleur du gradient à leur coordonnée.
///
/// Monochrome force tous les foregrounds à `None` (défaut terminal),
/// gradient ignoré.
#[must_use]
pub fn compose(grid: &CharGrid, spec: &StyleSpec) -> StyledGrid {
    let (w, h) = (grid.width, grid.height);
    let mut out = StyledGrid::new(w, h);

    if spec.shadow {
        let (dx, dy) = SHADOW_OFFSET;
        for y in 0..h {
            for x in 0..w {
                if grid.is_blank(x, y) {
                    continue;
                }
                let (sx, sy) = (x + dx, y + dy);
                if sx >= w || sy >= h {
                    continue; // clip, never wrap
                }
                if grid.is_blank(sx, sy) {
                    out.set(
                        sx,
                        sy,
                        StyledCell {
                            ch: SHADOW_CH,
                            fg: shadow_color(spec, sx, sy, w, h),
                            bg: None,
                            bold: false,
                            dim: true,
                        },
                    );
                }
            }
        }
    }

    if spec.outline {
        for y in 0..h {
            for x in 0..w {
                if !grid.is_blank(x, y) || !has_inked_neighbor(grid, x, y) {
                    continue;
                }
                out.set(
                    x,
                    y,
                    StyledCell {
                        ch: OUTLINE_CH,
                        fg: outline_color(spec, x, y, w, h),
                        bg: None,
                        bold: false,
                        dim: spec.monochrome,
                    },
                );
            }
        }
    }

    for y in 0..h {
        for x in 0..w {
            if grid.is_blank(x, y) {
                continue;
            }
            out.set(
                x,
                y,
                StyledCell {
                    ch: grid.get(x, y),
                    fg: cell_color(spec, x, y, w, h),
                    bg: None,
                    bold: false,
                    dim: false,
                },
            );
        }
    }

    out
}

/// 8-voisinage : au moins un voisin non vide.
fn has_inked_neighbor(grid: &CharGrid, x: u16, y: u16) -> bool {
    let (w, h) = (i32::from(grid.width), i32::from(grid.height));
    for dy in -1..=1i32 {
        for dx in -1..=1i32 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (nx, ny) = (i32::from(x) + dx, i32::from(y) + dy);
            if nx >= 0 && ny >= 0 && nx < w && ny < h && !grid.is_blank(nx as u16, ny as u16) {
                return true;
            }
        }
    }
    false
}

fn cell_color(spec: &StyleSpec, x: u16, y: u16, w: u16, h: u16) -> Option<Rgb> {
    if spec.monochrome {
        return None;
    }
    let t = spec.direction.position(x, y, w, h);
    Some(spec.gradient.color_at(t))
}

/// Couleur du contour : gradient assombri à 35 %.
fn outline_color(spec: &StyleSpec, x: u16, y: u16, w: u16, h: u16) -> Option<Rgb> {
    cell_color(spec, x, y, w, h).map(|(r, g, b)| (scale(r, 0.35), scale(g, 0.35), scale(b, 0.35)))
}

/// Couleur de l'ombre : gradient désaturé puis assombri.
fn shadow_color(spec: &StyleSpec, x: u16, y: u16, w: u16, h: u16) -> Option<Rgb> {
    cell_color(spec, x, y, w, h).map(|(r, g, b)| {
        let (hue, s, v) = rgb_to_hsv(r, g, b);
        hsv_to_rgb(hue, s * 0.3, v * 0.45)
    })
}

#[inline]
fn scale(c: u8, k: f32) -> u8 {
    (f32::from(c) * k) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(outline: bool, shadow: bool, monochrome: bool) -> StyleSpec {
        StyleSpec {
            gradient: Gradient::Rainbow,
            direction: Direction::Lr,
            outline,
            shadow,
            monochrome,
        }
    }

    fn cross() -> CharGrid {
        CharGrid::from_lines(&["     ", "  #  ", " ### ", "  #  ", "     "])
    }

    #[test]
    fn monochrome_produces_zero_foreground_colors() {
        for gradient in ["rainbow", "fire", "neon"] {
            let mut s = spec(true, true, true);
            s.gradient = Gradient::from_name(gradient);
            let styled = compose(&cross(), &s);
            assert!(styled.cells.iter().all(|c| c.fg.is_none()), "{gradient}");
        }
    }

    #[test]
    fn outline_never_overwrites_source_cells() {
        let grid = cross();
        let styled = compose(&grid, &spec(true, true, false));
        for y in 0..grid.height {
            for x in 0..grid.width {
                if !grid.is_blank(x, y) {
                    assert_eq!(styled.get(x, y).ch, grid.get(x, y));
                }
            }
        }
    }

    #[test]
    fn outline_marks_blank_neighbors() {
        let grid = CharGrid::from_lines(&["   ", " # ", "   "]);
        let styled = compose(&grid, &spec(true, false, false));
        for (x, y) in [(0, 0), (1, 0), (2, 1), (1, 2)] {
            assert_eq!(styled.get(x, y).ch, '·', "({x},{y})");
        }
    }

    #[test]
    fn shadow_is_clipped_at_grid_bounds() {
        // Glyphe dans le coin bas-droit : l'ombre sortirait de la grille.
        let grid = CharGrid::from_lines(&["  ", " #"]);
        let styled = compose(&grid, &spec(false, true, false));
        // Aucune cellule d'ombre nulle part (pas de wrap en (0,0)).
        assert!(styled.cells.iter().all(|c| c.ch != '▒'));
    }

    #[test]
    fn shadow_lands_under_and_right() {
        let grid = CharGrid::from_lines(&["#  ", "   ", "   "]);
        let styled = compose(&grid, &spec(false, true, false));
        let shadow = styled.get(1, 1);
        assert_eq!(shadow.ch, '▒');
        assert!(shadow.dim);
    }

    #[test]
    fn source_glyph_wins_over_shadow() {
        let grid = CharGrid::from_lines(&["## ", "## ", "   "]);
        let styled = compose(&grid, &spec(false, true, false));
        assert_eq!(styled.get(1, 1).ch, '#');
    }

    #[test]
    fn compose_is_idempotent() {
        let grid = cross();
        let s = spec(true, true, false);
        assert_eq!(compose(&grid, &s), compose(&grid, &s));
    }

    #[test]
    fn plain_gradient_gives_white_glyphs() {
        let mut s = spec(false, false, false);
        s.gradient = Gradient::Plain;
        let styled = compose(&cross(), &s);
        for cell in styled.cells.iter().filter(|c| c.ch == '#') {
            assert_eq!(cell.fg, Some((255, 255, 255)));
        }
    }
}
