/// Couleur RGB 24 bits.
pub type Rgb = (u8, u8, u8);

/// Grille de caractères bruts, sortie d'une source texte ou image.
///
/// Flat array row-major, immuable une fois produite par la source.
///
/// # Example
/// ```
/// use bn_core::grid::CharGrid;
/// let grid = CharGrid::from_lines(&["AB", "C"]);
/// assert_eq!((grid.width, grid.height), (2, 2));
/// assert_eq!(grid.get(0, 1), 'C');
/// assert_eq!(grid.get(1, 1), ' ');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    /// Flat array of characters, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: u16,
    /// Height in characters.
    pub height: u16,
}

impl CharGrid {
    /// Crée une grille remplie d'espaces.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![' '; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Construit une grille depuis des lignes, chaque ligne right-paddée
    /// à la largeur de la plus longue.
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let width = lines
            .iter()
            .map(|l| l.as_ref().chars().count())
            .max()
            .unwrap_or(0)
            .min(usize::from(u16::MAX)) as u16;
        let height = lines.len().min(usize::from(u16::MAX)) as u16;
        let mut grid = Self::new(width, height);
        for (y, line) in lines.iter().enumerate().take(usize::from(height)) {
            for (x, ch) in line.as_ref().chars().enumerate() {
                if x < usize::from(width) {
                    grid.set(x as u16, y as u16, ch);
                }
            }
        }
        grid
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> char {
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)] = ch;
    }

    /// `true` si la cellule est un espace.
    #[inline(always)]
    #[must_use]
    pub fn is_blank(&self, x: u16, y: u16) -> bool {
        self.get(x, y) == ' '
    }

    /// Copie clippée aux `max_width` premières colonnes.
    ///
    /// Le clipping se fait ici, avant tout scheduling d'animation, pour que
    /// les cellules hors surface n'entrent jamais dans une séquence.
    #[must_use]
    pub fn clipped(&self, max_width: u16) -> Self {
        if self.width <= max_width {
            return self.clone();
        }
        let mut out = Self::new(max_width, self.height);
        for y in 0..self.height {
            for x in 0..max_width {
                out.set(x, y, self.get(x, y));
            }
        }
        out
    }

}

/// Cellule stylée : caractère + couleurs + emphase.
///
/// `fg`/`bg` à `None` = couleur par défaut du terminal.
///
/// # Example
/// ```
/// use bn_core::grid::StyledCell;
/// let cell = StyledCell::default();
/// assert_eq!(cell.ch, ' ');
/// assert!(cell.fg.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyledCell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground, `None` = défaut terminal.
    pub fg: Option<Rgb>,
    /// Couleur background, `None` = défaut terminal.
    pub bg: Option<Rgb>,
    /// Emphase bold.
    pub bold: bool,
    /// Emphase dim.
    pub dim: bool,
}

impl Default for StyledCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
            dim: false,
        }
    }
}

impl StyledCell {
    /// `true` si la cellule n'affiche rien (espace sans background).
    #[inline(always)]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.ch == ' ' && self.bg.is_none()
    }
}

/// Grille stylée, mêmes dimensions que la `CharGrid` source.
///
/// Une frame d'animation est un snapshot de `StyledGrid` à un tick donné.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<StyledCell>,
    /// Width in characters.
    pub width: u16,
    /// Height in characters.
    pub height: u16,
}

impl StyledGrid {
    /// Crée une grille pré-allouée de cellules vides.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![StyledCell::default(); usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &StyledCell {
        &self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, cell: StyledCell) {
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)] = cell;
    }

    /// Nombre de cellules non vides.
    #[must_use]
    pub fn non_blank_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_blank()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_pads_ragged_rows() {
        let grid = CharGrid::from_lines(&["ABC", "D"]);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.get(2, 0), 'C');
        assert_eq!(grid.get(1, 1), ' ');
        assert_eq!(grid.get(2, 1), ' ');
    }

    #[test]
    fn from_lines_empty() {
        let grid = CharGrid::from_lines::<&str>(&[]);
        assert_eq!((grid.width, grid.height), (0, 0));
    }

    #[test]
    fn clipped_drops_trailing_columns() {
        let grid = CharGrid::from_lines(&["ABCDEF"]);
        let clipped = grid.clipped(3);
        assert_eq!(clipped.width, 3);
        assert_eq!(clipped.get(2, 0), 'C');
    }

    #[test]
    fn clipped_is_identity_when_narrower() {
        let grid = CharGrid::from_lines(&["AB"]);
        assert_eq!(grid.clipped(10), grid);
    }

    #[test]
    fn styled_cell_blank_detection() {
        assert!(StyledCell::default().is_blank());
        let mut cell = StyledCell::default();
        cell.bg = Some((10, 10, 10));
        assert!(!cell.is_blank());
    }

    #[test]
    fn non_blank_count_counts_glyphs() {
        let mut grid = StyledGrid::new(4, 1);
        grid.set(
            1,
            0,
            StyledCell {
                ch: '#',
                ..StyledCell::default()
            },
        );
        assert_eq!(grid.non_blank_count(), 1);
    }
}
