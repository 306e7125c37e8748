use std::path::{Path, PathBuf};

use bn_core::error::SourceError;
use bn_core::grid::CharGrid;
use figlet_rs::FIGfont;

/// Catalogue des polices FIGlet disponibles : la police `standard`
/// embarquée, plus tout fichier `.flf` découvert dans `fonts/`.
///
/// # Example
/// ```
/// use bn_source::text::FontCatalog;
/// let catalog = FontCatalog::discover(std::path::Path::new("fonts"));
/// assert!(catalog.names().contains(&"standard".to_string()));
/// ```
pub struct FontCatalog {
    names: Vec<String>,
    dir: PathBuf,
}

impl FontCatalog {
    /// Scanne `dir` pour des fichiers `.flf`. Le répertoire peut ne pas
    /// exister : le catalogue contient alors uniquement `standard`.
    #[must_use]
    pub fn discover(dir: &Path) -> Self {
        let mut names = vec!["standard".to_string()];
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|e| e == "flf")
                    && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                {
                    names.push(stem.to_string());
                }
            }
        }
        names[1..].sort(); // Predictable cycle order
        log::debug!("catalogue de polices: {} entrées", names.len());
        Self {
            names,
            dir: dir.to_path_buf(),
        }
    }

    /// Noms disponibles, `standard` toujours en tête.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Nom suivant dans le cycle (wrap). Nom absent → `standard`.
    #[must_use]
    pub fn next_after(&self, current: &str) -> &str {
        let idx = self
            .names
            .iter()
            .position(|n| n == current)
            .map_or(0, |i| (i + 1) % self.names.len());
        &self.names[idx]
    }

    /// Charge une police par nom.
    ///
    /// # Errors
    /// `SourceError::FontNotFound` si le nom est inconnu ou le `.flf` invalide.
    pub fn load(&self, name: &str) -> Result<FIGfont, SourceError> {
        if name == "standard" {
            return FIGfont::standard().map_err(|reason| SourceError::FontNotFound {
                name: name.to_string(),
                reason,
            });
        }
        let path = self.dir.join(format!("{name}.flf"));
        let path_str = path.to_string_lossy().to_string();
        FIGfont::from_file(&path_str).map_err(|reason| SourceError::FontNotFound {
            name: name.to_string(),
            reason,
        })
    }
}

/// Rend `message` en banner FIGlet, aligné et clippé à `width` colonnes.
///
/// Les sauts de ligne du message empilent des blocs FIGlet indépendants.
///
/// # Errors
/// `SourceError::InvalidWidth` si `width` est nul, `FontNotFound` si la
/// police n'existe pas, `EmptyRender` si le moteur ne produit rien.
///
/// # Example
/// ```
/// use bn_source::text::{FontCatalog, render_text};
/// let catalog = FontCatalog::discover(std::path::Path::new("fonts"));
/// let grid = render_text("HI", "standard", 80, "left", &catalog).unwrap();
/// assert!(grid.height > 0);
/// assert!(grid.width <= 80);
/// ```
pub fn render_text(
    message: &str,
    font_name: &str,
    width: u16,
    align: &str,
    catalog: &FontCatalog,
) -> Result<CharGrid, SourceError> {
    if width == 0 {
        return Err(SourceError::InvalidWidth { width });
    }
    let font = catalog.load(font_name)?;

    let mut lines: Vec<String> = Vec::new();
    for part in message.split('\n') {
        let part = if part.trim().is_empty() { " " } else { part };
        let figure = font.convert(part).ok_or(SourceError::EmptyRender)?;
        for line in figure.to_string().lines() {
            lines.push(line.trim_end().to_string());
        }
    }
    // Trailing blank rows are figlet padding, not content.
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(SourceError::EmptyRender);
    }

    let block_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let pad = match align {
        "center" => usize::from(width).saturating_sub(block_w) / 2,
        "right" => usize::from(width).saturating_sub(block_w),
        _ => 0,
    };
    if pad > 0 {
        let prefix = " ".repeat(pad);
        for line in &mut lines {
            line.insert_str(0, &prefix);
        }
    }

    Ok(CharGrid::from_lines(&lines).clipped(width))
}
