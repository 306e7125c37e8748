use std::path::Path;

use bn_core::charset::{CHARSET_BLOCKS, LuminanceLut};
use bn_core::error::SourceError;
use bn_core::grid::CharGrid;
use image::imageops::FilterType;

/// Facteur de compensation verticale : une cellule terminal est environ
/// deux fois plus haute que large, l'image est donc écrasée en hauteur.
const CELL_ASPECT: f32 = 0.45;

/// Convertit une image bitmap en `CharGrid` par luminance.
///
/// L'image est passée en niveaux de gris, redimensionnée à `width`
/// colonnes (hauteur compensée par [`CELL_ASPECT`]), puis chaque pixel est
/// mappé sur le charset `blocks` clair → dense.
///
/// La grille produite fait au moins 10×5 cellules : une `width` de 1 à 9
/// est élargie à 10 colonnes. La hauteur est bornée à `u16::MAX` lignes,
/// les images extrêmement hautes sont donc écrasées plutôt que rejetées.
///
/// # Errors
/// `SourceError::InvalidWidth` si `width` est nul,
/// `SourceError::ImageUnreadable` si le fichier est absent ou corrompu.
pub fn render_image(path: &Path, width: u16) -> Result<CharGrid, SourceError> {
    if width == 0 {
        return Err(SourceError::InvalidWidth { width });
    }

    let img = image::open(path).map_err(|e| SourceError::ImageUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let luma = img.to_luma8();
    let (src_w, src_h) = (luma.width(), luma.height());
    if src_w == 0 || src_h == 0 {
        return Err(SourceError::ImageUnreadable {
            path: path.display().to_string(),
            reason: "image vide".to_string(),
        });
    }

    let new_w = u32::from(width.max(10));
    let new_h = ((src_h as f32 * (new_w as f32 / src_w as f32) * CELL_ASPECT) as u32)
        .clamp(5, u32::from(u16::MAX));
    let resized = image::imageops::resize(&luma, new_w, new_h, FilterType::Triangle);

    let lut = LuminanceLut::new(CHARSET_BLOCKS);
    let mut grid = CharGrid::new(new_w as u16, new_h as u16);
    for (x, y, pixel) in resized.enumerate_pixels() {
        grid.set(x as u16, y as u16, lut.map(pixel.0[0]));
    }
    Ok(grid)
}
