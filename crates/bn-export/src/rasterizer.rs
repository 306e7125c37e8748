use std::collections::HashMap;
use std::path::Path;

use ab_glyph::{Font, FontRef, PxScale, point};
use bn_core::error::ExportError;
use bn_core::frame::FrameBuffer;
use bn_core::grid::StyledGrid;
use rayon::prelude::*;

/// Avant-plan des cellules sans couleur (monochrome).
const DEFAULT_FG: (u8, u8, u8) = (229, 229, 229);

/// Polices monospace système, par ordre de préférence.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// Lit la première police monospace système disponible.
///
/// # Errors
/// `ExportError::NoFont` si aucun candidat n'existe sur cette machine.
pub fn find_mono_font() -> Result<Vec<u8>, ExportError> {
    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            log::debug!("police d'export: {candidate}");
            return Ok(std::fs::read(path)?);
        }
    }
    Err(ExportError::NoFont)
}

/// Convertit une `StyledGrid` en pixels RGBA haute résolution.
/// Maintien d'un cache atlas pour éliminer tout surcoût de rasterisation
/// dans le hot-loop.
pub struct Rasterizer {
    char_width: u32,
    char_height: u32,
    /// Maps a char to its 1D alpha buffer (size = char_width * char_height)
    glyph_cache: HashMap<char, Vec<u8>>,
    /// Pre-allocated fallback glyph (all zeros). Avoids per-frame allocation.
    empty_glyph: Vec<u8>,
}

impl Rasterizer {
    /// Initialise le rasterizer en pré-calculant tous les glyphes que les
    /// charsets et décorations peuvent produire (ASCII, Latin-1 pour `·`,
    /// blocs d'ombrage pour `▒`).
    ///
    /// # Errors
    /// `ExportError::BadFont` si la police fournie est invalide.
    pub fn new(font_data: &[u8], scale_px: f32) -> Result<Self, ExportError> {
        let font =
            FontRef::try_from_slice(font_data).map_err(|e| ExportError::BadFont(e.to_string()))?;
        let scale = PxScale::from(scale_px);

        let v_advance = font.ascent_unscaled() - font.descent_unscaled() + font.line_gap_unscaled();
        let height = (v_advance * scale.y / font.height_unscaled()).ceil() as u32;

        let m_glyph = font.glyph_id('M');
        let h_advance = font.h_advance_unscaled(m_glyph);
        let width = (h_advance * scale.x / font.height_unscaled()).ceil() as u32;

        let char_width = width.max(1);
        let char_height = height.max(1);

        let mut rasterizer = Self {
            char_width,
            char_height,
            glyph_cache: HashMap::new(),
            empty_glyph: vec![0u8; (char_width * char_height) as usize],
        };

        rasterizer.cache_charset(&font, scale, 32..=126);
        // Latin-1 Supplement (· du contour)
        rasterizer.cache_charset(&font, scale, 0x00A0..=0x00FF);
        // Blocs d'ombrage et demi-blocs (▒ de l'ombre portée)
        rasterizer.cache_charset(&font, scale, 0x2580..=0x259F);

        Ok(rasterizer)
    }

    fn cache_charset(
        &mut self,
        font: &FontRef,
        scale: PxScale,
        range: std::ops::RangeInclusive<u32>,
    ) {
        for codepoint in range {
            if let Some(ch) = std::char::from_u32(codepoint) {
                // Skip characters not actually in the font (glyph_id 0 = .notdef)
                // to avoid rendering placeholder "?" boxes in exported video.
                let gid = font.glyph_id(ch);
                if gid.0 == 0 && ch != '\0' {
                    continue;
                }

                let mut buffer = vec![0u8; (self.char_width * self.char_height) as usize];

                let ascent_px = font.ascent_unscaled() * scale.y / font.height_unscaled();
                let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

                if let Some(outline) = font.outline_glyph(glyph) {
                    let bounds = outline.px_bounds();
                    #[allow(clippy::cast_possible_wrap)]
                    outline.draw(|x, y, v| {
                        let px = (x as i32 + bounds.min.x as i32).max(0) as u32;
                        let py = (y as i32 + bounds.min.y as i32).max(0) as u32;
                        if px < self.char_width && py < self.char_height {
                            let idx = (py * self.char_width + px) as usize;
                            if idx < buffer.len() {
                                buffer[idx] = (v * 255.0).round() as u8;
                            }
                        }
                    });
                }
                self.glyph_cache.insert(ch, buffer);
            }
        }
    }

    /// Rendu de la `StyledGrid` sur le FrameBuffer.
    /// Zéro allocation dans le hot-loop. Parallélisé par bandes de lignes.
    pub fn render(&self, grid: &StyledGrid, fb: &mut FrameBuffer) {
        let expected_w = u32::from(grid.width) * self.char_width;
        let expected_h = u32::from(grid.height) * self.char_height;

        if fb.width != expected_w || fb.height != expected_h {
            log::error!(
                "Rasterizer dimension mismatch: fb={}x{} expected={}x{}",
                fb.width,
                fb.height,
                expected_w,
                expected_h
            );
            return;
        }

        let empty_glyph = &self.empty_glyph;
        let stride = (expected_w * 4) as usize;
        let band_size = stride * self.char_height as usize;

        fb.data
            .par_chunks_exact_mut(band_size)
            .enumerate()
            .for_each(|(gy, band)| {
                for gx in 0..(grid.width as usize) {
                    let cell = grid.get(gx as u16, gy as u16);
                    let char_alpha = self.glyph_cache.get(&cell.ch).unwrap_or(empty_glyph);

                    let mut fg = cell.fg.unwrap_or(DEFAULT_FG);
                    if cell.dim {
                        fg = (
                            (f32::from(fg.0) * 0.6) as u8,
                            (f32::from(fg.1) * 0.6) as u8,
                            (f32::from(fg.2) * 0.6) as u8,
                        );
                    }
                    let bg = cell.bg.unwrap_or((0, 0, 0));

                    let cx_start = gx * self.char_width as usize;

                    for cy in 0..(self.char_height as usize) {
                        let fb_y_offset = cy * stride;
                        for cx in 0..(self.char_width as usize) {
                            let local_idx = cy * self.char_width as usize + cx;
                            let alpha_f = f32::from(char_alpha[local_idx]) / 255.0;

                            let r =
                                (f32::from(fg.0) * alpha_f + f32::from(bg.0) * (1.0 - alpha_f)) as u8;
                            let g =
                                (f32::from(fg.1) * alpha_f + f32::from(bg.1) * (1.0 - alpha_f)) as u8;
                            let b =
                                (f32::from(fg.2) * alpha_f + f32::from(bg.2) * (1.0 - alpha_f)) as u8;

                            let px_idx = fb_y_offset + (cx_start + cx) * 4;
                            band[px_idx] = r;
                            band[px_idx + 1] = g;
                            band[px_idx + 2] = b;
                            band[px_idx + 3] = 255;
                        }
                    }
                }
            });
    }

    /// Calcule les dimensions du FrameBuffer pour une taille de grille.
    #[must_use]
    pub fn target_dimensions(&self, grid_w: u16, grid_h: u16) -> (u32, u32) {
        (
            u32::from(grid_w) * self.char_width,
            u32::from(grid_h) * self.char_height,
        )
    }
}
