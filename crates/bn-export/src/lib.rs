/// Export d'une séquence de frames stylées en GIF animé ou MP4.
///
/// Pipeline : StyledGrid → rasterisation ab_glyph (police monospace
/// système) → FrameBuffer RGBA → encodeur GIF (image) ou MP4 (ffmpeg,
/// matériel puis logiciel).
pub mod gif;
pub mod muxer;
pub mod rasterizer;

use std::path::{Path, PathBuf};

use bn_core::error::ExportError;
use bn_core::frame::FrameBuffer;
use bn_core::grid::StyledGrid;

pub use muxer::{ENCODER_CANDIDATES, VideoOutcome};
pub use rasterizer::{Rasterizer, find_mono_font};

/// Taille de police de la rasterisation, en pixels.
const FONT_PX: f32 = 16.0;

/// Bilan d'un export réussi.
#[derive(Clone, Debug)]
pub struct ExportOutcome {
    /// Fichier écrit.
    pub path: PathBuf,
    /// Nombre de frames encodées.
    pub frames: usize,
    /// Encodeur vidéo utilisé (`None` pour un GIF).
    pub encoder: Option<&'static str>,
    /// `true` si l'encodeur matériel a cédé la place au logiciel.
    pub software_fallback: bool,
}

/// Exporte une séquence de frames vers `path`, format choisi par
/// l'extension (.gif ou .mp4).
///
/// Toutes les frames partagent les dimensions de la première : le
/// scheduler les produit toutes sur la même grille cible.
///
/// # Errors
/// `UnsupportedExtension`, `EmptySequence`, `NoFont`/`BadFont` si la
/// rasterisation est impossible, ou l'échec de l'encodeur choisi.
pub fn export_animation(
    frames: &[StyledGrid],
    fps: u32,
    path: &Path,
) -> Result<ExportOutcome, ExportError> {
    if frames.is_empty() {
        return Err(ExportError::EmptySequence);
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "gif" => {
            let buffers = rasterize_all(frames)?;
            gif::encode_gif(&buffers, fps, path)?;
            Ok(ExportOutcome {
                path: path.to_path_buf(),
                frames: frames.len(),
                encoder: None,
                software_fallback: false,
            })
        }
        "mp4" => {
            let buffers = rasterize_all(frames)?;
            let outcome = muxer::encode_mp4(&buffers, fps, path)?;
            Ok(ExportOutcome {
                path: path.to_path_buf(),
                frames: frames.len(),
                encoder: Some(outcome.encoder),
                software_fallback: outcome.software_fallback,
            })
        }
        other => Err(ExportError::UnsupportedExtension {
            extension: other.to_string(),
        }),
    }
}

fn rasterize_all(frames: &[StyledGrid]) -> Result<Vec<FrameBuffer>, ExportError> {
    let font = find_mono_font()?;
    let raster = Rasterizer::new(&font, FONT_PX)?;
    let (w, h) = raster.target_dimensions(frames[0].width, frames[0].height);
    let mut buffers = Vec::with_capacity(frames.len());
    for frame in frames {
        let mut fb = FrameBuffer::new(w, h);
        raster.render(frame, &mut fb);
        buffers.push(fb);
    }
    Ok(buffers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let frames = [StyledGrid::new(2, 2)];
        let err = export_animation(&frames, 30, Path::new("out.webm")).unwrap_err();
        assert!(matches!(
            err,
            ExportError::UnsupportedExtension { extension } if extension == "webm"
        ));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let frames = [StyledGrid::new(2, 2)];
        let err = export_animation(&frames, 30, Path::new("out")).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedExtension { .. }));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = export_animation(&[], 30, Path::new("out.gif")).unwrap_err();
        assert!(matches!(err, ExportError::EmptySequence));
    }

    #[test]
    fn gif_export_works_when_a_font_is_present() {
        if find_mono_font().is_err() {
            return; // machine sans police système, rien à vérifier ici
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banner.gif");
        let frames = [StyledGrid::new(4, 2), StyledGrid::new(4, 2)];
        let outcome = export_animation(&frames, 24, &path).unwrap();
        assert_eq!(outcome.frames, 2);
        assert!(outcome.encoder.is_none());
        assert!(path.exists());
    }
}
