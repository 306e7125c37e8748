use std::fs::File;
use std::path::Path;

use bn_core::error::ExportError;
use bn_core::frame::FrameBuffer;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

/// Encode une séquence de frames RGBA en GIF animé, boucle infinie.
///
/// Le délai inter-frame est dérivé du fps de la session : la lecture GIF
/// reproduit la cadence de la lecture terminal.
///
/// # Errors
/// `ExportError::Gif` si l'encodeur refuse une frame, `Io` sinon.
pub fn encode_gif(frames: &[FrameBuffer], fps: u32, path: &Path) -> Result<(), ExportError> {
    if frames.is_empty() {
        return Err(ExportError::EmptySequence);
    }
    let file = File::create(path)?;
    let mut encoder = GifEncoder::new(file);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| ExportError::Gif(e.to_string()))?;

    let delay = Delay::from_numer_denom_ms(1000, fps.max(1));
    for fb in frames {
        let img = RgbaImage::from_raw(fb.width, fb.height, fb.data.clone())
            .ok_or_else(|| ExportError::Gif("dimensions de frame incohérentes".into()))?;
        encoder
            .encode_frame(Frame::from_parts(img, 0, 0, delay))
            .map_err(|e| ExportError::Gif(e.to_string()))?;
    }
    Ok(())
}
