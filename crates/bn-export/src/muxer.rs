use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use bn_core::error::ExportError;
use bn_core::frame::FrameBuffer;

/// Encodeurs H.264 candidats, du matériel vers le logiciel.
/// Le premier qui aboutit gagne ; tous les échecs sont conservés.
pub const ENCODER_CANDIDATES: &[&str] = &["h264_nvenc", "libx264"];

/// Résultat d'un encodage MP4 réussi.
#[derive(Clone, Debug)]
pub struct VideoOutcome {
    /// Encodeur effectivement utilisé.
    pub encoder: &'static str,
    /// `true` si l'encodeur matériel a échoué et que le logiciel a repris.
    pub software_fallback: bool,
}

/// Encode les frames en MP4 via ffmpeg, en essayant chaque candidat de
/// `ENCODER_CANDIDATES` dans l'ordre.
///
/// Les frames sont déjà matérialisées : un échec du premier encodeur ne
/// coûte qu'une nouvelle passe d'écriture, pas un re-rendu.
///
/// # Errors
/// `ExportError::AllEncodersFailed` avec un diagnostic par candidat si
/// aucun n'aboutit.
pub fn encode_mp4(
    frames: &[FrameBuffer],
    fps: u32,
    path: &Path,
) -> Result<VideoOutcome, ExportError> {
    if frames.is_empty() {
        return Err(ExportError::EmptySequence);
    }
    let mut failures = Vec::new();
    for (rank, encoder) in ENCODER_CANDIDATES.iter().enumerate() {
        match run_encoder(encoder, frames, fps, path) {
            Ok(()) => {
                let software_fallback = rank > 0;
                if software_fallback {
                    log::warn!("encodeur matériel indisponible, export via {encoder}");
                }
                return Ok(VideoOutcome {
                    encoder,
                    software_fallback,
                });
            }
            Err(e) => {
                log::warn!("encodeur {encoder} a échoué: {e:#}");
                failures.push(format!("{encoder}: {e:#}"));
            }
        }
    }
    Err(ExportError::AllEncodersFailed { failures })
}

/// Une passe d'encodage : frames RGBA brutes poussées dans le stdin de
/// ffmpeg. Le pad force des dimensions paires, exigées par yuv420p.
fn run_encoder(encoder: &str, frames: &[FrameBuffer], fps: u32, path: &Path) -> Result<()> {
    let path_str = path.to_str().context("chemin de sortie invalide")?;
    let (width, height) = (frames[0].width, frames[0].height);

    let mut child = Command::new("ffmpeg")
        .args([
            "-y",
            "-f",
            "rawvideo",
            "-vcodec",
            "rawvideo",
            "-s",
            &format!("{width}x{height}"),
            "-pix_fmt",
            "rgba",
            "-r",
            &fps.max(1).to_string(),
            "-i",
            "-",
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-c:v",
            encoder,
            "-pix_fmt",
            "yuv420p",
            "-hide_banner",
            "-loglevel",
            "error",
            path_str,
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .context("ffmpeg introuvable (est-il dans PATH ?)")?;

    if let Some(stdin) = child.stdin.as_mut() {
        for fb in frames {
            // Pipe cassé = encodeur mort ; le diagnostic utile est dans
            // stderr, récupéré après wait.
            if stdin.write_all(&fb.data).is_err() {
                break;
            }
        }
    }
    drop(child.stdin.take());

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("ffmpeg: {}", stderr.trim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_rejected_before_spawning() {
        let err = encode_mp4(&[], 30, Path::new("never.mp4")).unwrap_err();
        assert!(matches!(err, ExportError::EmptySequence));
    }

    #[test]
    fn encode_mp4_never_panics() {
        // Selon la machine : succès (ffmpeg présent), fallback logiciel,
        // ou AllEncodersFailed. Tous valides — l'important est zéro panique
        // et un diagnostic par candidat en cas d'échec total.
        let dir = tempfile::tempdir().unwrap();
        let frame = FrameBuffer::new(8, 8);
        match encode_mp4(&[frame], 30, &dir.path().join("out.mp4")) {
            Ok(outcome) => assert!(ENCODER_CANDIDATES.contains(&outcome.encoder)),
            Err(ExportError::AllEncodersFailed { failures }) => {
                assert_eq!(failures.len(), ENCODER_CANDIDATES.len());
            }
            Err(other) => panic!("erreur inattendue: {other}"),
        }
    }
}
