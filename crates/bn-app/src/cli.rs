use std::path::PathBuf;

use clap::Parser;

/// banscii — Animateur de bannières ASCII dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Message à animer (prioritaire sur le profil).
    #[arg(long)]
    pub message: Option<String>,

    /// Source image (PNG, JPEG, BMP, GIF) au lieu du texte FIGlet.
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Fichier de profil JSON. Défaut : ~/.banscii.json.
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Répertoire de polices FIGlet (.flf) supplémentaires.
    #[arg(long, default_value = "fonts")]
    pub fonts: PathBuf,

    /// Export direct sans session interactive (.gif ou .mp4).
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
