use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::charset::CHARSET_KEYS;
use crate::gradient::{DIRECTION_NAMES, GRADIENT_NAMES};

/// Modes d'animation, dans l'ordre de cycle du menu.
pub const MODE_NAMES: &[&str] = &["scramble", "typewriter", "glitch", "matrix"];

/// Alignements FIGlet valides.
pub const ALIGN_NAMES: &[&str] = &["left", "center", "right"];

/// Snapshot sérialisable de toute la configuration utilisateur.
///
/// Persisté en JSON comme une unité — jamais champ par champ. Chaque champ
/// porte `#[serde(default)]` : un champ manquant prend sa valeur par défaut
/// et un champ inconnu est ignoré, donc un profil d'une version antérieure
/// ou postérieure se charge toujours.
///
/// # Example
/// ```
/// use bn_core::profile::Profile;
/// let p = Profile::default();
/// assert_eq!(p.mode, "scramble");
/// assert_eq!(p.fps, 60);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    // === Contenu ===
    /// Message du banner (peut contenir des sauts de ligne).
    #[serde(default = "default_message")]
    pub message: String,
    /// Source image plutôt que texte FIGlet.
    #[serde(default)]
    pub use_image: bool,
    /// Chemin de l'image source.
    #[serde(default)]
    pub image_path: Option<String>,
    /// Largeur ASCII de l'image convertie.
    #[serde(default = "default_image_width")]
    pub image_width: u16,

    // === FIGlet ===
    /// Nom de la police FIGlet.
    #[serde(default = "default_font")]
    pub font: String,
    /// Largeur de rendu en colonnes.
    #[serde(default = "default_width")]
    pub width: u16,
    /// Alignement : left | center | right.
    #[serde(default = "default_align")]
    pub align: String,

    // === Animation ===
    /// Mode : scramble | typewriter | glitch | matrix.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Frames par seconde.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Durée en secondes. 0 ⇒ une seule frame, entièrement révélée.
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Charset des glyphes de substitution.
    #[serde(default = "default_charset_key")]
    pub charset_key: String,
    /// Preset de gradient.
    #[serde(default = "default_gradient")]
    pub gradient: String,
    /// Direction du gradient.
    #[serde(default = "default_gradient_dir")]
    pub gradient_dir: String,
    /// Graine RNG fixe — même graine ⇒ séquence bit-identique.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Durée du front de balayage scramble, en millisecondes.
    #[serde(default = "default_wave_ms")]
    pub wave_ms: f32,
    /// Caractères par seconde du mode typewriter.
    #[serde(default = "default_typewriter_cps")]
    pub typewriter_cps: u32,
    /// Fraction de cellules corrompues par frame en mode glitch [0,1].
    #[serde(default = "default_glitch_intensity")]
    pub glitch_intensity: f32,

    // === Effets ===
    /// Contour autour des glyphes.
    #[serde(default = "default_true")]
    pub outline: bool,
    /// Ombre portée décalée (+1,+1).
    #[serde(default = "default_true")]
    pub shadow: bool,

    // === Layout / accessibilité ===
    /// Recentrer automatiquement dans le terminal.
    #[serde(default = "default_true")]
    pub auto_center: bool,
    /// Couleurs terminal par défaut uniquement (ignore le gradient).
    #[serde(default)]
    pub monochrome: bool,

    // === Export ===
    /// Chemin d'export (.gif ou .mp4). `None` = export désactivé.
    #[serde(default)]
    pub export_path: Option<String>,
}

fn default_message() -> String {
    "BANSCII".to_string()
}
fn default_image_width() -> u16 {
    120
}
fn default_font() -> String {
    "standard".to_string()
}
fn default_width() -> u16 {
    120
}
fn default_align() -> String {
    "left".to_string()
}
fn default_mode() -> String {
    "scramble".to_string()
}
fn default_fps() -> u32 {
    60
}
fn default_duration() -> f32 {
    3.0
}
fn default_charset_key() -> String {
    "ascii".to_string()
}
fn default_gradient() -> String {
    "rainbow".to_string()
}
fn default_gradient_dir() -> String {
    "lr".to_string()
}
fn default_seed() -> u64 {
    1337
}
fn default_wave_ms() -> f32 {
    450.0
}
fn default_typewriter_cps() -> u32 {
    150
}
fn default_glitch_intensity() -> f32 {
    0.3
}
#[must_use]
pub fn default_true() -> bool {
    true
}

impl Default for Profile {
    fn default() -> Self {
        // serde(default) et Default partagent les mêmes fonctions.
        #[allow(clippy::unwrap_used)]
        serde_json::from_str("{}").unwrap()
    }
}

impl Profile {
    /// Clamp all numeric fields and snap invalid enums to their defaults.
    /// Called after deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(40, 300);
        self.image_width = self.image_width.clamp(40, 300);
        self.fps = self.fps.clamp(10, 240);
        self.duration = self.duration.clamp(0.0, 60.0);
        self.wave_ms = self.wave_ms.clamp(0.0, 2000.0);
        self.typewriter_cps = self.typewriter_cps.clamp(10, 1000);
        self.glitch_intensity = self.glitch_intensity.clamp(0.0, 1.0);
        if !ALIGN_NAMES.contains(&self.align.as_str()) {
            self.align = default_align();
        }
        if !MODE_NAMES.contains(&self.mode.as_str()) {
            self.mode = default_mode();
        }
        if !CHARSET_KEYS.contains(&self.charset_key.as_str()) {
            self.charset_key = default_charset_key();
        }
        if !GRADIENT_NAMES.contains(&self.gradient.as_str()) {
            self.gradient = default_gradient();
        }
        if !DIRECTION_NAMES.contains(&self.gradient_dir.as_str()) {
            self.gradient_dir = default_gradient_dir();
        }
    }

    /// Chemin well-known du profil : `~/.banscii.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .unwrap_or_else(|| ".".into());
        PathBuf::from(home).join(".banscii.json")
    }

    /// Charge le profil. Ne fait jamais échouer le démarrage : fichier
    /// absent, illisible ou corrompu ⇒ défauts + warning loggé.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        let mut profile = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("Profil corrompu ({}), défauts utilisés : {e}", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Profil illisible ({}), défauts utilisés : {e}", path.display());
                Self::default()
            }
        };
        profile.clamp_all();
        profile
    }

    /// Sauvegarde le profil comme une unité.
    ///
    /// # Errors
    /// Retourne une erreur si la sérialisation ou l'écriture échoue.
    pub fn save(&self, path: &Path) -> Result<(), crate::error::ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let p = Profile::default();
        assert_eq!(p.message, "BANSCII");
        assert_eq!(p.font, "standard");
        assert_eq!(p.gradient, "rainbow");
        assert_eq!(p.gradient_dir, "lr");
        assert_eq!(p.seed, 1337);
        assert!(p.outline && p.shadow && p.auto_center);
        assert!(!p.monochrome && !p.use_image);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"message":"HI","relativistic_jitter":42}"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.message, "HI");
        assert_eq!(p.fps, 60);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let p: Profile = serde_json::from_str(r#"{"fps":30}"#).unwrap();
        assert_eq!(p.fps, 30);
        assert_eq!(p.mode, "scramble");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, "{not json").unwrap();
        let p = Profile::load_or_default(&path);
        assert_eq!(p, Profile::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let p = Profile::load_or_default(Path::new("/nonexistent/banscii.json"));
        assert_eq!(p, Profile::default());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        let mut p = Profile::default();
        p.message = "ROUND TRIP".to_string();
        p.mode = "matrix".to_string();
        p.seed = 99;
        p.save(&path).unwrap();
        assert_eq!(Profile::load_or_default(&path), p);
    }

    #[test]
    fn clamp_snaps_invalid_enums() {
        let mut p = Profile::default();
        p.mode = "explode".to_string();
        p.gradient = "vantablack".to_string();
        p.fps = 100_000;
        p.glitch_intensity = 7.0;
        p.clamp_all();
        assert_eq!(p.mode, "scramble");
        assert_eq!(p.gradient, "rainbow");
        assert_eq!(p.fps, 240);
        assert!((p.glitch_intensity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_duration_survives_clamp() {
        let mut p = Profile::default();
        p.duration = 0.0;
        p.clamp_all();
        assert!(p.duration.abs() < f32::EPSILON);
    }
}
