use bn_core::charset::charset_for_key;
use bn_core::profile::Profile;

/// Mode de révélation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimMode {
    /// Front de balayage avec substitution de glyphes aléatoires.
    #[default]
    Scramble,
    /// Révélation en ordre raster à vitesse fixe.
    Typewriter,
    /// Corruption transitoire permanente après révélation complète.
    Glitch,
    /// Colonnes de pluie indépendantes avec traînée et verrouillage.
    Matrix,
}

impl AnimMode {
    /// Résout un nom de mode. Nom inconnu → `Scramble`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "typewriter" => Self::Typewriter,
            "glitch" => Self::Glitch,
            "matrix" => Self::Matrix,
            _ => Self::Scramble,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Scramble => "scramble",
            Self::Typewriter => "typewriter",
            Self::Glitch => "glitch",
            Self::Matrix => "matrix",
        }
    }
}

/// Paramètres d'une session d'animation.
///
/// Invariants : `fps` > 0, `duration_s` ≥ 0, `charset` non vide.
/// La graine est fixe : rejouer avec la même graine reproduit une séquence
/// bit-identique.
#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Mode de révélation.
    pub mode: AnimMode,
    /// Ticks par seconde.
    pub fps: u32,
    /// Durée totale en secondes. 0 ⇒ une seule frame terminale.
    pub duration_s: f32,
    /// Graine de tous les flux RNG de la session.
    pub seed: u64,
    /// Durée du front de balayage scramble (ms).
    pub wave_ms: f32,
    /// Caractères par seconde du mode typewriter.
    pub typewriter_cps: u32,
    /// Fraction de cellules corrompues par tick en mode glitch [0,1].
    pub glitch_intensity: f32,
    /// Glyphes de substitution.
    pub charset: Vec<char>,
}

impl AnimationConfig {
    /// Construit la config d'animation depuis un profil (déjà clampé).
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            mode: AnimMode::from_name(&profile.mode),
            fps: profile.fps.max(1),
            duration_s: profile.duration.max(0.0),
            seed: profile.seed,
            wave_ms: profile.wave_ms,
            typewriter_cps: profile.typewriter_cps.max(1),
            glitch_intensity: profile.glitch_intensity.clamp(0.0, 1.0),
            charset: charset_for_key(&profile.charset_key).chars().collect(),
        }
    }

    /// Nombre total de ticks : ceil(duration·fps), minimum 1.
    ///
    /// duration·fps nul ⇒ exactement une frame terminale, entièrement
    /// révélée.
    #[must_use]
    pub fn total_ticks(&self) -> u32 {
        ((self.duration_s * self.fps as f32).ceil() as u32).max(1)
    }

    /// `true` si la séquence se réduit à l'unique frame terminale.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        (self.duration_s * self.fps as f32).ceil() as u32 == 0
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::from_profile(&Profile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_roundtrip() {
        for name in ["scramble", "typewriter", "glitch", "matrix"] {
            assert_eq!(AnimMode::from_name(name).name(), name);
        }
        assert_eq!(AnimMode::from_name("wat"), AnimMode::Scramble);
    }

    #[test]
    fn zero_duration_yields_one_degenerate_tick() {
        let mut config = AnimationConfig::default();
        config.duration_s = 0.0;
        assert_eq!(config.total_ticks(), 1);
        assert!(config.is_degenerate());
    }

    #[test]
    fn total_ticks_rounds_up() {
        let mut config = AnimationConfig::default();
        config.fps = 30;
        config.duration_s = 1.01;
        assert_eq!(config.total_ticks(), 31);
        assert!(!config.is_degenerate());
    }
}
