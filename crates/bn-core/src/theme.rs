use crate::profile::Profile;

/// Noms de thèmes, dans l'ordre de cycle de la hotkey.
pub const THEME_NAMES: &[&str] = &["phosphor", "neon_grid", "sunset", "mono_bold"];

/// Applique un thème nommé : un bundle fixe de champs de style, appliqué
/// atomiquement. Nom inconnu ⇒ profil inchangé, `false` retourné.
///
/// # Example
/// ```
/// use bn_core::profile::Profile;
/// use bn_core::theme::apply_theme;
/// let mut p = Profile::default();
/// assert!(apply_theme(&mut p, "sunset"));
/// assert_eq!(p.gradient, "fire");
/// assert!(!apply_theme(&mut p, "vaporwave"));
/// ```
pub fn apply_theme(profile: &mut Profile, name: &str) -> bool {
    let (gradient, dir, outline, shadow, monochrome) = match name {
        "phosphor" => ("retro_green", "lr", true, false, false),
        "neon_grid" => ("neon", "d1", true, true, false),
        "sunset" => ("fire", "tb", false, true, false),
        "mono_bold" => ("none", "lr", true, true, true),
        _ => return false,
    };
    profile.gradient = gradient.to_string();
    profile.gradient_dir = dir.to_string();
    profile.outline = outline;
    profile.shadow = shadow;
    profile.monochrome = monochrome;
    true
}
