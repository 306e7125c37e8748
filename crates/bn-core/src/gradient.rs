use crate::grid::Rgb;

/// Noms des presets de gradient, dans l'ordre de cycle des hotkeys.
pub const GRADIENT_NAMES: &[&str] = &[
    "rainbow",
    "ocean",
    "fire",
    "retro_green",
    "retro_amber",
    "neon",
    "none",
];

/// Noms des directions de gradient, dans l'ordre de cycle des hotkeys.
pub const DIRECTION_NAMES: &[&str] = &["lr", "rl", "tb", "bt", "d1", "d2", "d3", "d4"];

/// Preset de gradient : une rampe de couleur fixe, pure fonction de t ∈ [0,1].
///
/// # Example
/// ```
/// use bn_core::gradient::Gradient;
/// let g = Gradient::from_name("fire");
/// assert_eq!(g.name(), "fire");
/// // Nom inconnu → rampe par défaut, jamais de panique.
/// assert_eq!(Gradient::from_name("???"), Gradient::Rainbow);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gradient {
    /// Balayage HSV complet.
    #[default]
    Rainbow,
    /// Teintes bleues (h 0.55 → 0.65).
    Ocean,
    /// Teintes rouge-orange (h 0.02 → 0.12).
    Fire,
    /// Phosphore vert, rampe linéaire.
    RetroGreen,
    /// Phosphore ambre, rampe linéaire.
    RetroAmber,
    /// Teintes violettes-roses (h 0.75 → 0.95).
    Neon,
    /// Blanc uni (pas de rampe).
    Plain,
}

impl Gradient {
    /// Résout un nom de preset. Nom inconnu → `Rainbow` (fallback, pas d'erreur).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ocean" => Self::Ocean,
            "fire" => Self::Fire,
            "retro_green" => Self::RetroGreen,
            "retro_amber" => Self::RetroAmber,
            "neon" => Self::Neon,
            "none" => Self::Plain,
            _ => Self::Rainbow,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rainbow => "rainbow",
            Self::Ocean => "ocean",
            Self::Fire => "fire",
            Self::RetroGreen => "retro_green",
            Self::RetroAmber => "retro_amber",
            Self::Neon => "neon",
            Self::Plain => "none",
        }
    }

    /// Couleur de la rampe à la position `t` ∈ [0,1] (clampée).
    ///
    /// # Example
    /// ```
    /// use bn_core::gradient::Gradient;
    /// let (r, g, b) = Gradient::Rainbow.color_at(0.0);
    /// assert_eq!((r, g, b), (255, 0, 0));
    /// ```
    #[must_use]
    pub fn color_at(self, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Rainbow => hsv_to_rgb(t, 1.0, 1.0),
            Self::Ocean => hsv_to_rgb(lerp(0.55, 0.65, t), 0.75, 1.0),
            Self::Fire => hsv_to_rgb(lerp(0.02, 0.12, t), 1.0, 1.0),
            Self::RetroGreen => (
                (40.0 + 30.0 * t) as u8,
                (220.0 - 20.0 * (1.0 - t)) as u8,
                (40.0 + 10.0 * t) as u8,
            ),
            Self::RetroAmber => (
                (255.0 * lerp(0.7, 1.0, t)) as u8,
                (180.0 * lerp(0.4, 0.8, t)) as u8,
                0,
            ),
            Self::Neon => hsv_to_rgb(lerp(0.75, 0.95, t), 1.0, 1.0),
            Self::Plain => (255, 255, 255),
        }
    }
}

/// Direction de projection du gradient sur la grille.
///
/// 8 axes : 4 orthogonaux + 4 diagonales (projections normalisées).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Gauche → droite.
    #[default]
    Lr,
    /// Droite → gauche.
    Rl,
    /// Haut → bas.
    Tb,
    /// Bas → haut.
    Bt,
    /// Diagonale ↘ depuis le coin haut-gauche.
    D1,
    /// Diagonale ↗ depuis le coin bas-gauche.
    D2,
    /// Inverse de D1.
    D3,
    /// Inverse de D2.
    D4,
}

impl Direction {
    /// Résout un nom de direction. Nom inconnu → `Lr`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "rl" => Self::Rl,
            "tb" => Self::Tb,
            "bt" => Self::Bt,
            "d1" => Self::D1,
            "d2" => Self::D2,
            "d3" => Self::D3,
            "d4" => Self::D4,
            _ => Self::Lr,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lr => "lr",
            Self::Rl => "rl",
            Self::Tb => "tb",
            Self::Bt => "bt",
            Self::D1 => "d1",
            Self::D2 => "d2",
            Self::D3 => "d3",
            Self::D4 => "d4",
        }
    }

    /// Position 1-D ∈ [0,1] de la cellule (x, y) le long de l'axe choisi.
    ///
    /// Les diagonales projettent (x, y) sur le vecteur diagonal, normalisé
    /// par la somme des extensions. Grilles dégénérées (w ou h ≤ 1)
    /// évaluées comme largeur/hauteur 2 pour éviter la division par zéro.
    #[must_use]
    pub fn position(self, x: u16, y: u16, width: u16, height: u16) -> f32 {
        let w = f32::from(width.max(2)) - 1.0;
        let h = f32::from(height.max(2)) - 1.0;
        let x = f32::from(x);
        let y = f32::from(y);
        match self {
            Self::Lr => x / w,
            Self::Rl => 1.0 - x / w,
            Self::Tb => y / h,
            Self::Bt => 1.0 - y / h,
            Self::D1 => (x + y) / (w + h),
            Self::D2 => (x + (h - y)) / (w + h),
            Self::D3 => 1.0 - (x + y) / (w + h),
            Self::D4 => 1.0 - (x + (h - y)) / (w + h),
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convertit RGB [0,255] → HSV. H ∈ [0.0, 1.0), S ∈ [0.0, 1.0], V ∈ [0.0, 1.0].
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };
    let h = if delta == 0.0 {
        0.0
    } else if (max - r).abs() < f32::EPSILON {
        (((g - b) / delta) % 6.0) / 6.0
    } else if (max - g).abs() < f32::EPSILON {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let h = if h < 0.0 { h + 1.0 } else { h };

    (h, s, v)
}

/// Convertit HSV → RGB [0,255]. H ∈ [0.0, 1.0), S ∈ [0.0, 1.0], V ∈ [0.0, 1.0].
///
/// # Example
/// ```
/// use bn_core::gradient::hsv_to_rgb;
/// assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
/// ```
#[must_use]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = h * 6.0;
    let i = h.floor() as u32;
    let f = h - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}
