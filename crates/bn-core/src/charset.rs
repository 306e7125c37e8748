/// ASCII imprimable complet (33..127) — charset de scramble par défaut.
pub const CHARSET_ASCII: &str = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// 10 caractères ordonnés clair → dense — mapping image et pluie matrix.
pub const CHARSET_BLOCKS: &str = " .:-=+*#%@";

/// Binaire — esthétique terminal rétro.
pub const CHARSET_BINARY: &str = "01";

/// Hexadécimal.
pub const CHARSET_HEX: &str = "0123456789ABCDEF";

/// Lettres seules.
pub const CHARSET_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Clés de charset, dans l'ordre de cycle du menu.
pub const CHARSET_KEYS: &[&str] = &["ascii", "blocks", "binary", "hex", "letters"];

/// Résout une clé de charset. Clé inconnue → `ascii` (fallback, pas d'erreur).
///
/// # Example
/// ```
/// use bn_core::charset::charset_for_key;
/// assert_eq!(charset_for_key("binary"), "01");
/// assert_eq!(charset_for_key("nope"), charset_for_key("ascii"));
/// ```
#[must_use]
pub fn charset_for_key(key: &str) -> &'static str {
    match key {
        "blocks" => CHARSET_BLOCKS,
        "binary" => CHARSET_BINARY,
        "hex" => CHARSET_HEX,
        "letters" => CHARSET_LETTERS,
        _ => CHARSET_ASCII,
    }
}

/// Lookup table mapping luminance [0..255] → character.
///
/// Pre-computed once per conversion for O(1) per-pixel cost.
///
/// # Example
/// ```
/// use bn_core::charset::LuminanceLut;
/// let lut = LuminanceLut::new(" .:#@");
/// assert_eq!(lut.map(0), ' ');
/// assert_eq!(lut.map(255), '@');
/// ```
pub struct LuminanceLut {
    lut: [char; 256],
}

impl LuminanceLut {
    /// Build a LUT from a charset ordered lightest→densest.
    ///
    /// Charsets shorter than 2 characters fall back to `" @"`.
    #[must_use]
    pub fn new(charset: &str) -> Self {
        let chars: Vec<char> = charset.chars().collect();
        if chars.len() < 2 {
            return Self::new(" @");
        }
        let len = chars.len();
        let mut lut = [' '; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = chars[i * (len - 1) / 255];
        }
        Self { lut }
    }

    /// Map a luminance value [0..255] to a character.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_charset_spans_printable_range() {
        let chars: Vec<char> = CHARSET_ASCII.chars().collect();
        assert_eq!(chars.len(), 94);
        assert_eq!(chars[0], '!');
        assert_eq!(chars[93], '~');
    }

    #[test]
    fn unknown_key_falls_back_to_ascii() {
        assert_eq!(charset_for_key("wat"), CHARSET_ASCII);
    }

    #[test]
    fn luminance_lut_monotonic() {
        let lut = LuminanceLut::new(CHARSET_BLOCKS);
        let chars: Vec<char> = CHARSET_BLOCKS.chars().collect();
        let mut prev_idx = 0usize;
        for i in 0..=255u8 {
            let ch = lut.map(i);
            let idx = chars.iter().position(|&c| c == ch).unwrap();
            assert!(idx >= prev_idx, "LUT non monotone à luminance {i}");
            prev_idx = idx;
        }
    }

    #[test]
    fn short_charset_falls_back() {
        let lut = LuminanceLut::new("x");
        assert_eq!(lut.map(0), ' ');
        assert_eq!(lut.map(255), '@');
    }
}
