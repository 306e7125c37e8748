use thiserror::Error;

/// Échec d'une source texte ou image. Toujours récupérable : l'appelant
/// conserve la grille précédente et affiche un avertissement.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Police FIGlet absente du catalogue ou fichier .flf invalide.
    #[error("police introuvable : {name} ({reason})")]
    FontNotFound {
        /// Requested font name.
        name: String,
        /// Loader diagnostic.
        reason: String,
    },

    /// Image illisible ou corrompue.
    #[error("image illisible : {path} ({reason})")]
    ImageUnreadable {
        /// Path that failed to decode.
        path: String,
        /// Decoder diagnostic.
        reason: String,
    },

    /// Largeur de rendu nulle.
    #[error("largeur invalide : {width}")]
    InvalidWidth {
        /// Requested width.
        width: u16,
    },

    /// Le moteur FIGlet n'a rien produit pour ce message.
    #[error("rendu FIGlet vide pour le message")]
    EmptyRender,
}

/// Échec de lecture/écriture du profil. La lecture ne remonte jamais
/// jusqu'au démarrage : profil corrompu ⇒ défauts + warning.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O sur le fichier de profil.
    #[error("profil inaccessible : {0}")]
    Io(#[from] std::io::Error),

    /// JSON invalide.
    #[error("profil corrompu : {0}")]
    Parse(#[from] serde_json::Error),
}

/// Échec d'exportation. Fatal à l'opération d'export uniquement, jamais à
/// la session.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Extension de fichier non gérée (ni .gif ni .mp4).
    #[error("extension non supportée : {extension} (attendu .gif ou .mp4)")]
    UnsupportedExtension {
        /// Extension that was requested.
        extension: String,
    },

    /// Aucune police monospace système trouvée pour la rasterisation.
    #[error("aucune police monospace trouvée pour la rasterisation")]
    NoFont,

    /// Police trouvée mais invalide pour ab_glyph.
    #[error("police monospace invalide : {0}")]
    BadFont(String),

    /// Séquence de frames vide.
    #[error("aucune frame à exporter")]
    EmptySequence,

    /// Tous les encodeurs candidats ont échoué. Chaque échec est conservé.
    #[error("tous les encodeurs ont échoué : {}", failures.join(" | "))]
    AllEncodersFailed {
        /// One diagnostic per attempted encoder, in attempt order.
        failures: Vec<String>,
    },

    /// I/O sur le fichier de sortie.
    #[error("écriture de l'export impossible : {0}")]
    Io(#[from] std::io::Error),

    /// L'encodeur GIF a refusé une frame.
    #[error("encodage GIF échoué : {0}")]
    Gif(String),
}

/// La surface de sortie ne supporte pas le mode couleur demandé.
/// Dégrade la profondeur de couleur, ne fait jamais échouer une frame.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Truecolor indisponible, repli sur 256 couleurs ou monochrome.
    #[error("truecolor indisponible, repli sur {fallback}")]
    ColorDepthDegraded {
        /// Name of the depth actually used.
        fallback: &'static str,
    },

    /// I/O vers le terminal.
    #[error("écriture terminal échouée : {0}")]
    Io(#[from] std::io::Error),
}
