/// Sources de banner : texte FIGlet et images bitmap, toutes deux réduites
/// à une `CharGrid`. Les erreurs de source ne traversent jamais le
/// pipeline : l'appelant retombe sur la grille précédente.

pub mod image;
pub mod text;

pub use image::render_image;
pub use text::{FontCatalog, render_text};
