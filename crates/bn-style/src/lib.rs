/// Compositeur de style : CharGrid + gradient + effets → StyledGrid.

pub mod compositor;

pub use compositor::{StyleSpec, compose};
