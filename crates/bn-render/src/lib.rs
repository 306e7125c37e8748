/// Présentation terminal : rendu différentiel des frames d'animation et
/// écriture du menu dans un buffer ratatui.
pub mod canvas;
pub mod diff;
pub mod presenter;

pub use diff::{RowRun, apply_runs, diff_frames};
pub use presenter::{ColorDepth, TerminalPresenter};
