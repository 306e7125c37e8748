/// Scheduler de révélation : StyledGrid cible + config → séquence finie et
/// déterministe de frames, une par tick. Tous les flux aléatoires sont
/// dérivés explicitement de la graine — jamais de RNG ambiant.

pub mod config;
pub mod scheduler;

pub use config::{AnimMode, AnimationConfig};
pub use scheduler::{RevealScheduler, SessionState};
