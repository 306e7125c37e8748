/// Configuration, types, and shared structures for banscii.
///
/// This crate contains all shared types used across the banscii workspace:
/// character/styled grids, the gradient engine, named charsets, the
/// persisted user profile, and the domain error enums.

pub mod charset;
pub mod error;
pub mod frame;
pub mod gradient;
pub mod grid;
pub mod profile;
pub mod theme;

pub use charset::LuminanceLut;
pub use error::{ConfigError, ExportError, SourceError, SurfaceError};
pub use frame::FrameBuffer;
pub use gradient::{Direction, Gradient};
pub use grid::{CharGrid, Rgb, StyledCell, StyledGrid};
pub use profile::Profile;
