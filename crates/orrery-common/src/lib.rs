pub mod errors;
pub mod layers;
pub mod types;

pub use errors::{ConfigError, OrreryError};
pub use layers::LayerMask;
pub use types::{BodyId, Color, RenderableId};

pub type Result<T> = std::result::Result<T, OrreryError>;
