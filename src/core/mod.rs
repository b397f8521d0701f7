pub mod config;
pub mod error;

pub use config::{CodecConfig, Configuration};
pub use error::{CodecError, CodecResult, InitProcessError};
