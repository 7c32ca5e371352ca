//! Descriptor for a scheduled local notification and its `<options ... />`
//! record codec, used to hand notification requests between a host
//! application and the scheduling side.

pub mod codec;  // Codec, parse, serialize
pub mod config; // CodecConfig (env-driven)
pub mod error;  // OptionsError, ConfigError
pub mod models; // Options, Button, OptionsBuilder

pub use codec::{parse, serialize, Codec};
pub use config::CodecConfig;
pub use error::{ConfigError, OptionsError};
pub use models::{Button, ButtonKind, Options, OptionsBuilder};
