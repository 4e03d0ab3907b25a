mod settings;

pub use settings::{Config, ConfigError, PlaybackConfig, EXAMPLE_CONFIG};
