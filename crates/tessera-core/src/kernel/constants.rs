/// Application name
pub const APP_NAME: &str = "Tessera";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request discriminator for requests carrying an event
pub const EVENT_REQUEST_TYPE: &str = "event";

/// Payload key holding the event type name
pub const TYPE_FIELD: &str = "type";

/// Payload key holding the target component id
pub const TARGET_FIELD: &str = "target";

/// Alias prefix stripped from event type names (`onLoad` -> `load`)
pub const ON_PREFIX: &str = "on";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "tessera.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "TESSERA_CONFIG";

/// Default log filter
pub const DEFAULT_LOG_LEVEL: &str = "info";
