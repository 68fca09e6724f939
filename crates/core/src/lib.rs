pub mod config;
pub mod library;
pub mod metrics;
pub mod search;
pub mod source;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, CacheConfig, Config, ConfigError,
    SanitizedConfig, ServerConfig, SourceConfig,
};
pub use library::{
    normalize_title, LibraryCache, LibraryStats, MediaItem, MediaKind, RefreshCoordinator,
    RefreshError, Snapshot, TitleIndex,
};
pub use search::{search, SearchMatch, SCORE_THRESHOLD};
pub use source::{HttpMediaSource, MediaSource, SourceError};
