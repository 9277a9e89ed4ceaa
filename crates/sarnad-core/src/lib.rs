pub mod app_config;
pub mod config;
pub mod display;
pub mod error;
pub mod installers;
pub mod interaction;
pub mod presentation;
pub mod search;
pub mod session;

#[cfg(test)]
mod test_support;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use display::{cap, is_truncated, DISPLAY_CAP};
pub use error::{ConfigError, InteractionError};
pub use installers::{load_installers, Installer, RecordStore};
pub use interaction::{
    ClipboardWriter, Clock, CopyField, CopyKey, CopyScheduled, CopyTracker, ExternalOpener,
    SystemClock, Theme, TimerHandle, COPY_FEEDBACK,
};
pub use presentation::{map_query, map_url, mailto_link, search_placeholder, tel_link};
pub use search::{filter, SearchField, SearchState, DEFAULT_LOCALITY, DEFAULT_TERM};
pub use session::{Action, Session, UiState, View};
