pub mod config;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod format;
pub mod registry;
pub mod render;
pub mod util;
pub mod widget;

pub use config::WidgetConfig;
pub use error::WidgetError;
pub use registry::{FixtureRegistry, RemoteRegistry, ResultPage, SearchBackend, SearchResult};
pub use widget::SearchWidget;
