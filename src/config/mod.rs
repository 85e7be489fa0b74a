pub mod error;
pub mod load;
pub mod paths;
pub mod registry;
pub mod settings;

pub use error::ConfigError;
pub use load::load_router_settings;
pub use paths::{
    default_router_settings_path, default_state_root, GLOBAL_STATE_DIR, ROUTER_CONFIG_ENV,
    ROUTER_SETTINGS_FILE_NAME,
};
pub use registry::{registry_paths, PageEntry, SidebarEntry};
pub use settings::{LabelRule, PayloadRoutes, RouterSettings};
