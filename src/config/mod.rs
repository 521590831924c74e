//! Configuration module

mod error;
mod site;
mod store;

pub use error::ConfigError;
pub use site::{
    CardStyle, ContentOptions, Language, PaginationVariant, SearchOptions, SiteConfiguration,
    Theme, ViewMode, REQUIRED_FIELDS,
};
pub use store::{ConfigStore, CONFIG_FILE};
