//! Helper functions for rendering pages
//!
//! These functions provide common functionality like URL generation,
//! HTML escaping, date formatting and post list markup.

mod date;
mod html;
mod list;
mod url;

pub use date::*;
pub use html::*;
pub use list::*;
pub use url::*;
