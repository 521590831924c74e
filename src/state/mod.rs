//! UI state reconciliation
//!
//! Page state is held in explicit structs and changed only through their
//! update methods, so the rules tying fields together live in one place.

mod admin;
mod listing;
mod modal;

pub use admin::{
    AdminSession, Edit, SaveStatus, Section, SliderRange, BORDER_RADIUS_RANGE,
    BORDER_WIDTH_RANGE, SHADOW_RANGE,
};
pub use listing::ListingState;
pub use modal::ModalState;
