//! Permission model and resolution.
//!
//! - [`level`]: the ordered [`PermissionLevel`] scale
//! - [`authority`]: [`PermissionAuthority`], which maps chat users to levels

pub mod authority;
pub mod level;

pub use authority::PermissionAuthority;
pub use level::{PermissionLevel, compare};
