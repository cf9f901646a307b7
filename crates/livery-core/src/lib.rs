//! Core logic for livery.
//!
//! Discovery of installed themes, the style/preset index, active-selection
//! resolution, and preview-asset lookup. Everything in this crate only reads
//! the filesystem; settings writes live in `livery-settings`.

pub mod catalog;
pub mod paths;
pub mod previews;
pub mod resolver;
pub mod styles;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod walk;

pub use catalog::{BUILTIN_SHELL_THEME, Catalog};
pub use paths::SearchRoots;
pub use previews::{IconSampleCache, Previews};
pub use resolver::{ActiveStyle, find_active};
pub use styles::{Style, StyleIndex, StyleMode, Variant};
pub use walk::FoundTheme;
