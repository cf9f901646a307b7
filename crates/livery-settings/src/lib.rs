//! Settings bridge for livery.
//!
//! Reads and writes the per-user settings store that holds the active theme
//! selection, and maintains the cursor inheritance link that points legacy
//! X11 applications at the configured cursor theme.

pub mod cursor_link;
pub mod desktop;
pub mod store;
