//! Full-terminal screens.

mod browse;

pub use browse::BrowseScreen;
