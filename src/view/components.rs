//! Building blocks of the browser view.

pub mod err;

mod objects_list;

pub use objects_list::ObjectsList;

use tui::widgets::ListState;

/// Cursor behavior shared by list panes.
pub trait StatefulContainer {
    fn get_current(&self) -> ListState;
    fn clear_state(&mut self);
    fn next(&mut self);
    fn previous(&mut self);
}
