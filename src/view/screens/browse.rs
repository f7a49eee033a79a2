use crossterm::{
    event::{DisableMouseCapture, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use std::{error::Error, io::Stdout};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::{List, ListItem},
    Terminal,
};

use crate::view::components::{err::ComponentError, ObjectsList, StatefulContainer};

/// Single-pane browsing screen with an error overlay.
///
/// While the error stack is non-empty, the pane is replaced by the list of
/// errors until the user acknowledges them with ENTER.
pub struct BrowseScreen {
    term: Terminal<CrosstermBackend<Stdout>>,
    pane: ObjectsList,
    err_stack: Vec<ComponentError>,
}

impl BrowseScreen {
    pub async fn new(
        term: Terminal<CrosstermBackend<Stdout>>,
        mut pane: ObjectsList,
    ) -> BrowseScreen {
        let mut err_stack: Vec<ComponentError> = Vec::new();
        pane.refresh().await.unwrap_or_else(|e| err_stack.push(e));
        BrowseScreen {
            term,
            pane,
            err_stack,
        }
    }

    pub async fn handle_event(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Enter => {
                if self.err_stack.is_empty() {
                    self.pane.move_into_selected_dir();
                    self.refresh_pane().await;
                } else {
                    self.err_stack.clear();
                }
            }
            KeyCode::Backspace => {
                self.pane.move_out_of_selected_dir();
                self.refresh_pane().await;
            }
            KeyCode::Down | KeyCode::Char('j') => self.pane.next(),
            KeyCode::Up | KeyCode::Char('k') => self.pane.previous(),
            KeyCode::Char('r') => self.refresh_pane().await,
            _ => (),
        }
    }

    async fn refresh_pane(&mut self) {
        self.pane
            .refresh()
            .await
            .unwrap_or_else(|e| self.err_stack.push(e));
    }

    fn get_err_list(errs: &[ComponentError]) -> Vec<ListItem<'static>> {
        errs.iter()
            .map(|e| {
                ListItem::new(format!(
                    "{} Err: {} - {}",
                    e.component(),
                    e.code(),
                    e.message()
                ))
            })
            .collect()
    }

    pub fn render(&mut self) -> Result<(), Box<dyn Error>> {
        let term_size = self.term.size()?;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Percentage(100)])
            .split(term_size);

        if self.err_stack.is_empty() {
            let list = self.pane.make_list(true);
            let mut state = self.pane.get_current();
            self.term.draw(|f| {
                f.render_stateful_widget(list, chunks[0], &mut state);
            })?;
        } else {
            let mut err_items = Self::get_err_list(&self.err_stack);
            err_items.push(ListItem::new("Press ENTER to continue"));
            let err_list = List::new(err_items);
            self.term.draw(|f| {
                f.render_widget(err_list, chunks[0]);
            })?;
        }
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<(), Box<dyn Error>> {
        disable_raw_mode()?;
        execute!(
            self.term.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.term.show_cursor()?;
        self.term.clear()?;
        Ok(())
    }
}
