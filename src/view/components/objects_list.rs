//! The listing pane: one entry source, one cursor, one rendered list.

use tui::{
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::{err::ComponentError, StatefulContainer};
use crate::{
    entries::{Entry, ObjectEntry, PrefixEntry},
    providers::{EntrySource, SourceError},
    render::{ObjectRenderer, PrefixRenderer, RenderCache},
    utils::{format_size, join_prefix, parent_prefix},
};

/// Renders prefix rows.
struct PrefixRow;

impl PrefixRenderer<ListItem<'static>> for PrefixRow {
    fn render(&self, prefix: &PrefixEntry) -> ListItem<'static> {
        ListItem::new(Spans::from(Span::styled(
            prefix.name.clone(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )))
    }
}

/// Renders object rows with their size and modification date.
struct ObjectRow;

impl ObjectRenderer<ListItem<'static>> for ObjectRow {
    fn render(&self, object: &ObjectEntry) -> ListItem<'static> {
        let mut spans = vec![Span::raw(object.name.clone())];
        if let Some(size) = object.size {
            spans.push(Span::styled(
                format!("  {}", format_size(size)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(modified) = object.last_modified {
            spans.push(Span::styled(
                modified.format("  %Y-%m-%d %H:%M").to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        ListItem::new(Spans::from(spans))
    }
}

/// Interactive list of entries under the current prefix of a source.
pub struct ObjectsList {
    source: Box<dyn EntrySource>,
    prefix: String,
    entries: Vec<Entry>,
    state: ListState,
    cache: RenderCache<ListItem<'static>>,
}

impl ObjectsList {
    pub fn new(source: Box<dyn EntrySource>) -> ObjectsList {
        ObjectsList {
            source,
            prefix: String::new(),
            entries: Vec::new(),
            state: ListState::default(),
            cache: RenderCache::new(),
        }
    }

    /// Maps a source error to a ComponentError carrying the provider name.
    fn handle_err(&self, err: SourceError) -> ComponentError {
        ComponentError::from_source(self.source.provider_name(), err)
    }

    /// Re-lists the current prefix and puts the cursor back on top.
    pub async fn refresh(&mut self) -> Result<(), ComponentError> {
        match self.source.list(&self.prefix).await {
            Ok(entries) => {
                self.entries = entries;
                self.reset_cursor();
                Ok(())
            }
            Err(err) => Err(self.handle_err(err)),
        }
    }

    fn reset_cursor(&mut self) {
        if self.entries.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    /// Descends into the selected entry. A no-op unless it is a prefix.
    pub fn move_into_selected_dir(&mut self) {
        let dir = match self.selected_entry() {
            Some(Entry::Prefix(prefix)) => prefix.name.clone(),
            _ => return,
        };
        self.prefix = join_prefix(&self.prefix, &dir);
        self.clear_state();
    }

    /// Climbs one prefix level up. A no-op at the listing root.
    pub fn move_out_of_selected_dir(&mut self) {
        if !self.prefix.is_empty() {
            self.prefix = parent_prefix(&self.prefix);
            self.clear_state();
        }
    }

    pub fn current_path(&self) -> &str {
        &self.prefix
    }

    fn title(&self) -> String {
        format!(
            " {}://{}/{} ",
            self.source.provider_name(),
            self.source.resource_name(),
            self.prefix
        )
    }

    /// Builds the tui widget for the current entries. Rows for unchanged
    /// entries are reused from the previous render.
    pub fn make_list(&mut self, is_active: bool) -> List<'static> {
        let rendered = self
            .cache
            .render_entries(&self.entries, &PrefixRow, &ObjectRow);
        let border_style = if is_active {
            Style::default().fg(Color::LightBlue)
        } else {
            Style::default()
        };
        List::new(rendered.into_nodes())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(self.title()),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    }
}

impl StatefulContainer for ObjectsList {
    fn get_current(&self) -> ListState {
        self.state.clone()
    }

    fn clear_state(&mut self) {
        self.state.select(None);
    }

    fn next(&mut self) {
        if self.entries.len() > 0 {
            let i = match self.state.selected() {
                Some(i) => {
                    if i >= self.entries.len() - 1 {
                        0
                    } else {
                        i + 1
                    }
                }
                None => 0,
            };

            self.state.select(Some(i));
        }
    }

    fn previous(&mut self) {
        if self.entries.len() > 0 {
            let i = match self.state.selected() {
                Some(i) => {
                    if i == 0 {
                        self.entries.len() - 1
                    } else {
                        i - 1
                    }
                }
                None => 0,
            };

            self.state.select(Some(i));
        }
    }
}
