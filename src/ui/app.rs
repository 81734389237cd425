use std::cmp::min;
use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{SelectionCriteria, Song};
use crate::service::PickerService;

use super::forms::{ConfirmSongDelete, PickField, PickForm, SongField, SongForm};
use super::helpers::{centered_rect, flag_badges, surface_error, swatch_color};
use super::screens::{CatalogScreen, PickResultScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Header line with catalog totals.
const HEADER_HEIGHT: u16 = 1;
/// Height allocation per song card in list-style views.
const SONG_CARD_HEIGHT: u16 = 4;

/// High-level navigation states.
enum Screen {
    Catalog,
    Results(PickResultScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingSong(SongForm),
    EditingSong {
        song_id: i64,
        color: String,
        form: SongForm,
    },
    ConfirmSongDelete(ConfirmSongDelete),
    Picking(PickForm),
    Searching(String),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    service: PickerService,
    catalog: CatalogScreen,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    last_criteria: SelectionCriteria,
}

impl App {
    /// Build the UI state on top of a started service. A catalog that cannot
    /// be read starts out empty with the error in the footer.
    pub fn new(service: PickerService) -> Self {
        let mut app = Self {
            service,
            catalog: CatalogScreen::new(Vec::new()),
            screen: Screen::Catalog,
            mode: Mode::Normal,
            status: None,
            last_criteria: SelectionCriteria::default(),
        };
        if let Err(err) = app.reload_catalog(None) {
            app.set_status(surface_error(&err), StatusKind::Error);
        }
        app
    }

    /// Hand the service back so the caller can run its shutdown.
    pub fn into_service(self) -> PickerService {
        self.service
    }

    /// Process one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingSong(form) => self.handle_add_song(code, form)?,
            Mode::EditingSong {
                song_id,
                color,
                form,
            } => self.handle_edit_song(code, song_id, color, form)?,
            Mode::ConfirmSongDelete(confirm) => self.handle_confirm_song_delete(code, confirm)?,
            Mode::Picking(form) => self.handle_pick_form(code, form)?,
            Mode::Searching(query) => self.handle_search(code, query),
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        if let Screen::Results(results) = &mut self.screen {
            match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => {
                    self.screen = Screen::Catalog;
                    self.clear_status();
                }
                KeyCode::Up => results.move_selection(-1),
                KeyCode::Down => results.move_selection(1),
                KeyCode::Enter => {
                    if let Some(song) = results.current_song().cloned() {
                        self.open_song_link(&song);
                    }
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    let criteria = results.criteria;
                    self.run_pick(criteria)?;
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.clear_status();
                    return Ok(Mode::Picking(PickForm::from_criteria(&self.last_criteria)));
                }
                _ => {}
            }
            return Ok(Mode::Normal);
        }

        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.catalog.filter.is_some() {
                    self.catalog.set_filter(None);
                    self.set_status("Search cleared.", StatusKind::Info);
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.catalog.move_selection(-1),
            KeyCode::Down => self.catalog.move_selection(1),
            KeyCode::PageUp => self.catalog.move_selection(-5),
            KeyCode::PageDown => self.catalog.move_selection(5),
            KeyCode::Home => self.catalog.select_first(),
            KeyCode::End => self.catalog.select_last(),
            KeyCode::Char('/') => {
                let query = self.catalog.filter.clone().unwrap_or_default();
                return Ok(Mode::Searching(query));
            }
            KeyCode::Enter => {
                if let Some(song) = self.catalog.current_song().cloned() {
                    self.open_song_link(&song);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Ok(Mode::AddingSong(SongForm::default()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(song) = self.catalog.current_song().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingSong {
                        song_id: song.id,
                        color: song.color.clone(),
                        form: SongForm::from_song(&song),
                    });
                }
                self.set_status("No song selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                if let Some(song) = self.catalog.current_song().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmSongDelete(ConfirmSongDelete { song }));
                }
                self.set_status("No song selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_current(FlagKind::Favorite),
            KeyCode::Char('b') | KeyCode::Char('B') => self.toggle_current(FlagKind::Blacklist),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.clear_status();
                return Ok(Mode::Picking(PickForm::from_criteria(&self.last_criteria)));
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_song(&mut self, code: KeyCode, mut form: SongForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                let saved = form
                    .to_new_song()
                    .and_then(|song| self.service.add_song(song));
                match saved {
                    Ok(song) => {
                        self.reload_catalog(Some(song.id))?;
                        self.set_status(format!("Added {}.", song.display_title()), StatusKind::Info);
                        return Ok(Mode::Normal);
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            other => edit_song_form(&mut form, other),
        }
        Ok(Mode::AddingSong(form))
    }

    fn handle_edit_song(
        &mut self,
        code: KeyCode,
        song_id: i64,
        color: String,
        mut form: SongForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                let saved = form
                    .to_song(song_id, &color)
                    .and_then(|song| self.service.update_song(&song));
                match saved {
                    Ok(()) => {
                        self.reload_catalog(Some(song_id))?;
                        self.set_status("Song updated.", StatusKind::Info);
                        return Ok(Mode::Normal);
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            other => edit_song_form(&mut form, other),
        }
        Ok(Mode::EditingSong {
            song_id,
            color,
            form,
        })
    }

    fn handle_confirm_song_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmSongDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.service.delete_song(confirm.song.id) {
                    Ok(()) => {
                        self.reload_catalog(None)?;
                        self.set_status(
                            format!("Deleted {}.", confirm.song.display_title()),
                            StatusKind::Info,
                        );
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Ok(Mode::ConfirmSongDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmSongDelete(confirm)),
        }
    }

    fn handle_pick_form(&mut self, code: KeyCode, mut form: PickForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Pick cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok(criteria) => {
                    self.run_pick(criteria)?;
                    return Ok(Mode::Normal);
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::Picking(form))
    }

    fn handle_search(&mut self, code: KeyCode, mut query: String) -> Mode {
        match code {
            KeyCode::Esc => {
                self.catalog.set_filter(None);
                return Mode::Normal;
            }
            KeyCode::Enter => {
                let filter = (!query.trim().is_empty()).then_some(query);
                self.catalog.set_filter(filter);
                return Mode::Normal;
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => query.push(ch),
            _ => {}
        }
        self.catalog.set_filter(Some(query.clone()));
        Mode::Searching(query)
    }

    /// Draw a selection and switch to the results screen. An empty result is
    /// shown as such, not as an error.
    fn run_pick(&mut self, criteria: SelectionCriteria) -> Result<()> {
        self.last_criteria = criteria;
        match self.service.random_pick(&criteria) {
            Ok(songs) => {
                if songs.is_empty() {
                    self.set_status("No songs match these criteria.", StatusKind::Info);
                } else {
                    self.set_status(format!("Picked {} song(s).", songs.len()), StatusKind::Info);
                }
                self.screen = Screen::Results(PickResultScreen::new(criteria, songs));
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
        Ok(())
    }

    fn toggle_current(&mut self, kind: FlagKind) {
        let Some(song) = self.catalog.current_song().cloned() else {
            self.set_status("No song selected.", StatusKind::Error);
            return;
        };
        let outcome = match kind {
            FlagKind::Favorite => self.service.toggle_favorite(song.id),
            FlagKind::Blacklist => self.service.toggle_blacklist(song.id),
        }
        .and_then(|_| self.reload_catalog(Some(song.id)));

        match outcome {
            Ok(()) => {
                let now_set = self.catalog.current_song().map(|s| match kind {
                    FlagKind::Favorite => s.is_favorite,
                    FlagKind::Blacklist => s.is_blacklisted,
                });
                let text = match (kind, now_set) {
                    (FlagKind::Favorite, Some(true)) => "Added to favorites.",
                    (FlagKind::Favorite, _) => "Removed from favorites.",
                    (FlagKind::Blacklist, Some(true)) => "Blacklisted; it will never be picked.",
                    (FlagKind::Blacklist, _) => "Removed from blacklist.",
                };
                self.set_status(text, StatusKind::Info);
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn open_song_link(&mut self, song: &Song) {
        let link = song.link.trim();
        if link.is_empty() {
            self.set_status("This song does not have a link.", StatusKind::Error);
        } else if let Err(err) = open_link(link) {
            self.set_status(format!("Failed to open link: {err}"), StatusKind::Error);
        } else {
            self.set_status(format!("Opened {}.", song.display_title()), StatusKind::Info);
        }
    }

    fn reload_catalog(&mut self, focus_id: Option<i64>) -> Result<()> {
        let songs = self.service.all_songs()?;
        self.catalog.set_songs(songs, focus_id);
        Ok(())
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Catalog => self.draw_catalog(frame, content_area),
            Screen::Results(results) => self.draw_results(frame, content_area, results),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingSong(form) => self.draw_song_form(frame, area, "Add Song", form),
            Mode::EditingSong { form, .. } => self.draw_song_form(frame, area, "Edit Song", form),
            Mode::ConfirmSongDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Picking(form) => self.draw_pick_form(frame, area, form),
            Mode::Searching(query) => self.draw_search_bar(frame, area, query),
            Mode::Normal => {}
        }
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
            .split(area);

        let (total, favorites, blacklisted) = self.catalog.counts();
        let mut header = vec![Span::styled(
            format!("{total} songs · {favorites} favorites · {blacklisted} blacklisted"),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(filter) = &self.catalog.filter {
            header.push(Span::styled(
                format!("  (search: {filter})"),
                Style::default().fg(Color::Cyan),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        if self.catalog.filtered_songs.is_empty() {
            let text = if self.catalog.songs.is_empty() {
                "No songs yet. Press + to add one."
            } else {
                "No songs match the search."
            };
            let paragraph = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, chunks[1]);
            return;
        }

        self.render_song_cards(
            frame,
            chunks[1],
            &self.catalog.filtered_songs,
            self.catalog.selected,
        );
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect, results: &PickResultScreen) {
        let block = Block::default()
            .title(format!("Random pick: {}", results.describe_criteria()))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        if results.songs.is_empty() {
            let paragraph = Paragraph::new("Nothing to pick. Loosen the criteria with p.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, inner);
            return;
        }

        self.render_song_cards(frame, inner, &results.songs, results.selected);
    }

    fn render_song_cards(&self, frame: &mut Frame, area: Rect, songs: &[Song], selected: usize) {
        if songs.is_empty() || area.height == 0 {
            return;
        }

        let card_height = SONG_CARD_HEIGHT as usize;
        let capacity = ((area.height as usize) / card_height).max(1);
        let len = songs.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = min(start + capacity, len);
        let visible_len = end.saturating_sub(start);
        if visible_len == 0 {
            return;
        }

        let constraints: Vec<Constraint> = (0..visible_len)
            .map(|_| Constraint::Length(SONG_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, chunk) in rows.iter().enumerate() {
            let song_index = start + idx;
            if chunk.height == 0 || song_index >= len {
                continue;
            }

            let song = &songs[song_index];
            let is_selected = song_index == selected;
            let mut block = Block::default().borders(Borders::ALL);
            if is_selected {
                block = block.border_style(Style::default().fg(Color::Yellow));
            }

            let mut title_style = Style::default().add_modifier(Modifier::BOLD);
            if song.is_blacklisted {
                title_style = title_style
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT);
            } else if is_selected {
                title_style = title_style.fg(Color::Yellow);
            }

            let marker = if is_selected { "▶ " } else { "  " };
            let title_line = Line::from(vec![
                Span::raw(marker),
                Span::styled("██ ", Style::default().fg(swatch_color(&song.color))),
                Span::styled(song.title.clone(), title_style),
                Span::styled(
                    flag_badges(song.is_favorite, song.is_blacklisted),
                    Style::default().fg(Color::Magenta),
                ),
            ]);

            let mut details = vec![format!("Lv.{}", song.level)];
            if !song.chart.trim().is_empty() {
                details.push(song.chart.trim().to_string());
            }
            if !song.artist.trim().is_empty() {
                details.push(song.artist.trim().to_string());
            }
            if !song.link.trim().is_empty() {
                details.push("🔗".to_string());
            }
            let details_line = Line::from(Span::styled(
                format!("     {}", details.join(" · ")),
                Style::default().fg(Color::Gray),
            ));

            let paragraph = Paragraph::new(vec![title_line, details_line])
                .block(block)
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, *chunk);
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let text = match (&self.mode, &self.screen) {
            (Mode::AddingSong(_), _) | (Mode::EditingSong { .. }, _) => {
                "Enter save • Tab/Shift-Tab switch field • Esc cancel"
            }
            (Mode::Picking(_), _) => {
                "Enter pick • Tab switch field • Space toggle favorites • Esc cancel"
            }
            (Mode::ConfirmSongDelete(_), _) => "y confirm • n cancel",
            (Mode::Searching(_), _) => "Type to filter • Enter keep • Esc clear",
            (Mode::Normal, Screen::Catalog) => {
                "↑/↓ move • + add • e edit • - delete • f favorite • b blacklist • / search • Enter link • r pick • q quit"
            }
            (Mode::Normal, Screen::Results(_)) => {
                "↑/↓ move • r re-roll • p new criteria • Enter link • Esc back • q quit"
            }
        };
        Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
    }

    fn draw_song_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &SongForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = SongField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        lines.push(form_hint(form.error.as_deref(), "Blank color picks a pastel at random."));

        frame.render_widget(Paragraph::new(lines), inner);

        let row = SongField::ALL
            .iter()
            .position(|f| *f == form.active)
            .unwrap_or(0) as u16;
        let prefix = format!("{}: ", form.active.label()).len() as u16;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_pick_form(&self, frame: &mut Frame, area: Rect, form: &PickForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Random Pick").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = PickField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        lines.push(form_hint(
            form.error.as_deref(),
            "Leave a level blank for no limit. Blacklisted songs are never picked.",
        ));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let row = PickField::ALL
            .iter()
            .position(|f| *f == form.active)
            .unwrap_or(0) as u16;
        let prefix = format!("{}: ", form.active.label()).len() as u16;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmSongDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete {}?", confirm.song.display_title())),
            Line::from(""),
            Line::from(Span::styled(
                "This removes the song from the catalog permanently. (y/n)",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, query: &str) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Search").borders(Borders::ALL);
        let paragraph = Paragraph::new(format!("/{query}")).block(block);
        frame.render_widget(paragraph, popup_area);

        let cursor_x = popup_area.x + 2 + query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, popup_area.y + 1));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[derive(Copy, Clone)]
enum FlagKind {
    Favorite,
    Blacklist,
}

/// Shared key handling for the add and edit song forms.
fn edit_song_form(form: &mut SongForm, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.previous_field(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(ch) => {
            if form.push_char(ch) {
                form.error = None;
            }
        }
        _ => {}
    }
}

fn form_hint(error: Option<&str>, hint: &str) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Gray),
        )),
    }
}
