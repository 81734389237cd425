use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{NewSong, SelectionCriteria, Song};
use crate::palette::parse_hex;

/// Render `Name: value` with the focus/placeholder styling shared by every
/// form field.
fn field_line(field_name: &str, value: &str, placeholder: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}

/// Fields of the song form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum SongField {
    #[default]
    Title,
    Artist,
    Chart,
    Level,
    Link,
    Color,
}

impl SongField {
    pub(crate) const ALL: [SongField; 6] = [
        SongField::Title,
        SongField::Artist,
        SongField::Chart,
        SongField::Level,
        SongField::Link,
        SongField::Color,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            SongField::Title => "Title",
            SongField::Artist => "Artist",
            SongField::Chart => "Chart",
            SongField::Level => "Level",
            SongField::Link => "Link",
            SongField::Color => "Color",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Form state for song creation/editing.
#[derive(Default, Clone, Debug)]
pub(crate) struct SongForm {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) chart: String,
    pub(crate) level: String,
    pub(crate) link: String,
    pub(crate) color: String,
    pub(crate) active: SongField,
    pub(crate) error: Option<String>,
    /// Flags are not editable here but must survive an edit untouched.
    is_favorite: bool,
    is_blacklisted: bool,
}

impl SongForm {
    /// Populate the form from an existing song when entering edit mode.
    pub(crate) fn from_song(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            chart: song.chart.clone(),
            level: song.level.to_string(),
            link: song.link.clone(),
            color: song.color.clone(),
            active: SongField::Title,
            error: None,
            is_favorite: song.is_favorite,
            is_blacklisted: song.is_blacklisted,
        }
    }

    pub(crate) fn next_field(&mut self) {
        let idx = (self.active.index() + 1) % SongField::ALL.len();
        self.active = SongField::ALL[idx];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = SongField::ALL.len();
        let idx = (self.active.index() + len - 1) % len;
        self.active = SongField::ALL[idx];
    }

    fn value_mut(&mut self, field: SongField) -> &mut String {
        match field {
            SongField::Title => &mut self.title,
            SongField::Artist => &mut self.artist,
            SongField::Chart => &mut self.chart,
            SongField::Level => &mut self.level,
            SongField::Link => &mut self.link,
            SongField::Color => &mut self.color,
        }
    }

    pub(crate) fn value(&self, field: SongField) -> &str {
        match field {
            SongField::Title => &self.title,
            SongField::Artist => &self.artist,
            SongField::Chart => &self.chart,
            SongField::Level => &self.level,
            SongField::Link => &self.link,
            SongField::Color => &self.color,
        }
    }

    /// Insert a character into the active field. The level only takes digits.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.active == SongField::Level && !ch.is_ascii_digit() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    fn parse_common(&self) -> Result<(String, u32, String)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Song title is required."));
        }
        let level_raw = self.level.trim();
        let level = if level_raw.is_empty() {
            0
        } else {
            level_raw
                .parse::<u32>()
                .context("Level must be a whole number.")?
        };
        let color = self.color.trim();
        if !color.is_empty() && parse_hex(color).is_none() {
            return Err(anyhow!("Color must look like #RRGGBB."));
        }
        Ok((title.to_string(), level, color.to_string()))
    }

    /// Validate the inputs for a brand new song. A blank color is passed on
    /// as-is so the palette can fill it in.
    pub(crate) fn to_new_song(&self) -> Result<NewSong> {
        let (title, level, color) = self.parse_common()?;
        Ok(NewSong {
            title,
            artist: self.artist.trim().to_string(),
            chart: self.chart.trim().to_string(),
            link: self.link.trim().to_string(),
            level,
            is_favorite: false,
            is_blacklisted: false,
            color,
        })
    }

    /// Validate the inputs as an update of song `id`. Clearing the color keeps
    /// `fallback_color` instead.
    pub(crate) fn to_song(&self, id: i64, fallback_color: &str) -> Result<Song> {
        let (title, level, color) = self.parse_common()?;
        Ok(Song {
            id,
            title,
            artist: self.artist.trim().to_string(),
            chart: self.chart.trim().to_string(),
            link: self.link.trim().to_string(),
            level,
            is_favorite: self.is_favorite,
            is_blacklisted: self.is_blacklisted,
            color: if color.is_empty() {
                fallback_color.to_string()
            } else {
                color
            },
        })
    }

    pub(crate) fn build_line(&self, field: SongField) -> Line<'static> {
        let placeholder = match field {
            SongField::Title => "<required>",
            SongField::Color => "<random>",
            SongField::Level => "0",
            _ => "",
        };
        field_line(
            field.label(),
            self.value(field),
            placeholder,
            self.active == field,
        )
    }

    pub(crate) fn value_len(&self, field: SongField) -> usize {
        self.value(field).chars().count()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ConfirmSongDelete {
    pub(crate) song: Song,
}

/// Fields of the random pick dialog.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum PickField {
    #[default]
    MinLevel,
    MaxLevel,
    OnlyFavorites,
    Count,
}

impl PickField {
    pub(crate) const ALL: [PickField; 4] = [
        PickField::MinLevel,
        PickField::MaxLevel,
        PickField::OnlyFavorites,
        PickField::Count,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            PickField::MinLevel => "Min level",
            PickField::MaxLevel => "Max level",
            PickField::OnlyFavorites => "Favorites only",
            PickField::Count => "Count",
        }
    }
}

/// Inputs of the random pick dialog. Level bounds left blank (or `0`) are
/// unset.
#[derive(Clone, Debug)]
pub(crate) struct PickForm {
    pub(crate) min_level: String,
    pub(crate) max_level: String,
    pub(crate) only_favorites: bool,
    pub(crate) count: String,
    pub(crate) active: PickField,
    pub(crate) error: Option<String>,
}

impl Default for PickForm {
    fn default() -> Self {
        Self::from_criteria(&SelectionCriteria::default())
    }
}

impl PickForm {
    /// Prefill from the last criteria used so a re-open starts where the user
    /// left off.
    pub(crate) fn from_criteria(criteria: &SelectionCriteria) -> Self {
        Self {
            min_level: criteria.min_level.map(|l| l.to_string()).unwrap_or_default(),
            max_level: criteria.max_level.map(|l| l.to_string()).unwrap_or_default(),
            only_favorites: criteria.only_favorites,
            count: criteria.count.to_string(),
            active: PickField::MinLevel,
            error: None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        let idx = PickField::ALL
            .iter()
            .position(|f| *f == self.active)
            .unwrap_or(0);
        self.active = PickField::ALL[(idx + 1) % PickField::ALL.len()];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = PickField::ALL.len();
        let idx = PickField::ALL
            .iter()
            .position(|f| *f == self.active)
            .unwrap_or(0);
        self.active = PickField::ALL[(idx + len - 1) % len];
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.active {
            PickField::MinLevel => Some(&mut self.min_level),
            PickField::MaxLevel => Some(&mut self.max_level),
            PickField::Count => Some(&mut self.count),
            PickField::OnlyFavorites => None,
        }
    }

    /// Digits go into the numeric fields; space flips the favorites switch.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if self.active == PickField::OnlyFavorites {
            if ch == ' ' {
                self.only_favorites = !self.only_favorites;
                return true;
            }
            return false;
        }
        if !ch.is_ascii_digit() {
            return false;
        }
        match self.text_mut() {
            Some(text) => {
                text.push(ch);
                true
            }
            None => false,
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    pub(crate) fn parse_inputs(&self) -> Result<SelectionCriteria> {
        let min = parse_bound(&self.min_level, "Min level")?;
        let max = parse_bound(&self.max_level, "Max level")?;
        let count_raw = self.count.trim();
        if count_raw.is_empty() {
            return Err(anyhow!("Count is required."));
        }
        let count = count_raw
            .parse::<usize>()
            .context("Count must be a whole number.")?;
        if count == 0 {
            return Err(anyhow!("Count must be at least 1."));
        }
        Ok(SelectionCriteria::from_bounds(
            min,
            max,
            self.only_favorites,
            count,
        ))
    }

    pub(crate) fn build_line(&self, field: PickField) -> Line<'static> {
        let is_active = self.active == field;
        match field {
            PickField::MinLevel => field_line(field.label(), &self.min_level, "any", is_active),
            PickField::MaxLevel => field_line(field.label(), &self.max_level, "any", is_active),
            PickField::Count => field_line(field.label(), &self.count, "<required>", is_active),
            PickField::OnlyFavorites => {
                let mark = if self.only_favorites { "[x]" } else { "[ ]" };
                field_line(field.label(), mark, "", is_active)
            }
        }
    }

    pub(crate) fn value_len(&self, field: PickField) -> usize {
        match field {
            PickField::MinLevel => self.min_level.chars().count(),
            PickField::MaxLevel => self.max_level.chars().count(),
            PickField::Count => self.count.chars().count(),
            PickField::OnlyFavorites => 1,
        }
    }
}

fn parse_bound(raw: &str, name: &str) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>()
        .with_context(|| format!("{name} must be a whole number."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_form_requires_title_and_valid_color() {
        let mut form = SongForm::default();
        assert!(form.to_new_song().is_err());

        form.title = "Ether Strike".into();
        form.color = "pink".into();
        assert!(form.to_new_song().is_err());

        form.color = String::new();
        let song = form.to_new_song().unwrap();
        assert_eq!(song.title, "Ether Strike");
        assert_eq!(song.level, 0);
        assert!(song.color.is_empty());
    }

    #[test]
    fn level_field_only_takes_digits() {
        let mut form = SongForm {
            active: SongField::Level,
            ..SongForm::default()
        };
        assert!(!form.push_char('x'));
        assert!(form.push_char('1'));
        assert!(form.push_char('4'));
        assert_eq!(form.level, "14");
    }

    #[test]
    fn edit_keeps_flags_and_falls_back_to_old_color() {
        let original = Song {
            id: 8,
            title: "Grievous Lady".into(),
            artist: "Team Grimoire".into(),
            chart: "FUTURE".into(),
            link: String::new(),
            level: 11,
            is_favorite: true,
            is_blacklisted: true,
            color: "#A0E7E5".into(),
        };
        let mut form = SongForm::from_song(&original);
        form.color.clear();
        form.level = "12".into();

        let updated = form.to_song(original.id, &original.color).unwrap();
        assert_eq!(updated.level, 12);
        assert_eq!(updated.color, "#A0E7E5");
        assert!(updated.is_favorite && updated.is_blacklisted);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = SongForm::default();
        form.previous_field();
        assert_eq!(form.active, SongField::Color);
        form.next_field();
        assert_eq!(form.active, SongField::Title);
    }

    #[test]
    fn pick_form_maps_blank_bounds_to_unset() {
        let form = PickForm {
            min_level: String::new(),
            max_level: "0".into(),
            count: "4".into(),
            ..PickForm::default()
        };
        let criteria = form.parse_inputs().unwrap();
        assert_eq!(criteria.min_level, None);
        assert_eq!(criteria.max_level, None);
        assert_eq!(criteria.count, 4);
    }

    #[test]
    fn pick_form_rejects_zero_count() {
        let form = PickForm {
            count: "0".into(),
            ..PickForm::default()
        };
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn space_toggles_favorites_only() {
        let mut form = PickForm {
            active: PickField::OnlyFavorites,
            ..PickForm::default()
        };
        assert!(form.push_char(' '));
        assert!(form.only_favorites);
        assert!(!form.push_char('7'));

        let criteria = form.parse_inputs().unwrap();
        assert!(criteria.only_favorites);
    }

    #[test]
    fn reopening_restores_previous_criteria() {
        let criteria = SelectionCriteria::from_bounds(5, 9, true, 2);
        let form = PickForm::from_criteria(&criteria);
        assert_eq!(form.parse_inputs().unwrap(), criteria);
    }
}
