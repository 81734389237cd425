//! Domain models that mirror the SQLite schema and get passed throughout the
//! picker and the TUI. They stay light-weight data holders so other layers can
//! focus on presentation, sampling and persistence logic.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One catalog entry. The struct mirrors a row of the `songs` table.
pub struct Song {
    /// Primary key from the SQLite store.
    pub id: i64,
    /// Title displayed in lists and pick results.
    pub title: String,
    /// Artist or composer credit. May be blank.
    pub artist: String,
    /// Free-form chart label such as `EXPERT` or `MASTER`.
    pub chart: String,
    /// Optional URL pointing to a chart preview or reference video.
    pub link: String,
    /// Numeric difficulty level used by the range filter.
    pub level: u32,
    pub is_favorite: bool,
    /// Blacklisted songs are never picked, whatever the criteria say.
    pub is_blacklisted: bool,
    /// Hex display color (`#RRGGBB`).
    pub color: String,
}

impl Song {
    /// Compose a `Title - Artist` string that gracefully omits the hyphen if
    /// the artist is blank.
    pub fn display_title(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Lv.{})", self.display_title(), self.level)
    }
}

/// Field values for a song that has not been stored yet. An empty `color`
/// means "let the palette choose".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub chart: String,
    pub link: String,
    pub level: u32,
    pub is_favorite: bool,
    pub is_blacklisted: bool,
    pub color: String,
}

/// A single sampling request. Either level bound may be `None`, which removes
/// the constraint on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub min_level: Option<u32>,
    pub max_level: Option<u32>,
    pub only_favorites: bool,
    pub count: usize,
}

impl SelectionCriteria {
    /// Build criteria from raw form bounds where `0` stands for "unset", the
    /// way the picker dialog and older saved settings encode them.
    pub fn from_bounds(min_level: u32, max_level: u32, only_favorites: bool, count: usize) -> Self {
        Self {
            min_level: (min_level != 0).then_some(min_level),
            max_level: (max_level != 0).then_some(max_level),
            only_favorites,
            count,
        }
    }
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            min_level: None,
            max_level: None,
            only_favorites: false,
            count: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bounds_mean_unset() {
        let criteria = SelectionCriteria::from_bounds(0, 0, false, 5);
        assert_eq!(criteria.min_level, None);
        assert_eq!(criteria.max_level, None);

        let criteria = SelectionCriteria::from_bounds(4, 0, true, 1);
        assert_eq!(criteria.min_level, Some(4));
        assert_eq!(criteria.max_level, None);
        assert!(criteria.only_favorites);
    }

    #[test]
    fn display_title_skips_blank_artist() {
        let mut song = Song {
            id: 1,
            title: "Ghost Rule".into(),
            artist: "  ".into(),
            chart: String::new(),
            link: String::new(),
            level: 12,
            is_favorite: false,
            is_blacklisted: false,
            color: "#FFB3BA".into(),
        };
        assert_eq!(song.display_title(), "Ghost Rule");
        song.artist = "DECO*27".into();
        assert_eq!(song.to_string(), "Ghost Rule - DECO*27 (Lv.12)");
    }
}
