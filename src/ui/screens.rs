use crate::models::{SelectionCriteria, Song};

/// Move `selected` by `offset` within `0..len`, clamping at both ends.
fn step(selected: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (selected as isize + offset).clamp(0, max) as usize
}

/// The full catalog plus the subset matching the current search query.
pub(crate) struct CatalogScreen {
    pub(crate) songs: Vec<Song>,
    pub(crate) filtered_songs: Vec<Song>,
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl CatalogScreen {
    pub(crate) fn new(songs: Vec<Song>) -> Self {
        let mut screen = Self {
            filtered_songs: Vec::new(),
            songs,
            filter: None,
            selected: 0,
        };
        screen.apply_filter();
        screen
    }

    pub(crate) fn apply_filter(&mut self) {
        let query = self
            .filter
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .unwrap_or_default();

        self.filtered_songs = if query.is_empty() {
            self.songs.clone()
        } else {
            self.songs
                .iter()
                .filter(|s| {
                    s.title.to_lowercase().contains(&query)
                        || s.artist.to_lowercase().contains(&query)
                        || s.chart.to_lowercase().contains(&query)
                })
                .cloned()
                .collect()
        };

        self.ensure_in_bounds();
    }

    pub(crate) fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
        self.apply_filter();
    }

    /// Replace the song list, keeping the cursor on `focus_id` if it is still
    /// visible.
    pub(crate) fn set_songs(&mut self, songs: Vec<Song>, focus_id: Option<i64>) {
        self.songs = songs;
        self.apply_filter();
        if let Some(id) = focus_id {
            if let Some(pos) = self.filtered_songs.iter().position(|s| s.id == id) {
                self.selected = pos;
            }
        }
    }

    pub(crate) fn current_song(&self) -> Option<&Song> {
        self.filtered_songs.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, offset, self.filtered_songs.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.filtered_songs.len().saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.filtered_songs.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered_songs.len() {
            self.selected = self.filtered_songs.len() - 1;
        }
    }

    pub(crate) fn counts(&self) -> (usize, usize, usize) {
        let favorites = self.songs.iter().filter(|s| s.is_favorite).count();
        let blacklisted = self.songs.iter().filter(|s| s.is_blacklisted).count();
        (self.songs.len(), favorites, blacklisted)
    }
}

/// Outcome of the last random pick, kept so it can be re-rolled.
pub(crate) struct PickResultScreen {
    pub(crate) criteria: SelectionCriteria,
    pub(crate) songs: Vec<Song>,
    pub(crate) selected: usize,
}

impl PickResultScreen {
    pub(crate) fn new(criteria: SelectionCriteria, songs: Vec<Song>) -> Self {
        Self {
            criteria,
            songs,
            selected: 0,
        }
    }

    pub(crate) fn current_song(&self) -> Option<&Song> {
        self.songs.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, offset, self.songs.len());
    }

    /// One-line summary of the criteria for the screen title.
    pub(crate) fn describe_criteria(&self) -> String {
        let range = match (self.criteria.min_level, self.criteria.max_level) {
            (None, None) => "any level".to_string(),
            (Some(min), None) => format!("Lv.{min}+"),
            (None, Some(max)) => format!("up to Lv.{max}"),
            (Some(min), Some(max)) => format!("Lv.{min}-{max}"),
        };
        let favorites = if self.criteria.only_favorites {
            ", favorites only"
        } else {
            ""
        };
        format!("{} of {}{}", self.criteria.count, range, favorites)
    }
}
