//! Orchestration context tying the song store, the sampler and the sidecar
//! together. The UI talks only to this type.

use anyhow::{anyhow, Context, Result};
use rand::thread_rng;
use rusqlite::Connection;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::db::{
    create_song, delete_song, ensure_schema, fetch_all_songs, toggle_blacklist, toggle_favorite,
    update_song,
};
use crate::models::{NewSong, SelectionCriteria, Song};
use crate::palette::random_color;
use crate::picker;
use crate::sidecar::Launcher;

pub struct PickerService {
    conn: Option<Connection>,
    launcher: Option<Launcher>,
}

impl PickerService {
    /// Open the store, then start the sidecar if enabled. A store that fails
    /// to open is logged and left empty; every catalog call will then report
    /// it instead of the app refusing to start.
    pub fn startup(config: &Config) -> Self {
        let conn = match ensure_schema(&config.db_path()) {
            Ok(conn) => {
                info!(path = %config.db_path().display(), "opened song store");
                Some(conn)
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(error = %message, "database initialization failed");
                None
            }
        };

        let launcher = if config.sidecar.enabled {
            let mut launcher = Launcher::new(config.sidecar.keep_on_shutdown);
            launcher.bootstrap();
            Some(launcher)
        } else {
            debug!("sidecar disabled by configuration");
            None
        };

        Self::from_parts(conn, launcher)
    }

    pub fn from_parts(conn: Option<Connection>, launcher: Option<Launcher>) -> Self {
        Self { conn, launcher }
    }

    /// Release the store and hand the sidecar its shutdown.
    pub fn shutdown(mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, err)) = conn.close() {
                error!(error = %err, "failed to close song store");
            }
        }
        if let Some(launcher) = self.launcher.as_mut() {
            launcher.shutdown();
        }
        info!("shutdown complete");
    }

    pub fn sidecar(&self) -> Option<&Launcher> {
        self.launcher.as_ref()
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| anyhow!("Song store is not available."))
    }

    pub fn all_songs(&self) -> Result<Vec<Song>> {
        fetch_all_songs(self.conn()?)
    }

    /// Store a new song, drawing a palette color when none was given.
    pub fn add_song(&self, mut song: NewSong) -> Result<Song> {
        if song.color.trim().is_empty() {
            song.color = random_color(&mut thread_rng()).to_string();
        }
        let created = create_song(self.conn()?, &song)?;
        debug!(id = created.id, color = %created.color, "song added");
        Ok(created)
    }

    pub fn update_song(&self, song: &Song) -> Result<()> {
        update_song(self.conn()?, song)
    }

    pub fn delete_song(&self, id: i64) -> Result<()> {
        delete_song(self.conn()?, id)
    }

    pub fn toggle_favorite(&self, id: i64) -> Result<()> {
        toggle_favorite(self.conn()?, id)
    }

    pub fn toggle_blacklist(&self, id: i64) -> Result<()> {
        toggle_blacklist(self.conn()?, id)
    }

    /// Load the catalog and draw a random selection from it.
    pub fn random_pick(&self, criteria: &SelectionCriteria) -> Result<Vec<Song>> {
        let songs = self.all_songs().context("failed to load songs for pick")?;
        let picked = picker::pick(&songs, criteria);
        debug!(
            requested = criteria.count,
            picked = picked.len(),
            catalog = songs.len(),
            "random pick"
        );
        Ok(picked)
    }
}
