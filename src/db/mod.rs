//! Persistence module split across logical submodules.

mod connection;
mod songs;

pub use connection::{ensure_schema, init_schema};
pub use songs::{
    create_song, delete_song, fetch_all_songs, fetch_song, toggle_blacklist, toggle_favorite,
    update_song,
};
