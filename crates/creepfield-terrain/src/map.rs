//! Multi-room map with a current room.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::room::Room;

/// Named rooms plus the one currently in play.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    rooms: BTreeMap<String, Room>,
    current: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl GameMap {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Add or replace a room. The first room added becomes current.
    pub fn add_room(&mut self, name: impl Into<String>, room: Room) {
        let name = name.into();
        if self.current.is_none() {
            self.current = Some(name.clone());
        }
        self.rooms.insert(name, room);
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Switch rooms. Unknown names are ignored and the current room stays.
    pub fn set_current_room(&mut self, name: &str) -> bool {
        if self.rooms.contains_key(name) {
            self.current = Some(name.to_string());
            true
        } else {
            log::warn!("set_current_room: no room named {name:?}");
            false
        }
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current.as_ref().and_then(|name| self.rooms.get(name))
    }

    pub fn current_room_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn room_names(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }
}
