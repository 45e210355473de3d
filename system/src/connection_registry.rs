use crate::{ConnectionId, RoomId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Attributes of a connection that has joined a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub username: String,
    pub room_id: RoomId,
    pub mic_on: bool,
    pub camera_on: bool,
}

impl Connection {
    pub fn new(username: String, room_id: RoomId) -> Self {
        Self {
            username,
            room_id,
            mic_on: true,
            camera_on: true,
        }
    }
}

/// Connections are only tracked once they join a room. Lookups and updates on
/// an unknown id are no-ops.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    pub fn set_attributes(
        &mut self,
        connection_id: ConnectionId,
        username: String,
        room_id: RoomId,
    ) -> &Connection {
        let connection = Connection::new(username, room_id);
        match self.connections.entry(connection_id) {
            Entry::Occupied(mut entry) => {
                entry.insert(connection);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(connection),
        }
    }

    pub fn update_mic(&mut self, connection_id: &ConnectionId, on: bool) -> Option<&Connection> {
        self.connections.get_mut(connection_id).map(|c| {
            c.mic_on = on;
            &*c
        })
    }

    pub fn update_camera(
        &mut self,
        connection_id: &ConnectionId,
        on: bool,
    ) -> Option<&Connection> {
        self.connections.get_mut(connection_id).map(|c| {
            c.camera_on = on;
            &*c
        })
    }

    pub fn get(&self, connection_id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(connection_id)
    }

    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<&RoomId> {
        self.connections.get(connection_id).map(|c| &c.room_id)
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
