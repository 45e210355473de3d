use crate::{ConnectionId, RoomId};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub existed: bool,
    /// Members in join order, not including the joiner.
    pub existing_members: Vec<ConnectionId>,
}

/// Room id to members in join order. A room entry is created by its first
/// join and removed when its last member leaves.
#[derive(Debug, Default)]
pub struct RoomTable {
    rooms: HashMap<RoomId, Vec<ConnectionId>>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    pub fn join(&mut self, room_id: &RoomId, connection_id: ConnectionId) -> JoinOutcome {
        if let Some(members) = self.rooms.get_mut(room_id).filter(|m| !m.is_empty()) {
            let existing_members = members
                .iter()
                .filter(|m| **m != connection_id)
                .cloned()
                .collect();
            if !members.contains(&connection_id) {
                members.push(connection_id);
            }
            return JoinOutcome {
                existed: true,
                existing_members,
            };
        }

        self.rooms.insert(room_id.clone(), vec![connection_id]);
        log::info!("Room {:?} created", room_id);
        JoinOutcome {
            existed: false,
            existing_members: Vec::new(),
        }
    }

    pub fn leave(&mut self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let removed = if let Some(members) = self.rooms.get_mut(room_id) {
            let before = members.len();
            members.retain(|m| m != connection_id);
            before != members.len()
        } else {
            false
        };
        if self
            .rooms
            .get(room_id)
            .map(|members| members.is_empty())
            .unwrap_or(false)
        {
            self.rooms.remove(room_id);
            log::info!("Room {:?} removed", room_id);
        }
        removed
    }

    pub fn members(&self, room_id: &RoomId) -> &[ConnectionId] {
        self.rooms
            .get(room_id)
            .map(|members| members.as_slice())
            .unwrap_or(&[])
    }

    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.members(room_id).len()
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
