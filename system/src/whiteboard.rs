use crate::RoomId;
use std::collections::HashMap;

/// Last stored canvas encoding per room. Entries outlive the room itself.
#[derive(Debug, Default)]
pub struct WhiteboardStore {
    snapshots: HashMap<RoomId, String>,
}

impl WhiteboardStore {
    pub fn new() -> Self {
        Self {
            snapshots: HashMap::new(),
        }
    }

    pub fn set(&mut self, room_id: RoomId, payload: String) {
        self.snapshots.insert(room_id, payload);
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&str> {
        self.snapshots.get(room_id).map(|s| s.as_str())
    }
}
