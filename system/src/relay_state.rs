use crate::{ConnectionRegistry, RoomTable, WhiteboardStore};

/// All state the router mutates, owned in one place so a router can be
/// built over a fresh or a prepared store.
#[derive(Debug, Default)]
pub struct RelayState {
    pub connections: ConnectionRegistry,
    pub rooms: RoomTable,
    pub whiteboards: WhiteboardStore,
}

impl RelayState {
    pub fn new() -> Self {
        Self {
            connections: ConnectionRegistry::new(),
            rooms: RoomTable::new(),
            whiteboards: WhiteboardStore::new(),
        }
    }
}
