use crate::connection::ConnectionEvent;
use relay_system::ConnectionId;
use std::collections::HashMap;

pub type ConnectionTx = tokio::sync::mpsc::Sender<ConnectionEvent>;

pub struct ConnectionTxStorage {
    connection_txs: HashMap<ConnectionId, ConnectionTx>,
}

impl ConnectionTxStorage {
    pub fn new() -> Self {
        Self {
            connection_txs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connection_txs.insert(connection_id, tx);
    }

    /// Never waits on a slow connection; a full or closed channel drops the event.
    pub fn send(&mut self, to: &ConnectionId, message: ConnectionEvent) -> bool {
        if let Some(tx) = self.connection_txs.get_mut(to) {
            if tx.try_send(message).is_ok() {
                true
            } else {
                log::warn!("Dropping event for {}: channel full or closed", to);
                false
            }
        } else {
            log::warn!("Dropping event for unknown connection {}", to);
            false
        }
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionTx> {
        self.connection_txs.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.connection_txs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_system::{new_connection_id, OutboundEvent};
    use tokio::sync::mpsc::channel;

    #[tokio::test]
    async fn it_sends_to_registered_connection() {
        let mut storage = ConnectionTxStorage::new();
        let id = new_connection_id();
        let (tx, mut rx) = channel(4);
        storage.insert(id, tx);

        assert!(storage.send(&id, ConnectionEvent::Relay(OutboundEvent::ClearBoard)));
        match rx.recv().await {
            Some(ConnectionEvent::Relay(OutboundEvent::ClearBoard)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn it_drops_events_for_unknown_or_closed_connections() {
        let mut storage = ConnectionTxStorage::new();
        let id = new_connection_id();
        assert!(!storage.send(&id, ConnectionEvent::Relay(OutboundEvent::ClearBoard)));

        let (tx, rx) = channel(1);
        storage.insert(id, tx);
        drop(rx);
        assert!(!storage.send(&id, ConnectionEvent::Relay(OutboundEvent::ClearBoard)));

        assert!(storage.remove(&id).is_some());
        assert_eq!(storage.len(), 0);
    }
}
