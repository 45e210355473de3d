use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{channel, Sender};

use relay_system::{ConnectionId, Delivery, InboundEvent, Router};

use super::connection::{ConnectionCommand, ConnectionEvent};
use crate::connection_tx_storage::ConnectionTxStorage;

pub type ServerTx = Sender<ConnectionCommand>;

const SERVER_BUFFER: usize = 1024;

/// Owns the router and every connection's outbound channel. Commands are
/// handled one at a time, in arrival order.
struct Server {
    router: Router,
    connections: ConnectionTxStorage,
}

impl Server {
    fn new() -> Self {
        Self {
            router: Router::new(),
            connections: ConnectionTxStorage::new(),
        }
    }

    fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect { from, tx } => {
                self.connections.insert(from, tx);
                self.connections.send(&from, ConnectionEvent::Connected);
            }
            ConnectionCommand::Disconnect { from } => {
                let deliveries = self.router.disconnect(&from);
                self.deliver(deliveries);
                if self.connections.remove(&from).is_some() {
                    log::info!("Connection {} closed", from);
                }
            }
            ConnectionCommand::Event { from, event } => {
                let name = event.name();
                let deliveries = self.router.handle(&from, event);
                log::debug!("{} from {} fanned out to {}", name, from, deliveries.len());
                self.deliver(deliveries);
            }
        }
    }

    fn deliver(&mut self, deliveries: Vec<Delivery>) {
        for Delivery { to, event } in deliveries {
            self.connections.send(&to, ConnectionEvent::Relay(event));
        }
    }
}

/// Queues a client event for the server loop. A full queue drops the event.
pub fn forward_event(srv_tx: &mut ServerTx, from: ConnectionId, event: InboundEvent) -> bool {
    match srv_tx.try_send(ConnectionCommand::Event { from, event }) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            log::warn!("Server queue is full, dropping event from {}", from);
            false
        }
        Err(TrySendError::Closed(_)) => {
            log::error!("Server loop has stopped, dropping event from {}", from);
            false
        }
    }
}

/// Connect and disconnect are never dropped; on a full queue they wait in a
/// spawned task instead.
pub fn forward_lifecycle(srv_tx: &mut ServerTx, command: ConnectionCommand) {
    match srv_tx.try_send(command) {
        Ok(()) => {}
        Err(TrySendError::Full(command)) => {
            log::warn!("Server queue is full, deferring {:?}", command);
            let mut srv_tx = srv_tx.clone();
            tokio::spawn(async move {
                if srv_tx.send(command).await.is_err() {
                    log::error!("Server loop has stopped before a deferred command");
                }
            });
        }
        Err(TrySendError::Closed(command)) => {
            log::error!("Server loop has stopped, dropping {:?}", command)
        }
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = channel::<ConnectionCommand>(SERVER_BUFFER);

    tokio::spawn(async move {
        let mut server = Server::new();

        while let Some(command) = srv_rx.recv().await {
            server.handle_connection_command(command);
        }
        log::info!("Server loop terminated");
    });

    srv_tx
}
