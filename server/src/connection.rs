use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use relay_system::{new_connection_id, ConnectionId, InboundEvent, OutboundEvent};

use crate::codec::{self, CodecError};
use crate::connection_tx_storage::ConnectionTx;
use crate::server::{forward_event, forward_lifecycle, ServerTx};

const CONNECTION_BUFFER: usize = 256;

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect {
        from: ConnectionId,
        tx: ConnectionTx,
    },
    Disconnect {
        from: ConnectionId,
    },
    Event {
        from: ConnectionId,
        event: InboundEvent,
    },
}

#[derive(Debug)]
pub enum ConnectionEvent {
    /// The server registered the connection and will route events to it.
    Connected,
    Relay(OutboundEvent),
}

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ConnectionEvent);

struct ConnectionActor {
    connection_id: ConnectionId,
    srv_tx: ServerTx,
}

impl ConnectionActor {
    fn new(srv_tx: ServerTx) -> Self {
        Self {
            connection_id: new_connection_id(),
            srv_tx,
        }
    }

    fn ingress(&mut self, decoded: Result<InboundEvent, CodecError>) {
        match decoded {
            Ok(event) => {
                log::debug!("Ingress {} {:?}", self.connection_id, event);
                forward_event(&mut self.srv_tx, self.connection_id, event);
            }
            Err(err) => log::warn!("Dropping frame from {}: {}", self.connection_id, err),
        }
    }

    fn egress(&self, event: &OutboundEvent, ctx: &mut ws::WebsocketContext<Self>) {
        log::debug!("Egress {} {:?}", self.connection_id, event);
        match codec::encode(event) {
            Ok(text) => ctx.text(text),
            Err(err) => log::error!("Cannot encode event for {}: {}", self.connection_id, err),
        }
    }
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<ConnectionEvent>(CONNECTION_BUFFER);

        forward_lifecycle(
            &mut self.srv_tx,
            ConnectionCommand::Connect {
                from: self.connection_id,
                tx,
            },
        );

        let addr = ctx.address().recipient();
        let connection_id = self.connection_id;

        tokio::spawn(async move {
            log::debug!("connection {} forwarder - started", connection_id);
            while let Some(msg) = rx.recv().await {
                if addr.do_send(ConnectionActorMessage(msg)).is_err() {
                    break;
                }
            }
            log::debug!("connection {} forwarder - terminated", connection_id);
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        forward_lifecycle(
            &mut self.srv_tx,
            ConnectionCommand::Disconnect {
                from: self.connection_id,
            },
        );

        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => self.ingress(codec::decode_text(&text)),
            Ok(ws::Message::Binary(bin)) => self.ingress(codec::decode_binary(&bin)),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(err) => {
                log::warn!("Protocol error on {}: {}", self.connection_id, err);
                ctx.stop();
            }
            _ => (),
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        match msg.0 {
            ConnectionEvent::Connected => {
                log::info!("Connection {} accepted", self.connection_id);
                let greeting = OutboundEvent::Connected {
                    connection_id: self.connection_id,
                };
                self.egress(&greeting, ctx);
            }
            ConnectionEvent::Relay(event) => self.egress(&event, ctx),
        }
    }
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws::start(ConnectionActor::new(srv_tx.get_ref().clone()), &req, stream)
}
