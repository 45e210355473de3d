use crate::{
    Clock, Connection, ConnectionId, Delivery, InboundEvent, LocalClock, MediaAction,
    OutboundEvent, RelayState, RoomId, RoomSnapshot, SYSTEM_USERNAME,
};
use serde_json::Value;
use std::collections::HashMap;

/// Who an outbound event is addressed to.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Myself,
    Peer(ConnectionId),
    RoomExceptSender(RoomId),
    Room(RoomId),
}

/// Applies inbound events to the relay state and computes the deliveries each
/// one produces. Every call runs to completion before the next, so no event
/// observes a half-applied mutation.
pub struct Router<C = LocalClock> {
    state: RelayState,
    clock: C,
}

impl Router<LocalClock> {
    pub fn new() -> Self {
        Self::with_state(RelayState::new(), LocalClock)
    }
}

impl Default for Router<LocalClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Router<C> {
    pub fn with_state(state: RelayState, clock: C) -> Self {
        Self { state, clock }
    }

    pub fn state(&self) -> &RelayState {
        &self.state
    }

    pub fn handle(&mut self, from: &ConnectionId, event: InboundEvent) -> Vec<Delivery> {
        let mut out = Vec::new();
        match event {
            InboundEvent::JoinRoom { room_id, username } => {
                self.join_room(from, room_id, username, &mut out)
            }
            InboundEvent::Action { action } => self.action(from, action, &mut out),
            InboundEvent::VideoOffer { offer, target_id } => {
                self.video_offer(from, offer, target_id, &mut out)
            }
            InboundEvent::VideoAnswer { answer, target_id } => self.emit(
                from,
                Target::Peer(target_id),
                OutboundEvent::VideoAnswer {
                    answer,
                    from: *from,
                },
                &mut out,
            ),
            InboundEvent::NewIceCandidate {
                candidate,
                target_id,
            } => self.emit(
                from,
                Target::Peer(target_id),
                OutboundEvent::NewIceCandidate {
                    candidate,
                    from: *from,
                },
                &mut out,
            ),
            InboundEvent::Message {
                text,
                username,
                room_id,
            } => {
                let timestamp = self.clock.timestamp();
                self.emit(
                    from,
                    Target::Room(room_id),
                    OutboundEvent::Message {
                        text,
                        username,
                        timestamp,
                    },
                    &mut out,
                )
            }
            InboundEvent::GetCanvas => {
                if let Some(payload) = self
                    .state
                    .connections
                    .room_of(from)
                    .and_then(|room_id| self.state.whiteboards.get(room_id))
                {
                    let event = OutboundEvent::GetCanvas {
                        payload: payload.to_owned(),
                    };
                    self.emit(from, Target::Myself, event, &mut out);
                }
            }
            InboundEvent::Draw(stroke) => {
                self.emit_to_room_of(from, OutboundEvent::Draw(stroke), &mut out)
            }
            InboundEvent::ClearBoard => {
                self.emit_to_room_of(from, OutboundEvent::ClearBoard, &mut out)
            }
            InboundEvent::StoreCanvas { payload } => {
                if let Some(room_id) = self.state.connections.room_of(from).cloned() {
                    log::debug!("Stored canvas of room {:?} ({} bytes)", room_id, payload.len());
                    self.state.whiteboards.set(room_id, payload);
                } else {
                    log::debug!("{} stored a canvas before joining a room", from);
                }
            }
        }
        out
    }

    /// Removes the connection from its room and the registry. A connection
    /// that never joined a room produces nothing.
    pub fn disconnect(&mut self, from: &ConnectionId) -> Vec<Delivery> {
        let mut out = Vec::new();
        if let Some(connection) = self.state.connections.remove(from) {
            self.leave_room(from, connection, &mut out);
        }
        out
    }

    fn join_room(
        &mut self,
        from: &ConnectionId,
        room_id: RoomId,
        username: String,
        out: &mut Vec<Delivery>,
    ) {
        if let Some(previous) = self.state.connections.remove(from) {
            self.leave_room(from, previous, out);
        }

        let outcome = self.state.rooms.join(&room_id, *from);
        self.state
            .connections
            .set_attributes(*from, username.clone(), room_id.clone());
        log::info!("{} ({}) joined room {:?}", from, username, room_id);

        if outcome.existed {
            let notice = self.system_message(format!("{} joined the room.", username));
            self.emit(from, Target::RoomExceptSender(room_id.clone()), notice, out);
            let snapshot = self.room_snapshot(outcome.existing_members);
            self.emit(from, Target::Myself, OutboundEvent::JoinRoom(snapshot), out);
        } else {
            self.emit(
                from,
                Target::Myself,
                OutboundEvent::JoinRoom(RoomSnapshot::empty()),
                out,
            );
        }

        let count = self.state.rooms.member_count(&room_id);
        self.emit(from, Target::Room(room_id), OutboundEvent::UserCount { count }, out);
    }

    fn leave_room(&mut self, from: &ConnectionId, connection: Connection, out: &mut Vec<Delivery>) {
        let room_id = connection.room_id;
        let notice = self.system_message(format!("{} left the chat.", connection.username));
        self.emit(from, Target::RoomExceptSender(room_id.clone()), notice, out);
        self.emit(
            from,
            Target::RoomExceptSender(room_id.clone()),
            OutboundEvent::RemovePeer { peer: *from },
            out,
        );
        self.state.rooms.leave(&room_id, from);
        log::info!("{} ({}) left room {:?}", from, connection.username, room_id);

        let count = self.state.rooms.member_count(&room_id);
        self.emit(from, Target::Room(room_id), OutboundEvent::UserCount { count }, out);
    }

    fn action(&mut self, from: &ConnectionId, action: MediaAction, out: &mut Vec<Delivery>) {
        let connections = &mut self.state.connections;
        let updated = match action {
            MediaAction::Mute => connections.update_mic(from, false),
            MediaAction::Unmute => connections.update_mic(from, true),
            MediaAction::VideoOn => connections.update_camera(from, true),
            MediaAction::VideoOff => connections.update_camera(from, false),
        };
        if updated.is_none() {
            log::debug!("{} sent {:?} outside of a room", from, action);
            return;
        }
        self.emit_to_room_of(from, OutboundEvent::Action { action, from: *from }, out);
    }

    fn video_offer(
        &mut self,
        from: &ConnectionId,
        offer: Value,
        target_id: ConnectionId,
        out: &mut Vec<Delivery>,
    ) {
        let (username, mic_on, camera_on) = match self.state.connections.get(from) {
            Some(c) => (c.username.clone(), c.mic_on, c.camera_on),
            None => (String::new(), true, true),
        };
        self.emit(
            from,
            Target::Peer(target_id),
            OutboundEvent::VideoOffer {
                offer,
                from: *from,
                username,
                mic_on,
                camera_on,
            },
            out,
        );
    }

    fn room_snapshot(&self, members: Vec<ConnectionId>) -> RoomSnapshot {
        let mut names = HashMap::new();
        let mut mics = HashMap::new();
        let mut cameras = HashMap::new();
        for member in &members {
            if let Some(c) = self.state.connections.get(member) {
                names.insert(*member, c.username.clone());
                mics.insert(*member, c.mic_on);
                cameras.insert(*member, c.camera_on);
            }
        }
        RoomSnapshot {
            members: Some(members),
            names: Some(names),
            mics: Some(mics),
            cameras: Some(cameras),
        }
    }

    fn system_message(&self, text: String) -> OutboundEvent {
        OutboundEvent::Message {
            text,
            username: SYSTEM_USERNAME.to_owned(),
            timestamp: self.clock.timestamp(),
        }
    }

    fn emit_to_room_of(&self, from: &ConnectionId, event: OutboundEvent, out: &mut Vec<Delivery>) {
        match self.state.connections.room_of(from) {
            Some(room_id) => {
                self.emit(from, Target::RoomExceptSender(room_id.clone()), event, out)
            }
            None => log::debug!("{} is not in a room, nothing to relay", from),
        }
    }

    fn emit(
        &self,
        from: &ConnectionId,
        target: Target,
        event: OutboundEvent,
        out: &mut Vec<Delivery>,
    ) {
        match target {
            Target::Myself => out.push(Delivery { to: *from, event }),
            // A peer never receives its own signaling back.
            Target::Peer(peer) if peer != *from => out.push(Delivery { to: peer, event }),
            Target::Peer(_) => {}
            Target::RoomExceptSender(room_id) => out.extend(
                self.state
                    .rooms
                    .members(&room_id)
                    .iter()
                    .filter(|m| *m != from)
                    .map(|m| Delivery {
                        to: *m,
                        event: event.clone(),
                    }),
            ),
            Target::Room(room_id) => out.extend(self.state.rooms.members(&room_id).iter().map(
                |m| Delivery {
                    to: *m,
                    event: event.clone(),
                },
            )),
        }
    }
}
