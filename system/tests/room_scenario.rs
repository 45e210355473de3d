use relay_system::{
    new_connection_id, Clock, ConnectionId, Delivery, InboundEvent, MediaAction, OutboundEvent,
    RelayState, Router,
};

struct Noon;

impl Clock for Noon {
    fn timestamp(&self) -> String {
        "12:00 pm".into()
    }
}

fn events_for(deliveries: &[Delivery], to: &ConnectionId) -> Vec<OutboundEvent> {
    deliveries
        .iter()
        .filter(|d| d.to == *to)
        .map(|d| d.event.clone())
        .collect()
}

fn system_message(text: &str) -> OutboundEvent {
    OutboundEvent::Message {
        text: text.into(),
        username: "System".into(),
        timestamp: "12:00 pm".into(),
    }
}

#[test]
fn it_relays_a_two_member_session() {
    let mut router = Router::with_state(RelayState::new(), Noon);
    let a = new_connection_id();
    let b = new_connection_id();

    let out = router.handle(
        &a,
        InboundEvent::JoinRoom {
            room_id: "r1".into(),
            username: "A".into(),
        },
    );
    assert_eq!(router.state().rooms.member_count(&"r1".into()), 1);
    assert_eq!(
        events_for(&out, &a).last(),
        Some(&OutboundEvent::UserCount { count: 1 })
    );

    let out = router.handle(
        &b,
        InboundEvent::JoinRoom {
            room_id: "r1".into(),
            username: "B".into(),
        },
    );
    assert_eq!(
        events_for(&out, &a),
        vec![
            system_message("B joined the room."),
            OutboundEvent::UserCount { count: 2 },
        ]
    );
    match events_for(&out, &b).as_slice() {
        [OutboundEvent::JoinRoom(snapshot), OutboundEvent::UserCount { count: 2 }] => {
            assert_eq!(snapshot.members, Some(vec![a]));
        }
        other => panic!("unexpected events for B: {:?}", other),
    }

    let out = router.handle(
        &b,
        InboundEvent::Action {
            action: MediaAction::Mute,
        },
    );
    assert_eq!(
        out,
        vec![Delivery {
            to: a,
            event: OutboundEvent::Action {
                action: MediaAction::Mute,
                from: b,
            },
        }]
    );
    assert_eq!(
        router.state().connections.get(&b).map(|c| c.mic_on),
        Some(false)
    );

    let out = router.disconnect(&b);
    assert_eq!(
        events_for(&out, &a),
        vec![
            system_message("B left the chat."),
            OutboundEvent::RemovePeer { peer: b },
            OutboundEvent::UserCount { count: 1 },
        ]
    );
    assert!(events_for(&out, &b).is_empty());
    assert_eq!(router.state().rooms.member_count(&"r1".into()), 1);
}

#[test]
fn it_decodes_and_routes_wire_frames() {
    let mut router = Router::with_state(RelayState::new(), Noon);
    let a = new_connection_id();
    let b = new_connection_id();
    for (id, name) in &[(a, "A"), (b, "B")] {
        let frame = format!(
            r#"{{"event":"join room","data":{{"room_id":"r1","username":"{}"}}}}"#,
            name
        );
        let event: InboundEvent = serde_json::from_str(&frame).expect("");
        router.handle(id, event);
    }

    let frame = r##"{"event":"draw","data":{"new_x":1.0,"new_y":2.0,"prev_x":0.0,"prev_y":0.5,"color":"#000","size":4.0}}"##;
    let event: InboundEvent = serde_json::from_str(frame).expect("");
    let out = router.handle(&a, event);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].to, b);
    let value = serde_json::to_value(&out[0].event).expect("");
    assert_eq!(value["event"], "draw");
    assert_eq!(value["data"]["color"], "#000");
}
