pub extern crate serde;
pub extern crate serde_json;
pub extern crate uuid;

mod connection_registry;
mod message;
mod relay_state;
mod room_table;
mod router;
mod traits;
mod types;
mod whiteboard;

pub use connection_registry::*;
pub use message::*;
pub use relay_state::*;
pub use room_table::*;
pub use router::*;
pub use traits::*;
pub use types::*;
pub use whiteboard::*;
