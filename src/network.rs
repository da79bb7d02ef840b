use log::debug;

use crate::event::NetworkEvent;


pub fn serialize_event(event: &NetworkEvent) -> serde_json::Result<String> {
    serde_json::to_string(event)
}

// Anything that is not a well-formed event is dropped.
pub fn parse_event(raw: &str) -> Option<NetworkEvent> {
    match serde_json::from_str(raw) {
        Ok(event) => Some(event),
        Err(err) => {
            debug!("Ignoring malformed network event {:?}: {}", raw, err);
            None
        }
    }
}

// Outbound half of the sync channel.
pub trait SyncClient {
    fn send(&mut self, event: &NetworkEvent);
}

// There is no transport yet: online mode produces events that go nowhere.
pub struct NoopClient;

impl SyncClient for NoopClient {
    fn send(&mut self, _event: &NetworkEvent) {}
}
