use crate::codec::EventRecord;
use crate::session::{SessionState, ThreadEntry};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single log event on the wire. `thread` and `ts` are string-encoded
/// integers per the addEvents contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub thread: String,
    pub ts: String,
    pub attrs: serde_json::Value,
}

/// One addEvents payload: a transient value constructed and consumed within
/// a single delivery attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AddEventsRequest {
    pub token: String,
    pub client_timestamp: String,
    pub session: String,
    pub events: Vec<Event>,
    pub threads: Vec<ThreadEntry>,
    #[serde(rename = "sessionInfo", skip_serializing_if = "Option::is_none")]
    pub session_info: Option<HashMap<String, String>>,
}

impl AddEventsRequest {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Builds the wire payload for one batch of records.
///
/// Records are processed in delivery order: each gets its tag registered and
/// its timestamp sequenced, so event timestamps are strictly increasing in
/// input order. The threads list snapshots the full registry, including tags
/// first seen in earlier batches of the same session. No record is dropped,
/// reordered, or validated.
pub fn assemble(
    records: Vec<EventRecord>,
    state: &mut SessionState,
    token: &str,
) -> AddEventsRequest {
    let mut events = Vec::with_capacity(records.len());

    for record in records {
        let thread = state.registry.id_for(&record.tag);
        let ts = state.sequencer.next(record.time);

        events.push(Event {
            thread: thread.to_string(),
            ts: ts.to_string(),
            attrs: record.record,
        });
    }

    let threads = state.registry.snapshot();
    let session_info = if state.session.metadata().is_empty() {
        None
    } else {
        Some(state.session.metadata().clone())
    };

    AddEventsRequest {
        token: token.to_string(),
        client_timestamp: Utc::now().timestamp_micros().to_string(),
        session: state.session.id().to_string(),
        events,
        threads,
        session_info,
    }
}
