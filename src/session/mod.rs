pub mod registry;
pub mod sequencer;

pub use registry::{ThreadEntry, ThreadRegistry};
pub use sequencer::TimestampSequencer;

use std::collections::HashMap;
use uuid::Uuid;

/// Process-lifetime identity grouping every batch sent by one running
/// instance. The id is generated once at start and never changes.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    metadata: HashMap<String, String>,
}

impl Session {
    /// Creates a session with a fresh random id. Configured metadata is
    /// authoritative; when none is supplied the forwarder identifies itself
    /// with the local hostname.
    pub fn new(metadata: Option<HashMap<String, String>>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            metadata: metadata.unwrap_or_else(default_metadata),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }
}

fn default_metadata() -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    if let Ok(host) = hostname::get()
        && let Some(host) = host.to_str()
    {
        metadata.insert("serverHost".to_string(), host.to_string());
    }
    metadata
}

/// Mutable per-session state owned by the forwarding component: the session
/// identity, the tag-to-thread mapping, and the monotonic timestamp cell.
/// Callers must access it through a single mutual-exclusion boundary since
/// both the registry insertion and `last_emitted` update are
/// check-then-update sequences.
#[derive(Debug)]
pub struct SessionState {
    pub session: Session,
    pub registry: ThreadRegistry,
    pub sequencer: TimestampSequencer,
}

impl SessionState {
    pub fn new(source_label: &str, metadata: Option<HashMap<String, String>>) -> Self {
        Self {
            session: Session::new(metadata),
            registry: ThreadRegistry::new(source_label),
            sequencer: TimestampSequencer::new(),
        }
    }
}
