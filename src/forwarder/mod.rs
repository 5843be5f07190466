use crate::app::config::Config;
use crate::batch;
use crate::codec::EventRecord;
use crate::sender::{DeliveryError, DeliveryResult, Sender};
use crate::session::SessionState;
use parking_lot::Mutex;
use tracing::info;

/// Owns the per-session mutable state and the delivery client; the host
/// pipeline invokes `forward` once per flushed batch.
///
/// The config validator limits the host to one in-flight batch, but the
/// session state still sits behind one mutex: registry insertion and the
/// `last_emitted` update are check-then-update sequences and must stay
/// atomic if a future host drives this concurrently.
#[derive(Debug)]
pub struct EventForwarder {
    state: Mutex<SessionState>,
    sender: Sender,
    token: String,
}

impl EventForwarder {
    pub fn from_config(config: &Config) -> Result<Self, DeliveryError> {
        let sender = Sender::new(config.sender_config())?;
        let state = SessionState::new(&config.source_label, config.session_metadata.clone());

        info!(
            session = %state.session.id(),
            endpoint = %config.endpoint,
            "forwarding session established"
        );

        Ok(Self {
            state: Mutex::new(state),
            sender,
            token: config.api_write_token.clone(),
        })
    }

    /// Assembles and delivers one batch. No retry: a transport failure
    /// surfaces to the caller, whose buffering contract re-presents the same
    /// records later.
    pub async fn forward(
        &self,
        records: Vec<EventRecord>,
    ) -> Result<DeliveryResult, DeliveryError> {
        let request = {
            let mut state = self.state.lock();
            batch::assemble(records, &mut state, &self.token)
        };

        self.sender.send(&request).await
    }

    pub fn session_id(&self) -> String {
        self.state.lock().session.id().to_string()
    }
}
