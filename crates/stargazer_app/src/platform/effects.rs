use std::io;
use std::sync::Arc;
use std::time::Duration;

use stargazer_core::{Effect, FeedKind, Msg};
use stargazer_engine::{EngineEvent, EngineHandle, Gateway};
use stargazer_logging::{sg_info, sg_warn};

/// Hands core effects to the engine and turns its events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(gateway: Arc<dyn Gateway>) -> io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::new(gateway)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { feed, tag, request } => {
                    sg_info!("Fetch feed={} tag={} request={:?}", feed, tag, request);
                    self.engine.enqueue(feed, tag, request);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next resolved request.
    pub fn poll(&self, timeout: Duration) -> Option<(FeedKind, Msg)> {
        let event = self.engine.recv_timeout(timeout)?;
        Some(map_event(event))
    }
}

fn map_event(event: EngineEvent) -> (FeedKind, Msg) {
    match event {
        EngineEvent::FeedResolved { feed, tag, result } => {
            let result = result.map_err(|err| {
                sg_warn!("Feed {} tag {} failed ({}): {}", feed, tag, err.kind, err);
                err.message
            });
            (feed, Msg::Resolved { tag, result })
        }
    }
}
