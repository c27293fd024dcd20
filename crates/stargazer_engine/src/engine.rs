use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use stargazer_core::{FeedKind, FeedRequest, RequestTag};
use stargazer_logging::sg_debug;

use crate::{EngineEvent, Gateway};

enum EngineCommand {
    Fetch {
        feed: FeedKind,
        tag: RequestTag,
        request: FeedRequest,
    },
}

/// Runs gateway calls on a background Tokio runtime and reports resolutions.
///
/// Every enqueued request runs as its own task; resolutions arrive in
/// completion order, not submission order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(gateway: Arc<dyn Gateway>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("stargazer-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let gateway = gateway.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(gateway.as_ref(), command, event_tx).await;
                });
            }
            sg_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn enqueue(&self, feed: FeedKind, tag: RequestTag, request: FeedRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Fetch { feed, tag, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    gateway: &dyn Gateway,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { feed, tag, request } => {
            let result = gateway.fetch(&request).await;
            let _ = event_tx.send(EngineEvent::FeedResolved { feed, tag, result });
        }
    }
}
