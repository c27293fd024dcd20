use serde_json::Value;
use stargazer_logging::{sg_debug, sg_info, sg_warn};

use crate::neo::{cap_neo_feed, NEO_RECORDS_PER_DATE};
use crate::view_model::{FeedPhase, FeedView};
use crate::{FeedKind, FeedRequest};

/// Identifies one in-flight request of one adapter.
pub type RequestTag = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Success(Value),
    Failed(String),
}

/// Request lifecycle of one feed, owned by the display surface showing it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedAdapter {
    kind: FeedKind,
    status: FeedStatus,
    current: Option<FeedRequest>,
    in_flight: Option<RequestTag>,
    next_tag: RequestTag,
    dirty: bool,
}

impl FeedAdapter {
    pub fn new(kind: FeedKind) -> Self {
        Self {
            kind,
            status: FeedStatus::Idle,
            current: None,
            in_flight: None,
            next_tag: 1,
            dirty: false,
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    pub fn current_request(&self) -> Option<&FeedRequest> {
        self.current.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestTag> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FeedStatus::Loading)
    }

    pub fn view(&self) -> FeedView {
        let (phase, data, error) = match &self.status {
            FeedStatus::Idle => (FeedPhase::Idle, None, None),
            FeedStatus::Loading => (FeedPhase::Loading, None, None),
            FeedStatus::Success(data) => (FeedPhase::Success, Some(data.clone()), None),
            FeedStatus::Failed(message) => (FeedPhase::Failed, None, Some(message.clone())),
        };
        FeedView {
            feed: self.kind,
            phase,
            loading: phase == FeedPhase::Loading,
            data,
            error,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Starts a new cycle for `request` and returns its tag.
    pub(crate) fn begin(&mut self, request: FeedRequest) -> RequestTag {
        let tag = self.next_tag;
        self.next_tag += 1;
        if let Some(previous) = self.in_flight.replace(tag) {
            sg_debug!("{} request {} superseded by {}", self.kind, previous, tag);
        }
        sg_info!("{} request {} loading {:?}", self.kind, tag, request);
        self.current = Some(request);
        self.status = FeedStatus::Loading;
        self.dirty = true;
        tag
    }

    /// Fails the adapter without a request; orphans any call still in flight.
    pub(crate) fn reject(&mut self, message: String) {
        sg_warn!("{} parameters rejected: {}", self.kind, message);
        self.current = None;
        self.in_flight = None;
        self.status = FeedStatus::Failed(message);
        self.dirty = true;
    }

    /// Applies a resolution; returns false when `tag` is stale and was ignored.
    pub(crate) fn resolve(&mut self, tag: RequestTag, result: Result<Value, String>) -> bool {
        if self.in_flight != Some(tag) {
            sg_debug!(
                "{} discarding stale result for request {} (current {:?})",
                self.kind,
                tag,
                self.in_flight
            );
            return false;
        }
        self.in_flight = None;
        self.status = match result.and_then(|payload| self.reshape(payload)) {
            Ok(payload) => {
                sg_info!("{} request {} succeeded", self.kind, tag);
                FeedStatus::Success(payload)
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    self.kind.fallback_error().to_string()
                } else {
                    message
                };
                sg_warn!("{} request {} failed: {}", self.kind, tag, message);
                FeedStatus::Failed(message)
            }
        };
        self.dirty = true;
        true
    }

    fn reshape(&self, payload: Value) -> Result<Value, String> {
        match self.kind {
            FeedKind::NeoFeed => {
                cap_neo_feed(payload, NEO_RECORDS_PER_DATE).map_err(|err| err.to_string())
            }
            FeedKind::Apod | FeedKind::MarsPhotos => Ok(payload),
        }
    }
}
