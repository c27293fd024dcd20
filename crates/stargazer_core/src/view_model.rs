use serde_json::Value;

use crate::FeedKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Read-only `{data, loading, error}` record handed to the display surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedView {
    pub feed: FeedKind,
    pub phase: FeedPhase,
    pub loading: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
    pub dirty: bool,
}

impl FeedView {
    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, FeedPhase::Success | FeedPhase::Failed)
    }
}
