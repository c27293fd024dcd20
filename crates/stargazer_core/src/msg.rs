use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The display surface's inputs for this feed changed.
    ParamsChanged(crate::FeedParams),
    /// User asked to retry the current request.
    Reload,
    /// The engine finished the request tagged `tag`.
    Resolved {
        tag: crate::RequestTag,
        result: Result<Value, String>,
    },
}
