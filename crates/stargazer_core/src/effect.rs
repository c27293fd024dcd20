#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch {
        feed: crate::FeedKind,
        tag: crate::RequestTag,
        request: crate::FeedRequest,
    },
}
