//! Stargazer core: pure feed adapter state machine and display helpers.
mod auth;
mod effect;
mod msg;
mod neo;
mod params;
mod records;
mod state;
mod update;
mod view_model;

pub use auth::{Credentials, FormError, Registration, SignInForm, SignUpForm};
pub use effect::Effect;
pub use msg::Msg;
pub use neo::{cap_neo_feed, ReshapeError, NEO_RECORDS_PER_DATE};
pub use params::{
    format_iso_date, parse_iso_date, ApodQuery, FeedKind, FeedParams, FeedRequest, MarsDate,
    MarsPhotosQuery, NeoFeedQuery, ParamError,
};
pub use records::{
    mars_photos, neo_records, ApodEntry, CloseApproach, MarsPhoto, NeoRecord, NEO_DISPLAY_LIMIT,
};
pub use state::{FeedAdapter, FeedStatus, RequestTag};
pub use update::update;
pub use view_model::{FeedPhase, FeedView};
