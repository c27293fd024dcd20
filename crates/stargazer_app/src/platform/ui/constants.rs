pub const LOADING_TEXT: &str = "Loading the universe...";
pub const IDLE_TEXT: &str = "Nothing requested yet.";
pub const NO_NEO_TEXT: &str = "No near-Earth objects in this range.";
pub const NO_PHOTOS_TEXT: &str = "No photos for this date.";
pub const RULE: &str = "----------------------------------------";
