use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// The upstream feeds a display surface can bind an adapter to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedKind {
    Apod,
    NeoFeed,
    MarsPhotos,
}

impl FeedKind {
    /// Message stored when a failure carries no text of its own.
    pub fn fallback_error(self) -> &'static str {
        match self {
            FeedKind::Apod => "Failed to fetch APOD data.",
            FeedKind::NeoFeed => "Failed to fetch NEO feed data.",
            FeedKind::MarsPhotos => "Failed to fetch Mars rover photos.",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Apod => write!(f, "apod"),
            FeedKind::NeoFeed => write!(f, "neo-feed"),
            FeedKind::MarsPhotos => write!(f, "mars-photos"),
        }
    }
}

/// Raw inputs collected by a display surface, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedParams {
    Apod {
        date: Option<String>,
    },
    NeoFeed {
        start_date: String,
        end_date: String,
    },
    MarsPhotos {
        sol: Option<u32>,
        earth_date: Option<String>,
        page: Option<u32>,
    },
}

impl FeedParams {
    pub fn kind(&self) -> FeedKind {
        match self {
            FeedParams::Apod { .. } => FeedKind::Apod,
            FeedParams::NeoFeed { .. } => FeedKind::NeoFeed,
            FeedParams::MarsPhotos { .. } => FeedKind::MarsPhotos,
        }
    }

    /// Turns raw inputs into a request that can be sent as-is.
    pub fn validate(&self) -> Result<FeedRequest, ParamError> {
        match self {
            FeedParams::Apod { date } => {
                let date = match non_blank(date.as_deref()) {
                    Some(raw) => Some(parse_iso_date("date", raw)?),
                    None => None,
                };
                Ok(FeedRequest::Apod(ApodQuery { date }))
            }
            FeedParams::NeoFeed {
                start_date,
                end_date,
            } => {
                let (Some(start), Some(end)) =
                    (non_blank(Some(start_date.as_str())), non_blank(Some(end_date.as_str())))
                else {
                    return Err(ParamError::MissingDateRange);
                };
                Ok(FeedRequest::NeoFeed(NeoFeedQuery {
                    start_date: parse_iso_date("start_date", start)?,
                    end_date: parse_iso_date("end_date", end)?,
                }))
            }
            FeedParams::MarsPhotos {
                sol,
                earth_date,
                page,
            } => {
                let selector = match (sol, non_blank(earth_date.as_deref())) {
                    (Some(sol), None) => MarsDate::Sol(*sol),
                    (None, Some(raw)) => MarsDate::EarthDate(parse_iso_date("earth_date", raw)?),
                    (Some(_), Some(_)) => return Err(ParamError::AmbiguousMarsDate),
                    (None, None) => return Err(ParamError::MissingMarsDate),
                };
                if *page == Some(0) {
                    return Err(ParamError::InvalidPage);
                }
                Ok(FeedRequest::MarsPhotos(MarsPhotosQuery {
                    selector,
                    page: *page,
                }))
            }
        }
    }
}

/// A validated, immutable parameter bundle for one outbound query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedRequest {
    Apod(ApodQuery),
    NeoFeed(NeoFeedQuery),
    MarsPhotos(MarsPhotosQuery),
}

impl FeedRequest {
    pub fn kind(&self) -> FeedKind {
        match self {
            FeedRequest::Apod(_) => FeedKind::Apod,
            FeedRequest::NeoFeed(_) => FeedKind::NeoFeed,
            FeedRequest::MarsPhotos(_) => FeedKind::MarsPhotos,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApodQuery {
    /// `None` lets the upstream default to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeoFeedQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarsDate {
    Sol(u32),
    EarthDate(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarsPhotosQuery {
    pub selector: MarsDate,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("missing required date range")]
    MissingDateRange,
    #[error("invalid {field} {value:?}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("either sol or earth_date is required")]
    MissingMarsDate,
    #[error("sol and earth_date are mutually exclusive")]
    AmbiguousMarsDate,
    #[error("page numbers start at 1")]
    InvalidPage,
    #[error("parameters for {got} cannot drive a {expected} adapter")]
    WrongFeed { expected: FeedKind, got: FeedKind },
}

/// Formats a date the way every NASA endpoint expects it.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses a strict, zero-padded `YYYY-MM-DD` date.
pub fn parse_iso_date(field: &'static str, raw: &str) -> Result<NaiveDate, ParamError> {
    let invalid = || ParamError::InvalidDate {
        field,
        value: raw.to_string(),
    };
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT).map_err(|_| invalid())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
