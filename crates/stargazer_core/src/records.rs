//! Typed read-only views over feed payloads, for display.
//!
//! The adapters store upstream JSON as-is; these helpers pick out the fields a
//! display surface renders and skip entries that do not have them.

use serde::Deserialize;
use serde_json::Value;

/// Cards shown for a NEO feed across all dates.
pub const NEO_DISPLAY_LIMIT: usize = 10;

/// One Astronomy Picture of the Day entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApodEntry {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub explanation: String,
    pub url: String,
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl ApodEntry {
    pub fn from_value(value: &Value) -> Option<Self> {
        ApodEntry::deserialize(value).ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeoRecord {
    pub name: String,
    pub diameter_min_m: f64,
    pub diameter_max_m: f64,
    pub hazardous: bool,
    pub close_approaches: Vec<CloseApproach>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    pub date: String,
    /// Kilometres per hour as reported upstream (a decimal string).
    pub velocity_kph: String,
}

impl NeoRecord {
    pub fn from_value(value: &Value) -> Option<Self> {
        let raw = RawNeo::deserialize(value).ok()?;
        Some(Self {
            name: raw.name,
            diameter_min_m: raw.estimated_diameter.meters.estimated_diameter_min,
            diameter_max_m: raw.estimated_diameter.meters.estimated_diameter_max,
            hazardous: raw.is_potentially_hazardous_asteroid,
            close_approaches: raw
                .close_approach_data
                .into_iter()
                .map(|approach| CloseApproach {
                    date: approach.close_approach_date,
                    velocity_kph: approach.relative_velocity.kilometers_per_hour,
                })
                .collect(),
        })
    }

    pub fn hazard_label(&self) -> &'static str {
        if self.hazardous {
            "Potentially Hazardous"
        } else {
            "Safe Trajectory"
        }
    }
}

/// Flattens a NEO feed's date map into at most `limit` records.
///
/// Dates are visited in key order of the payload map.
pub fn neo_records(feed: &Value, limit: usize) -> Vec<NeoRecord> {
    let Some(by_date) = feed.get("near_earth_objects").and_then(Value::as_object) else {
        return Vec::new();
    };
    by_date
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(NeoRecord::from_value)
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarsPhoto {
    pub id: u64,
    pub sol: u32,
    pub earth_date: String,
    pub img_src: String,
    pub camera: String,
    pub camera_full_name: String,
    pub rover: String,
}

/// Extracts the `photos` array of a rover photo page.
pub fn mars_photos(page: &Value) -> Vec<MarsPhoto> {
    let Some(photos) = page.get("photos").and_then(Value::as_array) else {
        return Vec::new();
    };
    photos
        .iter()
        .filter_map(|photo| RawPhoto::deserialize(photo).ok())
        .map(|raw| MarsPhoto {
            id: raw.id,
            sol: raw.sol,
            earth_date: raw.earth_date,
            img_src: raw.img_src,
            camera: raw.camera.name,
            camera_full_name: raw.camera.full_name,
            rover: raw.rover.name,
        })
        .collect()
}

#[derive(Deserialize)]
struct RawNeo {
    name: String,
    estimated_diameter: RawDiameters,
    #[serde(default)]
    is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    close_approach_data: Vec<RawApproach>,
}

#[derive(Deserialize)]
struct RawDiameters {
    meters: RawDiameterRange,
}

#[derive(Deserialize)]
struct RawDiameterRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

#[derive(Deserialize)]
struct RawApproach {
    close_approach_date: String,
    relative_velocity: RawVelocity,
}

#[derive(Deserialize)]
struct RawVelocity {
    kilometers_per_hour: String,
}

#[derive(Deserialize)]
struct RawPhoto {
    id: u64,
    sol: u32,
    earth_date: String,
    img_src: String,
    camera: RawCamera,
    rover: RawRover,
}

#[derive(Deserialize)]
struct RawCamera {
    name: String,
    #[serde(default)]
    full_name: String,
}

#[derive(Deserialize)]
struct RawRover {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn neo(name: &str, hazardous: bool) -> Value {
        json!({
            "name": name,
            "estimated_diameter": {
                "meters": { "estimated_diameter_min": 12.5, "estimated_diameter_max": 27.95 }
            },
            "is_potentially_hazardous_asteroid": hazardous,
            "close_approach_data": [{
                "close_approach_date": "2024-01-01",
                "relative_velocity": { "kilometers_per_hour": "45210.3" }
            }]
        })
    }

    #[test]
    fn neo_record_reads_display_fields() {
        let record = NeoRecord::from_value(&neo("(2024 AB)", true)).unwrap();
        assert_eq!(record.name, "(2024 AB)");
        assert_eq!(record.diameter_min_m, 12.5);
        assert_eq!(record.diameter_max_m, 27.95);
        assert_eq!(record.hazard_label(), "Potentially Hazardous");
        assert_eq!(record.close_approaches[0].velocity_kph, "45210.3");
    }

    #[test]
    fn neo_records_flatten_and_limit() {
        let feed = json!({
            "near_earth_objects": {
                "2024-01-01": [neo("a", false), { "broken": true }],
                "2024-01-02": [neo("b", false), neo("c", true)]
            }
        });
        let names: Vec<_> = neo_records(&feed, 2).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn apod_requires_title_and_url() {
        let entry = ApodEntry::from_value(&json!({
            "title": "Orion",
            "url": "https://apod.nasa.gov/x.jpg",
            "explanation": "Nebula."
        }))
        .unwrap();
        assert_eq!(entry.title, "Orion");
        assert_eq!(entry.date, None);
        assert!(ApodEntry::from_value(&json!({ "title": "no url" })).is_none());
    }

    #[test]
    fn mars_photos_read_camera_and_rover() {
        let page = json!({
            "photos": [{
                "id": 102693,
                "sol": 1000,
                "earth_date": "2015-05-30",
                "img_src": "http://mars.jpl.nasa.gov/a.JPG",
                "camera": { "name": "FHAZ", "full_name": "Front Hazard Avoidance Camera" },
                "rover": { "name": "Curiosity" }
            }]
        });
        let photos = mars_photos(&page);
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].camera, "FHAZ");
        assert_eq!(photos[0].rover, "Curiosity");
        assert!(mars_photos(&json!({})).is_empty());
    }
}
