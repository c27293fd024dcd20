use std::fmt::Write as _;

use serde_json::Value;
use stargazer_core::{
    mars_photos, neo_records, ApodEntry, FeedKind, FeedPhase, FeedView, NEO_DISPLAY_LIMIT,
};

use super::constants::*;

/// Text for one feed panel. With `json` set, a successful payload is printed
/// as pretty JSON instead of cards.
pub fn render(view: &FeedView, json: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", heading(view.feed));

    match view.phase {
        FeedPhase::Idle => push_line(&mut out, IDLE_TEXT),
        FeedPhase::Loading => push_line(&mut out, LOADING_TEXT),
        FeedPhase::Failed => {
            let message = view.error.as_deref().unwrap_or(view.feed.fallback_error());
            let _ = writeln!(out, "Error: {message}");
        }
        FeedPhase::Success => match &view.data {
            Some(data) if json => {
                let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
                push_line(&mut out, &pretty);
            }
            Some(data) => match view.feed {
                FeedKind::Apod => render_apod(&mut out, data),
                FeedKind::NeoFeed => render_neo(&mut out, data),
                FeedKind::MarsPhotos => render_mars(&mut out, data),
            },
            None => push_line(&mut out, IDLE_TEXT),
        },
    }
    out
}

fn heading(feed: FeedKind) -> &'static str {
    match feed {
        FeedKind::Apod => "Astronomy Picture of the Day",
        FeedKind::NeoFeed => "Near-Earth Objects",
        FeedKind::MarsPhotos => "Mars Rover Photos",
    }
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn render_apod(out: &mut String, data: &Value) {
    let Some(entry) = ApodEntry::from_value(data) else {
        push_line(out, "Picture of the day is unavailable.");
        return;
    };
    push_line(out, &entry.title);
    if let Some(date) = &entry.date {
        push_line(out, date);
    }
    let _ = writeln!(out, "Image: {}", entry.url);
    if let Some(hd) = &entry.hdurl {
        let _ = writeln!(out, "HD: {hd}");
    }
    if let Some(credit) = &entry.copyright {
        let _ = writeln!(out, "Credit: {}", credit.trim());
    }
    if !entry.explanation.is_empty() {
        out.push('\n');
        push_line(out, &entry.explanation);
    }
}

fn render_neo(out: &mut String, data: &Value) {
    let records = neo_records(data, NEO_DISPLAY_LIMIT);
    if records.is_empty() {
        push_line(out, NO_NEO_TEXT);
        return;
    }
    for (index, neo) in records.iter().enumerate() {
        if index > 0 {
            push_line(out, RULE);
        }
        push_line(out, &neo.name);
        let _ = writeln!(
            out,
            "Diameter: {:.2}m - {:.2}m",
            neo.diameter_min_m, neo.diameter_max_m
        );
        push_line(out, neo.hazard_label());
        if let Some(approach) = neo.close_approaches.first() {
            let _ = writeln!(out, "Close Approach: {}", approach.date);
            let _ = writeln!(out, "Velocity: {} km/h", approach.velocity_kph);
        }
    }
}

fn render_mars(out: &mut String, data: &Value) {
    let photos = mars_photos(data);
    if photos.is_empty() {
        push_line(out, NO_PHOTOS_TEXT);
        return;
    }
    for photo in &photos {
        let _ = writeln!(
            out,
            "#{} {} sol {} ({}) {}: {}",
            photo.id, photo.rover, photo.sol, photo.earth_date, photo.camera, photo.img_src
        );
    }
}
