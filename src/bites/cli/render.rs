//! Terminal output for command results.
//!
//! Everything here writes to stdout; errors and logs go to stderr
//! elsewhere.

use bites::commands::{CmdMessage, MapLink, MapView, MessageLevel, RestaurantDetail};
use bites::config::{BitesConfig, KEYS};
use bites::places::{PlaceDetails, Prediction};
use bites::selector::ListedRecord;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const RATING_WIDTH: usize = 7;
const TIME_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[ListedRecord]) {
    if records.is_empty() {
        println!("No restaurants yet. Add one with `bites add` or try `bites seed`.");
        return;
    }
    for line in format_record_lines(records) {
        println!("{}", line);
    }
}

fn format_record_lines(records: &[ListedRecord]) -> Vec<String> {
    records
        .iter()
        .map(|listed| {
            let idx = format!("{:>3}. ", listed.position);
            let rating = format!("{:<width$}", stars(listed.record.rating), width = RATING_WIDTH);
            let added = listed
                .record
                .added_at()
                .map(format_time_ago)
                .unwrap_or_default();
            let added = format!("{:>width$}", added, width = TIME_WIDTH);

            let fixed = idx.width() + RATING_WIDTH + 1 + TIME_WIDTH;
            let available = LINE_WIDTH.saturating_sub(fixed);
            let name = truncate_to_width(&listed.record.name, available);
            let padding = available.saturating_sub(name.width());

            format!(
                "{}{} {}{}{}",
                idx.yellow(),
                rating.bright_yellow(),
                name,
                " ".repeat(padding),
                added.dimmed()
            )
        })
        .collect()
}

pub(super) fn print_detail(detail: &RestaurantDetail) {
    let record = &detail.listed.record;
    let style = console::Style::new().bold();
    println!("{} {}", format!("{}.", detail.listed.position).yellow(), style.apply_to(&record.name));
    println!("{}", "--------------------------------".dimmed());
    println!("Rating:   {} ({})", stars(record.rating).bright_yellow(), record.rating);
    println!(
        "Contact:  {}",
        detail.contact.as_deref().unwrap_or("No contact information")
    );
    println!(
        "Address:  {}",
        detail.address.as_deref().unwrap_or("No address information")
    );
    println!("Location: {}", record.coordinates());
    if let Some(added) = record.added_at() {
        println!("Added:    {}", added.format("%Y-%m-%d %H:%M"));
    }
    println!("Id:       {}", record.id.dimmed());
    println!("Map:      {}", record.map_link());
    if detail.refreshed {
        println!("{}", "(contact and address refreshed from the places service)".dimmed());
    }
}

pub(super) fn print_predictions(predictions: &[Prediction]) {
    if predictions.is_empty() {
        println!("No suggestions.");
        return;
    }
    for (i, p) in predictions.iter().enumerate() {
        println!("{} {}", format!("{:>3}.", i + 1).yellow(), p.description);
    }
}

pub(super) fn print_place(prediction: Option<&Prediction>, place: &PlaceDetails) {
    if let Some(p) = prediction {
        println!("{}", p.description.bold());
        println!("Place id: {}", p.place_id.dimmed());
    }
    println!("Location: {}", place.coordinates());
    println!(
        "Contact:  {}",
        place.phone_number.as_deref().unwrap_or("No contact information")
    );
    println!(
        "Address:  {}",
        place.formatted_address.as_deref().unwrap_or("No address information")
    );
}

pub(super) fn print_map(map: &MapView) {
    match &map.focus {
        Some(focus) => println!("Centred on {} ({})", focus.label.bold(), focus.coordinates),
        None => println!("Centred on {}", map.center),
    }
    if map.markers.is_empty() {
        println!("No restaurants to mark.");
        return;
    }
    println!();
    for marker in &map.markers {
        let idx = format!("{:>3}. ", marker.position);
        let name = truncate_to_width(&marker.record.name, 36);
        let padding = 36usize.saturating_sub(name.width());
        println!(
            "{}{}{} {}",
            idx.yellow(),
            name,
            " ".repeat(padding),
            marker.record.coordinates().to_string().dimmed()
        );
    }
}

pub(super) fn print_links(links: &[MapLink]) {
    if links.is_empty() {
        println!("No restaurants yet.");
        return;
    }
    for link in links {
        println!("{}  {}", link.label.bold(), link.url);
    }
}

pub(super) fn print_config(config: &BitesConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn stars(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bites::model::{Coordinates, RestaurantRecord};

    #[test]
    fn stars_clamp_out_of_range_ratings() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(stars(-2), "☆☆☆☆☆");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("寿司寿司寿司", 5), "寿司…");
    }

    #[test]
    fn record_lines_fit_the_line() {
        colored::control::set_override(false);
        let listed = vec![ListedRecord {
            position: 1,
            record: RestaurantRecord::new(
                "1",
                "A very long restaurant name that goes on and on and on and on and on and on",
                4,
                Coordinates::new(0.0, 0.0),
            ),
        }];
        let lines = format_record_lines(&listed);
        assert_eq!(lines[0].width(), LINE_WIDTH);
        assert!(lines[0].starts_with("  1. ★★★★☆"));
    }
}
