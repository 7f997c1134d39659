//! Plain-text rendering of the dashboard view.

use std::fmt::Write;

use forecast_core::{BodyView, CardView, DashboardView, IconCategory, view::ResultsView};

const BAR_WIDTH: usize = 20;

/// Header, search line and body.
pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}", view.subtitle);
    let _ = writeln!(out, "{}", "─".repeat(view.subtitle.chars().count()));

    let text = if view.search.text.is_empty() {
        view.search.placeholder
    } else {
        view.search.text.as_str()
    };
    let button = if view.search.button_enabled {
        format!("[{}]", view.search.button_label)
    } else {
        format!("({})", view.search.button_label)
    };
    let _ = writeln!(out, "📍 {text}  {button}");
    let _ = writeln!(out);

    out.push_str(&body(&view.body));
    out
}

pub fn body(body: &BodyView) -> String {
    match body {
        BodyView::Empty => String::new(),
        BodyView::Loading => "⏳ Loading forecast...\n\n".to_string(),
        BodyView::Error { message } => format!("⚠ {message}\n\n"),
        BodyView::Results(results) => results_block(results),
    }
}

fn results_block(results: &ResultsView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📍 {}", results.location_name);
    let _ = writeln!(out, "   {}", results.coordinates);
    let _ = writeln!(out);

    for card in &results.cards {
        out.push_str(&card_block(card));
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Additional Information");
    let _ = writeln!(out, "  Data Source:  {}", results.data_source);
    let _ = writeln!(out, "  Last Updated: {}", results.last_updated);
    out
}

fn card_block(card: &CardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", icon_glyph(card.icon), card.label.primary);
    if let Some(date) = &card.label.secondary {
        let _ = writeln!(out, "  {date}");
    }
    let _ = writeln!(
        out,
        "  {}° / {}°  {} {}",
        card.temperature_max,
        card.temperature_min,
        temperature_bar(card.bar_fill_percent),
        card.temperature_band.as_str(),
    );
    let _ = writeln!(
        out,
        "  Humidity {}%  Wind {} m/s  Visibility {} km  UV Index {}",
        card.humidity_pct, card.wind_speed_mps, card.visibility_km, card.uv_index,
    );

    let _ = write!(out, "  Rain: {}%", card.precipitation_probability_pct);
    if let Some(amount) = &card.rain_accumulation {
        let _ = write!(out, "  💧 {amount}");
    }
    out.push('\n');
    out
}

fn icon_glyph(icon: IconCategory) -> &'static str {
    match icon {
        IconCategory::PrecipitationHeavy => "☂",
        IconCategory::Rain => "🌧",
        IconCategory::Cloud => "☁",
        IconCategory::Snow => "❄",
        IconCategory::Clear => "☀",
    }
}

fn temperature_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
