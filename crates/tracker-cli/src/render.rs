//! Table rendering for snapshots and alerts

use chrono::{DateTime, Local, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use stock_tracker::{Alert, Recommendation, StockSnapshot};

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn format_change(change: f64) -> String {
    format!("${change:+.2}")
}

pub fn format_pct(pct: Option<f64>) -> String {
    pct.map_or_else(|| "-".to_string(), |pct| format!("{pct:+.2}%"))
}

fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

fn recommendation_cell(recommendation: Recommendation) -> Cell {
    let cell = Cell::new(recommendation);
    match recommendation {
        Recommendation::Buy => cell.fg(Color::Green),
        Recommendation::Sell => cell.fg(Color::Red),
        Recommendation::Hold | Recommendation::NotAvailable => cell,
    }
}

/// Watchlist table; `pending` lists tracked symbols still waiting for data
pub fn watchlist_table(snapshots: &[StockSnapshot], pending: &[String]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Symbol",
        "Current Price",
        "Change $",
        "Change %",
        "Recommendation",
        "Buy At",
        "Sell At",
        "Updated",
    ]);

    for snapshot in snapshots {
        table.add_row(vec![
            Cell::new(&snapshot.symbol),
            Cell::new(format_price(snapshot.current_price)),
            Cell::new(format_change(snapshot.change_amount)),
            Cell::new(format_pct(snapshot.change_pct)),
            recommendation_cell(snapshot.recommendation),
            Cell::new(format_change(snapshot.thresholds.buy)),
            Cell::new(format_change(snapshot.thresholds.sell)),
            Cell::new(format_time(snapshot.last_update)),
        ]);
    }

    for symbol in pending {
        table.add_row(vec![
            Cell::new(symbol),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new("-"),
            recommendation_cell(Recommendation::Hold),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new("waiting"),
        ]);
    }

    table
}

/// Price history of one symbol, oldest first
pub fn history_table(snapshot: &StockSnapshot) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Time", "Price", "vs Base"]);

    for point in &snapshot.history {
        table.add_row(vec![
            format_time(point.timestamp),
            format_price(point.price),
            format_change(point.price - snapshot.base_price),
        ]);
    }

    table
}

pub fn alerts_table(alerts: &[Alert]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Symbol", "Action", "Price", "Change $", "Change %"]);

    for alert in alerts {
        table.add_row(vec![
            Cell::new(&alert.symbol),
            recommendation_cell(alert.action),
            Cell::new(format_price(alert.price)),
            Cell::new(format_change(alert.change_amount)),
            Cell::new(format_pct(alert.change_pct)),
        ]);
    }

    table
}
