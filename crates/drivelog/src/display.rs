//! Display and formatting utilities
//!
//! Terminal output for days, reports, and settings. Everything renders to a
//! `String` so only `main` ever prints.

use crate::engine::{AggregateMetrics, DerivedMetrics};
use crate::report::Report;
use crate::settings::ConfigView;
use chrono::NaiveDate;
use drivelog_core::format::{hours, km, liters, money};

/// ANSI color codes (only used when terminal supports it)
pub struct Colors {
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Colors {
    /// Get colors for terminal output
    pub fn new(color_enabled: bool) -> Self {
        if color_enabled {
            Self {
                red: "\x1b[0;31m",
                green: "\x1b[0;32m",
                yellow: "\x1b[0;33m",
                cyan: "\x1b[0;36m",
                bold: "\x1b[1m",
                dim: "\x1b[2m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                red: "",
                green: "",
                yellow: "",
                cyan: "",
                bold: "",
                dim: "",
                reset: "",
            }
        }
    }

    /// Check if stdout is a TTY (terminal)
    pub fn is_tty() -> bool {
        atty_check()
    }

    /// Get colors based on TTY detection
    pub fn auto() -> Self {
        Self::new(Self::is_tty())
    }

    /// Green for profit, red for loss
    pub fn for_amount(&self, value: f64) -> &'static str {
        if value < 0.0 {
            self.red
        } else {
            self.green
        }
    }
}

/// Check if stdout is a TTY
fn atty_check() -> bool {
    // Simple check using libc on unix
    #[cfg(unix)]
    unsafe {
        libc::isatty(libc::STDOUT_FILENO) != 0
    }

    #[cfg(not(unix))]
    true
}

/// Draw a simple bar chart
pub fn draw_bar(value: f64, max: f64, width: usize) -> String {
    let max = if max <= 0.0 { 1.0 } else { max };
    let filled = ((value.max(0.0) / max) * width as f64).round() as usize;
    let filled = filled.min(width);
    let empty = width - filled;

    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(empty))
}

/// Format a section header
pub fn section_header(title: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.cyan, title, colors.reset)
}

/// Format a bold title
pub fn title(text: &str, colors: &Colors) -> String {
    format!("{}{}{}", colors.bold, text, colors.reset)
}

/// "Sat 2025-01-11"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %Y-%m-%d").to_string()
}

/// Summary of a single day
pub fn render_day(
    date: NaiveDate,
    distance_km: f64,
    gross_revenue: f64,
    hours_worked: f64,
    metrics: &DerivedMetrics,
    colors: &Colors,
) -> String {
    let mut out = String::new();
    out.push_str(&title(&format!("Day {}", format_date(date)), colors));
    out.push_str("\n\n");
    out.push_str(&section_header("Totals", colors));
    out.push('\n');
    out.push_str(&format!("  Distance:       {}\n", km(distance_km)));
    out.push_str(&format!("  Gross revenue:  {}\n", money(gross_revenue)));
    out.push_str(&format!("  Hours worked:   {}\n\n", hours(hours_worked)));
    out.push_str(&section_header("Performance", colors));
    out.push('\n');
    out.push_str(&format!("  Per km:         {}\n", money(metrics.revenue_per_km)));
    out.push_str(&format!("  Per hour:       {}\n", money(metrics.revenue_per_hour)));
    out.push_str(&format!(
        "  Fuel estimate:  {} {}({}){}\n\n",
        money(metrics.estimated_fuel_cost),
        colors.dim,
        liters(metrics.liters_consumed),
        colors.reset
    ));
    out.push_str(&format!(
        "{}Net profit: {}{}{}\n",
        colors.bold,
        colors.for_amount(metrics.net_profit),
        money(metrics.net_profit),
        colors.reset
    ));
    out
}

/// Daily table followed by totals
pub fn render_report(report: &Report, colors: &Colors) -> String {
    let mut out = title("Full Report", colors);
    out.push_str("\n\n");

    let Some(overall) = &report.overall else {
        out.push_str("No days logged yet. Start with 'drivelog log'.\n");
        return out;
    };

    out.push_str(&format!(
        "{}{:<12} {:>8} {:>12} {:>10} {:>12} {:>6}  {}{}\n",
        colors.dim, "Date", "Km", "Revenue", "Fuel", "Net", "Hours", "", colors.reset
    ));
    let max_profit = report
        .daily
        .iter()
        .map(|row| row.net_profit)
        .fold(0.0_f64, f64::max);
    for row in &report.daily {
        out.push_str(&format!(
            "{:<12} {:>8.0} {:>12.2} {:>10.2} {}{:>12.2}{} {:>6.1}  {}\n",
            row.date.to_string(),
            row.distance_km,
            row.gross_revenue,
            row.estimated_fuel_cost,
            colors.for_amount(row.net_profit),
            row.net_profit,
            colors.reset,
            row.hours_worked,
            draw_bar(row.net_profit, max_profit, 20),
        ));
    }
    out.push('\n');
    out.push_str(&render_totals(overall, colors));
    out
}

fn render_totals(overall: &AggregateMetrics, colors: &Colors) -> String {
    let mut out = section_header("Totals", colors);
    out.push('\n');
    out.push_str(&format!("  Days logged:     {}\n", overall.day_count));
    out.push_str(&format!("  Distance:        {}\n", km(overall.total_km)));
    out.push_str(&format!("  Gross revenue:   {}\n", money(overall.total_revenue)));
    out.push_str(&format!("  Hours worked:    {}\n", hours(overall.total_hours)));
    out.push_str(&format!(
        "  Fuel estimate:   {}\n",
        money(overall.total_estimated_fuel_cost)
    ));
    out.push_str(&format!("  Fixed costs:     {}\n", money(overall.total_fixed_cost)));
    out.push_str(&format!(
        "  {}Net profit:      {}{}{}\n\n",
        colors.bold,
        colors.for_amount(overall.total_net_profit),
        money(overall.total_net_profit),
        colors.reset
    ));
    out.push_str(&section_header("Averages", colors));
    out.push('\n');
    out.push_str(&format!("  Km per day:      {}\n", km(overall.avg_km_per_day)));
    out.push_str(&format!("  Revenue / km:    {}\n", money(overall.avg_revenue_per_km)));
    out.push_str(&format!(
        "  Revenue / hour:  {}\n",
        money(overall.avg_revenue_per_hour)
    ));
    out
}

/// Current cost settings
pub fn render_config(view: &ConfigView, colors: &Colors) -> String {
    let mut out = title("Cost Settings", colors);
    out.push_str("\n\n");
    out.push_str(&section_header("Fuel", colors));
    out.push('\n');
    out.push_str(&format!("  Type:         {}\n", view.fuel_type));
    if view.fuel_type.is_electric() {
        out.push_str(&format!(
            "  {}No fuel cost for electric vehicles{}\n",
            colors.dim, colors.reset
        ));
    } else {
        out.push_str(&format!(
            "  Consumption:  {:.2} km/L\n",
            view.fuel_consumption_km_per_liter
        ));
        out.push_str(&format!("  Price:        {} / L\n", money(view.fuel_price_per_liter)));
    }
    out.push('\n');
    out.push_str(&section_header("Fixed costs", colors));
    out.push('\n');
    out.push_str(&format!("  Weekly:       {}\n", money(view.weekly_fixed_cost)));
    out.push_str(&format!("  Daily:        {}\n", money(view.daily_fixed_cost)));
    out
}

/// How to measure average consumption
pub const CONSUMPTION_HELP: &str = "\
If you don't know your vehicle's average consumption (km/L):
  1. Write down the current odometer reading.
  2. Fill the tank COMPLETELY.
  3. Reset the trip meter and drive until the next fill-up.
  4. Note how many liters it takes to fill the tank COMPLETELY again.
  5. Divide: km driven / liters filled = km/L.
Example: 350 km / 35 L = 10 km/L.";
