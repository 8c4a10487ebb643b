use super::analysis::{self, OiSummary, TrapAlert};
use super::nse_client::FetchOutcome;
use super::strategy::{self, Strategy};
use crate::utility::Timer;
use chrono::{DateTime, Local};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load option chain data.";
pub const NO_TRAPS_MESSAGE: &str = "No major trap signals detected.";

/// Everything shown for a successfully loaded option chain
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub spot_price: f64,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub traps: Vec<TrapAlert>,
    pub strategy: Strategy,
    pub suggestion: String,
    pub oi_summary: OiSummary,
    pub timestamp: Option<String>,
    pub from_cache: bool,
    pub generated_at: DateTime<Local>,
}

/// Rendered result of one cycle
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Loaded(Dashboard),
    Failed {
        message: String,
        error: Option<String>,
    },
}

impl Report {
    /// Analyse a fetch outcome; empty data skips analysis entirely
    pub fn build(outcome: FetchOutcome) -> Self {
        let FetchOutcome { snapshot, error, from_cache } = outcome;

        if snapshot.is_empty() {
            return Report::Failed {
                message: LOAD_FAILED_MESSAGE.to_string(),
                error,
            };
        }

        let result = Timer::measure("analyze option chain", || {
            analysis::analyze(&snapshot.rows, snapshot.spot_price)
        });
        let strategy =
            strategy::suggest_strategy(snapshot.spot_price, result.support, result.resistance);

        Report::Loaded(Dashboard {
            spot_price: snapshot.spot_price,
            support: result.support,
            resistance: result.resistance,
            traps: result.traps,
            suggestion: strategy.to_string(),
            strategy,
            oi_summary: analysis::summarize_open_interest(&snapshot.rows),
            timestamp: snapshot.timestamp,
            from_cache,
            generated_at: Local::now(),
        })
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Report::Loaded(_))
    }
}

/// Strike level for display, `N/A` when absent
pub fn format_level(level: Option<f64>) -> String {
    level.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn format_pcr(pcr: Option<f64>) -> String {
    pcr.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", v))
}

// -----------------------------------------------
// TERMINAL OUTPUT
// -----------------------------------------------

pub fn print_report(report: &Report) {
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Nifty Option Trap Detector".green().bold());
    println!("{}", "=".repeat(60).blue());

    match report {
        Report::Failed { message, error } => {
            if let Some(error) = error {
                println!("{} {}", "✗".red(), error.red());
            }
            println!("{} {}", "✗".red(), message.red().bold());
        }
        Report::Loaded(dash) => {
            println!("{} Nifty Spot Price: {}", "→".cyan(), dash.spot_price.to_string().yellow());
            if let Some(ts) = &dash.timestamp {
                println!("{} NSE timestamp: {}", "ℹ".blue(), ts);
            }
            if dash.from_cache {
                println!("{} Served from cache", "ℹ".blue());
            }
            println!(
                "{} Support (Max Put OI): {}",
                "▼".green(),
                format_level(dash.support).green().bold()
            );
            println!(
                "{} Resistance (Max Call OI): {}",
                "▲".red(),
                format_level(dash.resistance).red().bold()
            );
            println!(
                "{} Total CE OI: {:.0} | Total PE OI: {:.0} | PCR: {}",
                "ℹ".blue(),
                dash.oi_summary.total_call_oi,
                dash.oi_summary.total_put_oi,
                format_pcr(dash.oi_summary.pcr)
            );
            println!();

            println!("{}", "Trap Alerts".cyan().bold());
            if dash.traps.is_empty() {
                println!("  {} {}", "✓".green(), NO_TRAPS_MESSAGE);
            } else {
                for trap in &dash.traps {
                    println!("  {} {}", "⚠".yellow(), trap.to_string().yellow());
                }
            }
            println!();

            println!("{}", "Strategy Suggestion".cyan().bold());
            println!("  {}", dash.suggestion.bold());
        }
    }

    println!("{}", "=".repeat(60).blue());
}

// -----------------------------------------------
// HTML OUTPUT
// -----------------------------------------------

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strategy line with the `**bold**` markers turned into `<strong>`
fn suggestion_html(suggestion: &str) -> String {
    let escaped = escape_html(suggestion);
    let mut out = String::with_capacity(escaped.len());
    for (i, part) in escaped.split("**").enumerate() {
        if i % 2 == 1 {
            let _ = write!(out, "<strong>{}</strong>", part);
        } else {
            out.push_str(part);
        }
    }
    out
}

pub fn render_html(report: &Report) -> String {
    let mut body = String::new();

    match report {
        Report::Failed { message, error } => {
            if let Some(error) = error {
                let _ = write!(body, r#"<div class="error">{}</div>"#, escape_html(error));
            }
            let _ = write!(body, r#"<div class="error"><strong>{}</strong></div>"#, escape_html(message));
        }
        Report::Loaded(dash) => {
            let _ = write!(body, "<h2>Nifty Spot Price: {}</h2>", dash.spot_price);
            if let Some(ts) = &dash.timestamp {
                let _ = write!(body, r#"<p class="muted">NSE timestamp: {}</p>"#, escape_html(ts));
            }
            let _ = write!(
                body,
                "<p><strong>Support (Max Put OI):</strong> {}</p>\
                 <p><strong>Resistance (Max Call OI):</strong> {}</p>\
                 <p>Total CE OI: {:.0} | Total PE OI: {:.0} | PCR: {}</p>",
                format_level(dash.support),
                format_level(dash.resistance),
                dash.oi_summary.total_call_oi,
                dash.oi_summary.total_put_oi,
                format_pcr(dash.oi_summary.pcr),
            );

            body.push_str("<hr><h3>Trap Alerts</h3>");
            if dash.traps.is_empty() {
                let _ = write!(body, r#"<div class="success">{}</div>"#, NO_TRAPS_MESSAGE);
            } else {
                for trap in &dash.traps {
                    let _ = write!(body, r#"<div class="warning">{}</div>"#, escape_html(&trap.description));
                }
            }

            let _ = write!(
                body,
                r#"<hr><h3>Strategy Suggestion</h3><div class="info">{}</div>"#,
                suggestion_html(&dash.suggestion)
            );
            let _ = write!(
                body,
                r#"<p class="muted">Generated {}{}</p>"#,
                dash.generated_at.format("%d-%b-%Y %H:%M:%S"),
                if dash.from_cache { " (cached)" } else { "" }
            );
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Nifty Option Trap Detector</title>
<style>
body {{ font-family: sans-serif; max-width: 960px; margin: 2rem auto; }}
.warning {{ background: #fff4e5; padding: .5rem; margin: .25rem 0; }}
.success {{ background: #e8f5e9; padding: .5rem; }}
.info {{ background: #e3f2fd; padding: .5rem; }}
.error {{ background: #fdecea; padding: .5rem; margin: .25rem 0; }}
.muted {{ color: #777; font-size: .85rem; }}
</style>
</head>
<body>
<h1>Nifty Option Trap Detector</h1>
<p>Intraday trap detection and strategy suggestions for NIFTY options.</p>
{}
</body>
</html>
"#,
        body
    )
}
