//! Login scenarios demo
//!
//! Trains an engine on synthetic history, scores three logins and prints
//! an admin monitoring table.
//!
//! Run with `cargo run --example login_scenarios`. Set `RUST_LOG=debug` to
//! see per-attempt factor breakdowns.

use loginrisk_sdk::{RiskEngineBuilder, RiskResult, SyntheticHistoryProvider};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

const PRINCIPAL: &str = "user_123";
const RULE_WIDTH: usize = 85;

const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const GREEN: &str = "\x1b[92m";
const RESET: &str = "\x1b[0m";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let provider = SyntheticHistoryProvider::new();
    let engine = RiskEngineBuilder::new()
        .with_history_provider(&provider, PRINCIPAL)
        .build()?;

    println!("--- DEMO STARTING ---\n");

    let logins = [
        // Usual context
        json!({
            "user_id": PRINCIPAL,
            "hour_of_day": 14,
            "location": "Delhi",
            "device": "Chrome",
            "ip": "192.168.1.5",
            "failed_attempts_last_5min": 0
        }),
        // New country, new browser, middle of the night
        json!({
            "user_id": PRINCIPAL,
            "hour_of_day": 3,
            "location": "Moscow",
            "device": "Tor Browser",
            "ip": "45.12.19.99",
            "failed_attempts_last_5min": 0
        }),
        // Brute force from a familiar context
        json!({
            "user_id": PRINCIPAL,
            "hour_of_day": 14,
            "location": "Delhi",
            "device": "Chrome",
            "ip": "192.168.1.5",
            "failed_attempts_last_5min": 15
        }),
    ];

    let mut feed = Vec::with_capacity(logins.len());
    for login in &logins {
        let result = engine.calculate_risk(login)?;
        println!(
            "{:<12} score={:>5.1} action={}",
            text(login, "location"),
            result.risk_score,
            result.action.label()
        );
        feed.push((login, result));
    }

    print_dashboard(&feed);
    Ok(())
}

fn text<'a>(login: &'a Value, field: &str) -> &'a str {
    login.get(field).and_then(Value::as_str).unwrap_or("N/A")
}

fn color_for(score: f64) -> &'static str {
    if score > 70.0 {
        RED
    } else if score > 30.0 {
        YELLOW
    } else {
        GREEN
    }
}

fn print_dashboard(feed: &[(&Value, RiskResult)]) {
    let times = ["10:05:01", "10:05:45", "10:06:12"];

    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!(" {:^80}", "ADMIN THREAT MONITORING - LIVE FEED");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "{:<10} | {:<10} | {:<15} | {:<10} | {:<12} | {:<5} | {:<10}",
        "TIME", "USER", "IP ADDR", "LOC", "DEVICE", "RISK", "ACTION"
    );
    println!("{}", "-".repeat(RULE_WIDTH));

    for (i, (login, result)) in feed.iter().enumerate() {
        let color = color_for(result.risk_score);
        let device: String = text(login, "device").chars().take(12).collect();
        println!(
            "{:<10} | {:<10} | {:<15} | {:<10} | {:<12} | {color}{:<5}{RESET} | {color}{:<10}{RESET}",
            times.get(i).copied().unwrap_or("--:--:--"),
            text(login, "user_id"),
            text(login, "ip"),
            text(login, "location"),
            device,
            result.risk_score,
            result.action.as_str(),
        );
    }

    println!("{}", "=".repeat(RULE_WIDTH));
}
