use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use colored::*;
use log::debug;
use serde::{Deserialize, Serialize};

/// File name of the persisted calculation history inside the history directory
const CALC_HISTORY_FILE: &str = "calc_history.json";

/// The calculation history keeps at most this many entries, newest first
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Per-guest-hour price in roubles; unknown activities fall back to 500
fn price_per_guest(activity: &str) -> u64 {
    match activity {
        "vr" => 300,
        "batuts" => 500,
        "nerf" => 700,
        "birthday" => 1000,
        "events" => 800,
        _ => 500,
    }
}

/// Russian display name of an activity; unknown keys are shown verbatim
pub fn activity_name(activity: &str) -> &str {
    match activity {
        "vr" => "VR-зоны",
        "batuts" => "Батутный центр",
        "nerf" => "Нерф-арена",
        "birthday" => "День рождения",
        "events" => "Мероприятия",
        _ => activity,
    }
}

/// Result of a price calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub price_per_guest: u64,
    pub total: u64,
}

/// Compute a price quote: `total = guests × hours × price_per_guest`
pub fn calculate_price(guests: u32, hours: u32, activity: &str) -> PriceQuote {
    let price_per_guest = price_per_guest(activity);
    let total = u64::from(guests) * u64::from(hours) * price_per_guest;

    PriceQuote {
        price_per_guest,
        total,
    }
}

/// One persisted price-quote result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationEntry {
    pub guests: u32,
    pub hours: u32,
    pub activity: String,
    pub total: u64,
    pub timestamp: DateTime<Utc>,
}

/// Path of the calculation history file inside the history directory
pub fn calc_history_path(history_dir: &Path) -> PathBuf {
    history_dir.join(CALC_HISTORY_FILE)
}

/// The price calculator panel: a visibility toggle plus the capped,
/// newest-first calculation history.
#[derive(Debug, Default)]
pub struct PriceCalculator {
    visible: bool,
    history: Vec<CalculationEntry>,
}

impl PriceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip panel visibility; returns the new state. No other side effect.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Newest-first calculation history
    pub fn history(&self) -> &[CalculationEntry] {
        &self.history
    }

    /// Validate the inputs and compute a quote.
    ///
    /// A zero guest or hour count is a silent no-op, mirroring the form's
    /// behavior of doing nothing on falsy numeric input.
    pub fn submit(&mut self, guests: u32, hours: u32, activity: &str) -> Option<PriceQuote> {
        if guests == 0 || hours == 0 {
            return None;
        }

        let quote = calculate_price(guests, hours, activity);
        self.history.insert(
            0,
            CalculationEntry {
                guests,
                hours,
                activity: activity.to_string(),
                total: quote.total,
                timestamp: Utc::now(),
            },
        );
        self.history.truncate(MAX_HISTORY_ENTRIES);

        Some(quote)
    }

    /// Load the history from the history directory; missing or corrupt
    /// files read as empty.
    pub fn load(history_dir: &Path) -> Self {
        let path = calc_history_path(history_dir);

        let history = match fs::read_to_string(&path) {
            Ok(json_str) => match serde_json::from_str::<Vec<CalculationEntry>>(&json_str) {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!(
                        "{}: {}",
                        "Warning: Failed to parse calculation history".yellow(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(_) => {
                debug!("No calculation history file at {}", path.display());
                Vec::new()
            }
        };

        Self {
            visible: false,
            history,
        }
    }

    /// Save the history to the history directory
    pub fn save(&self, history_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(history_dir)?;
        let path = calc_history_path(history_dir);
        let json_str = serde_json::to_string_pretty(&self.history)?;
        fs::write(&path, json_str)?;
        debug!("Saved calculation history to {}", path.display());
        Ok(())
    }
}
