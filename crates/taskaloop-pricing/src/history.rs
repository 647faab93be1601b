//! Timestamped price observations per item and store.
//!
//! Observations are kept ordered by `observed_at` (insertion order among
//! equal timestamps) and persisted as pretty-printed JSON.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::error::{PricingError, ValidationError};

/// Relative change below which a trend counts as stable.
const STABLE_BAND: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub id: Uuid,
    /// Lowercased item name.
    pub item: String,
    pub store_id: String,
    pub price: f64,
    pub unit: String,
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Rising,
    Falling,
    Stable,
    /// Not enough observations on both sides of the window.
    Insufficient,
}

impl std::fmt::Display for PriceTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTrend::Rising => write!(f, "rising"),
            PriceTrend::Falling => write!(f, "falling"),
            PriceTrend::Stable => write!(f, "stable"),
            PriceTrend::Insufficient => write!(f, "insufficient data"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    observations: Vec<PriceObservation>,
}

impl PriceHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load history from `path`. A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::HistoryIo`] if the file exists but cannot be
    /// read, or [`PricingError::HistoryParse`] if it is not valid history JSON.
    pub fn load(path: &Path) -> Result<Self, PricingError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no price history file, starting empty");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(PricingError::HistoryIo {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        let mut history: Self =
            serde_json::from_str(&content).map_err(|e| PricingError::HistoryParse {
                path: path.display().to_string(),
                source: e,
            })?;
        history.observations.sort_by_key(|o| o.observed_at);

        Ok(history)
    }

    /// Write history to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::HistoryEncode`] if serialization fails or
    /// [`PricingError::HistoryIo`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PricingError> {
        let io_err = |e: std::io::Error| PricingError::HistoryIo {
            path: path.display().to_string(),
            source: e,
        };

        let json = serde_json::to_string_pretty(self).map_err(PricingError::HistoryEncode)?;

        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };

        // Written beside the target, then renamed over it.
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;

        tracing::debug!(
            path = %path.display(),
            observations = self.observations.len(),
            "saved price history"
        );
        Ok(())
    }

    /// Record one observation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank item, store id or unit, or a
    /// negative/non-finite price.
    pub fn record(
        &mut self,
        item: &str,
        store_id: &str,
        price: f64,
        unit: &str,
        observed_at: DateTime<Utc>,
    ) -> Result<&PriceObservation, ValidationError> {
        if item.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "item" });
        }
        if store_id.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "store_id" });
        }
        if unit.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "unit" });
        }
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(price));
        }

        let observation = PriceObservation {
            id: Uuid::new_v4(),
            item: item.trim().to_lowercase(),
            store_id: store_id.trim().to_string(),
            price,
            unit: unit.trim().to_string(),
            observed_at,
        };

        let at = self
            .observations
            .partition_point(|o| o.observed_at <= observed_at);
        self.observations.insert(at, observation);

        tracing::debug!(item, store_id, price, "recorded price observation");

        Ok(&self.observations[at])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations for `item` (case-insensitive), oldest first.
    pub fn observations_for<'a>(
        &'a self,
        item: &str,
    ) -> impl Iterator<Item = &'a PriceObservation> + 'a {
        let key = item.trim().to_lowercase();
        self.observations.iter().filter(move |o| o.item == key)
    }

    /// Cheapest observation for `item`; the earliest one wins ties.
    #[must_use]
    pub fn lowest_price(&self, item: &str) -> Option<&PriceObservation> {
        let mut lowest: Option<&PriceObservation> = None;
        for observation in self.observations_for(item) {
            if lowest.is_none_or(|l| observation.price < l.price) {
                lowest = Some(observation);
            }
        }
        lowest
    }

    /// Direction of `item`'s price: mean of observations newer than
    /// `now - window` against the mean of everything older.
    ///
    /// A window reaching past the earliest representable time leaves nothing
    /// older, so the trend is [`PriceTrend::Insufficient`].
    #[must_use]
    pub fn trend(&self, item: &str, window: Duration, now: DateTime<Utc>) -> PriceTrend {
        let cutoff = now.checked_sub_signed(window);
        let (recent, older): (Vec<&PriceObservation>, Vec<&PriceObservation>) = self
            .observations_for(item)
            .partition(|o| cutoff.is_none_or(|cutoff| o.observed_at > cutoff));

        let (Some(recent_avg), Some(older_avg)) = (mean_price(&recent), mean_price(&older)) else {
            return PriceTrend::Insufficient;
        };

        if older_avg <= 0.0 {
            return if recent_avg > 0.0 {
                PriceTrend::Rising
            } else {
                PriceTrend::Stable
            };
        }

        let change = (recent_avg - older_avg) / older_avg;
        if change > STABLE_BAND {
            PriceTrend::Rising
        } else if change < -STABLE_BAND {
            PriceTrend::Falling
        } else {
            PriceTrend::Stable
        }
    }
}

fn mean_price(observations: &[&PriceObservation]) -> Option<f64> {
    if observations.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = observations.len() as f64;
    Some(observations.iter().map(|o| o.price).sum::<f64>() / count)
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
