use thiserror::Error;

/// Rejected caller input. Checked before any price lookup runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("item list must contain at least one item")]
    EmptyItems,

    #[error("item at position {index} is blank")]
    BlankItem { index: usize },

    #[error("invalid coordinates ({lat}, {lng}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("invalid search radius {0}: must be a finite, non-negative number of miles")]
    InvalidRadius(f64),

    #[error("invalid price {0}: must be a finite, non-negative amount")]
    InvalidPrice(f64),

    #[error("{field} must be non-empty")]
    MissingField { field: &'static str },
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("failed to access price history at {path}: {source}")]
    HistoryIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse price history at {path}: {source}")]
    HistoryParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode price history: {0}")]
    HistoryEncode(#[source] serde_json::Error),
}
