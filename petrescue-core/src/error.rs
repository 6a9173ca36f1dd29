use thiserror::Error;

/// Client-side validation failures. These are raised before any request
/// is built, so they never reach the network layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("a description is required")]
    EmptyDescription,

    #[error("an address is required")]
    EmptyAddress,

    #[error("a location is required")]
    MissingCoordinates,

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("latitude {0} must be between -90 and 90")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} must be between -180 and 180")]
    LongitudeOutOfRange(f64),

    #[error("unknown case status {0:?}")]
    UnknownStatus(String),

    #[error("nothing to update")]
    EmptyUpdate,
}
