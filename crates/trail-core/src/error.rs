use thiserror::Error;

/// Failures reported by the device position sensor.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SensorError {
    #[error("position sensing is not supported")]
    Unsupported,
    #[error("permission to read the position was denied")]
    PermissionDenied,
    #[error("position is currently unavailable")]
    Unavailable,
    #[error("position request timed out")]
    Timeout,
}

impl SensorError {
    /// Map a browser `GeolocationPositionError.code` onto the sensor taxonomy.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => SensorError::PermissionDenied,
            3 => SensorError::Timeout,
            _ => SensorError::Unavailable,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("speech synthesis is not supported")]
    Unsupported,
    #[error("speech playback failed: {0}")]
    Failed(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("polygon `{name}` has {count} vertices, at least 3 are required")]
    TooFewVertices { name: &'static str, count: usize },
    #[error("duplicate point id `{0}`")]
    DuplicateId(&'static str),
    #[error("point `{0}` has a non-finite coordinate")]
    NonFiniteCoordinate(&'static str),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TrailError {
    #[error(transparent)]
    Sensor(#[from] SensorError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
