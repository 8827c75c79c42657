use std::fmt;

use crate::error::{PlaybackError, SensorError};

/// The single user-facing status line shown above the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    Intro,
    Locating,
    LocationFound,
    GpsUnsupported,
    PermissionDenied,
    PositionUnavailable,
    SpeechUnsupported,
    NarrationFailed,
}

impl StatusMessage {
    pub fn text(&self) -> &'static str {
        match self {
            StatusMessage::Intro => {
                "GPS is used only to place a marker on the map; coordinates are never shown."
            }
            StatusMessage::Locating => "Locating…",
            StatusMessage::LocationFound => {
                "Location found. Your marker is placed on the map, but coordinates are not shown."
            }
            StatusMessage::GpsUnsupported => "GPS is not supported in this browser.",
            StatusMessage::PermissionDenied => {
                "Unable to get GPS position. Please check permissions."
            }
            StatusMessage::PositionUnavailable => {
                "Unable to get GPS position right now. Please try again in a moment."
            }
            StatusMessage::SpeechUnsupported => "Text-to-Speech is not supported in this browser.",
            StatusMessage::NarrationFailed => "Audio narration stopped unexpectedly.",
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<SensorError> for StatusMessage {
    fn from(e: SensorError) -> Self {
        match e {
            SensorError::Unsupported => StatusMessage::GpsUnsupported,
            SensorError::PermissionDenied => StatusMessage::PermissionDenied,
            SensorError::Unavailable | SensorError::Timeout => StatusMessage::PositionUnavailable,
        }
    }
}

impl From<&PlaybackError> for StatusMessage {
    fn from(e: &PlaybackError) -> Self {
        match e {
            PlaybackError::Unsupported => StatusMessage::SpeechUnsupported,
            PlaybackError::Failed(_) => StatusMessage::NarrationFailed,
        }
    }
}
