use crate::narration::SpeechCommand;
use crate::sampler::SensorCommand;
use crate::status::StatusMessage;
use crate::viewport::CameraCommand;

/// A side effect the host must carry out on behalf of the core.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Sensor(SensorCommand),
    Speech(SpeechCommand),
    Camera(CameraCommand),
    Status(StatusMessage),
}

impl From<SensorCommand> for Effect {
    fn from(c: SensorCommand) -> Self {
        Effect::Sensor(c)
    }
}

impl From<SpeechCommand> for Effect {
    fn from(c: SpeechCommand) -> Self {
        Effect::Speech(c)
    }
}

impl From<CameraCommand> for Effect {
    fn from(c: CameraCommand) -> Self {
        Effect::Camera(c)
    }
}

impl From<StatusMessage> for Effect {
    fn from(s: StatusMessage) -> Self {
        Effect::Status(s)
    }
}
