use thiserror::Error;

/// Why a candidate file was not accepted as the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("\"{name}\" is not an audio file (type: {media_type})")]
    NotAudio { name: String, media_type: String },
}

/// Failures reported by, or while creating, a waveform engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("waveform container is not mounted")]
    ContainerMissing,

    #[error("failed to create waveform engine: {0}")]
    Create(String),

    #[error("audio could not be decoded or played: {0}")]
    Playback(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid player config: {0}")]
    Parse(#[from] serde_json::Error),
}
