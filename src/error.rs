use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Speech queue is full, utterance dropped")]
    SpeechBacklog,

    #[error("Speech worker is gone")]
    SpeechClosed,

    #[error("Synthesis Error: {0}")]
    Synthesis(String),

    #[error("Unknown direction label: {0:?}")]
    UnknownDirection(String),
}
