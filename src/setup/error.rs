use thiserror::Error;

pub type SetupResult<T> = Result<T, SetupError>;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Log system initialization failed: {0}")]
    Logging(String),
    #[error("Config loading failed: {0:#}")]
    Config(#[from] anyhow::Error),
    #[error("Invalid shortcut binding for {command}: {source}")]
    Shortcut {
        command: String,
        #[source]
        source: crate::shortcuts::ShortcutError,
    },
}
