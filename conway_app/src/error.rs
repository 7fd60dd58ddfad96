// error.rs - Errors raised while starting the front end

use conway::LifeError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An environment override could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The engine rejected the configuration.
    #[error(transparent)]
    Life(#[from] LifeError),
}
