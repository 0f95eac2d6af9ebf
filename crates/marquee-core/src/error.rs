use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid display configuration: {0}")]
    InvalidConfig(String),

    #[error("Controller already stopped; construct a new one to restart")]
    ControllerStopped,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
