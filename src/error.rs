use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}, padding={padding}")]
    InvalidViewport { width: u32, height: u32, padding: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("visibility watcher unavailable: {0}")]
    WatcherUnavailable(String),
}
