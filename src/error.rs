use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid layout: container width={width}")]
    InvalidLayout { width: f64 },

    #[error("segment `{id}` has no points")]
    EmptySegment { id: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("dataset csv error: {0}")]
    Csv(String),

    #[error("invalid config: {0}")]
    Config(String),
}

impl From<csv::Error> for ChartError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value.to_string())
    }
}
