use crate::forecast::error::ForecastError;
use crate::records::error::RecordStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimaError {
    #[error(transparent)]
    RecordStore(#[from] RecordStoreError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}
