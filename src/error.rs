use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Failed to read {sensor}: {message}")]
    Device {
        sensor: &'static str,
        message: String,
    },
}

impl AcquisitionError {
    pub fn device(sensor: &'static str, e: anyhow::Error) -> Self {
        AcquisitionError::Device {
            sensor,
            message: format!("{e:#}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to reach light controller: {0}")]
    Transport(String),

    #[error("Light controller answered with status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Failed to parse light controller acknowledgement: {0}")]
    Acknowledgement(String),
}
