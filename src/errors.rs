use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("BSON decode: {0}")]
    Bson(#[from] bson::de::Error),

    #[error("BSON encode: {0}")]
    BsonSer(#[from] bson::ser::Error),
}

impl From<std::io::Error> for CrmError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl CrmError {
    pub fn record_not_found() -> Self {
        Self::NotFound("record".into())
    }

    pub fn user_not_found() -> Self {
        Self::NotFound("user".into())
    }
}
