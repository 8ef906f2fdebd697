use thiserror::Error;

#[derive(Debug, Error)]
pub enum RsanError {
    #[error("The key file `{path}` does not hold a key pair: {reason}")]
    BadKeyFile { path: String, reason: String },

    #[error("The path {0} not exist")]
    PathNotExist(String),
}
