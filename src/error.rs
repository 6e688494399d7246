use axum::http::header::InvalidHeaderName;

/// Errors that can be returned while setting up the responder.
#[derive(Debug)]
pub enum Error {
    /// The service name cannot be used to build request header names.
    InvalidName(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidName(name) => {
                write!(f, "cannot build fault headers for service name {:?}", name)
            }
        }
    }
}

impl Error {
    pub(crate) fn invalid_name(name: &str) -> impl FnOnce(InvalidHeaderName) -> Self {
        let name = name.to_owned();
        move |_err| Error::InvalidName(name)
    }
}

impl std::error::Error for Error {}
