use std::fmt;

/// Failure while bringing up the native window or its GL context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The platform event loop could not be created.
    Init(String),

    /// Window, GL config, context or surface creation failed.
    Creation(String),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Init(msg) => write!(f, "failed to initialize windowing: {msg}"),
            WindowError::Creation(msg) => write!(f, "failed to create window: {msg}"),
        }
    }
}

impl std::error::Error for WindowError {}
