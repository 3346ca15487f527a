pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner
    }

    /// Short text suitable for the page's status line.
    ///
    /// A rejection carrying a server `detail` shows that detail, any other
    /// rejection shows `fallback`, and transport or decoding failures get a
    /// retry hint appended to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self.kind() {
            ErrorKind::RequestRejected {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            ErrorKind::RequestRejected { .. } => fallback.to_string(),
            ErrorKind::UnknownActivity(id) => format!("Unknown activity: {id}"),
            _ => format!("{fallback}. Please try again."),
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

#[cfg(feature = "no-wasm")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::new(ErrorKind::ReqwestError(e))
    }
}

#[cfg(feature = "wasm")]
impl From<gloo_net::Error> for Error {
    fn from(e: gloo_net::Error) -> Error {
        Error::new(ErrorKind::GlooNetError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::SerdeJsonError(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::new(ErrorKind::StdIoError(e))
    }
}

pub enum ErrorKind {
    #[cfg(feature = "no-wasm")]
    ReqwestError(reqwest::Error),
    #[cfg(feature = "wasm")]
    GlooNetError(gloo_net::Error),
    SerdeJsonError(serde_json::Error),
    StdIoError(std::io::Error),
    ParseError(String),
    ConfigError(String),
    TransportError(String),
    RequestRejected { status: u16, detail: Option<String> },
    UnknownActivity(String),
}

impl std::fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            #[cfg(feature = "no-wasm")]
            ErrorKind::ReqwestError(ref e) => write!(f, "ReqwestError: {e:?}"),
            #[cfg(feature = "wasm")]
            ErrorKind::GlooNetError(ref e) => write!(f, "GlooNetError: {e:?}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "SerdeJsonError: {e:?}"),
            ErrorKind::StdIoError(ref e) => write!(f, "StdIoError: {e:?}"),
            ErrorKind::ParseError(ref e) => write!(f, "ParseError: {e:?}"),
            ErrorKind::ConfigError(ref e) => write!(f, "ConfigError: {e:?}"),
            ErrorKind::TransportError(ref e) => write!(f, "TransportError: {e:?}"),
            ErrorKind::RequestRejected { status, ref detail } => {
                write!(f, "RequestRejected: status={status} detail={detail:?}")
            }
            ErrorKind::UnknownActivity(ref e) => write!(f, "UnknownActivity: {e:?}"),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            #[cfg(feature = "no-wasm")]
            ErrorKind::ReqwestError(ref e) => write!(f, "request failed: {e}"),
            #[cfg(feature = "wasm")]
            ErrorKind::GlooNetError(ref e) => write!(f, "request failed: {e}"),
            ErrorKind::SerdeJsonError(ref e) => write!(f, "invalid JSON: {e}"),
            ErrorKind::StdIoError(ref e) => write!(f, "io error: {e}"),
            ErrorKind::ParseError(ref e) => write!(f, "parse error: {e}"),
            ErrorKind::ConfigError(ref e) => write!(f, "config error: {e}"),
            ErrorKind::TransportError(ref e) => write!(f, "transport error: {e}"),
            ErrorKind::RequestRejected {
                status,
                detail: Some(ref detail),
            } => write!(f, "server rejected request ({status}): {detail}"),
            ErrorKind::RequestRejected { status, detail: None } => {
                write!(f, "server rejected request ({status})")
            }
            ErrorKind::UnknownActivity(ref e) => write!(f, "unknown activity: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err: Error = ErrorKind::RequestRejected {
            status: 400,
            detail: Some("Student already signed up".to_string()),
        }
        .into();

        assert_eq!(err.user_message("Failed to sign up"), "Student already signed up");
    }

    #[test]
    fn test_user_message_falls_back_without_detail() {
        let err: Error = ErrorKind::RequestRejected {
            status: 500,
            detail: None,
        }
        .into();

        assert_eq!(err.user_message("Failed to sign up"), "Failed to sign up");
    }

    #[test]
    fn test_user_message_for_transport_failure() {
        let err: Error = ErrorKind::TransportError("connection refused".to_string()).into();

        assert_eq!(
            err.user_message("Failed to sign up"),
            "Failed to sign up. Please try again."
        );
    }
}
