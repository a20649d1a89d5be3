#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownCurrencyCode,
    MalformedRateResponse,
    IndexOutOfRange,
    RefreshFailed,
    Config,
    Command,
    Io,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new<T: Into<String>>(kind: ErrorKind, message: T) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn new_unknown_currency<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorKind::UnknownCurrencyCode, message)
    }

    pub fn new_malformed<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorKind::MalformedRateResponse, message)
    }

    pub fn new_out_of_range<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorKind::IndexOutOfRange, message)
    }

    pub fn new_refresh<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorKind::RefreshFailed, message)
    }

    pub fn new_config<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn new_command<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorKind::Command, message)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnknownCurrencyCode => write!(f, "unknown currency code"),
            ErrorKind::MalformedRateResponse => write!(f, "malformed rate response"),
            ErrorKind::IndexOutOfRange => write!(f, "index out of range"),
            ErrorKind::RefreshFailed => write!(f, "refresh failed"),
            ErrorKind::Config => write!(f, "configuration"),
            ErrorKind::Command => write!(f, "invalid command"),
            ErrorKind::Io => write!(f, "io"),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io, error.to_string())
    }
}
