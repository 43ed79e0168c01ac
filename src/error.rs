use std::fmt;

/// Stable numeric error identifiers. The discriminant values are part of the
/// contract: callers embedding this crate behind an FFI boundary may need to
/// forward the raw code, so these must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum ErrorCode {
    AllocationFailure = 1,
    OversizedData = 2,
    BadDataPiecesLen = 3,
    BadPrecomputed = 4,
    InvalidLen = 5,
}

impl ErrorCode {
    pub fn as_u64(self) -> u64 {
        self as u64
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::AllocationFailure => "AllocationFailure",
            ErrorCode::OversizedData => "OversizedData",
            ErrorCode::BadDataPiecesLen => "BadDataPiecesLen",
            ErrorCode::BadPrecomputed => "BadPrecomputed",
            ErrorCode::InvalidLen => "InvalidLen",
        };
        write!(f, "{}", name)
    }
}

/// The error type returned by every fallible operation in this crate.
///
/// `code()` exposes the stable identifier from the public error table;
/// `message` carries a human-readable detail that is free to change between
/// versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegoError {
    code: ErrorCode,
    message: String,
}

impl StegoError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        StegoError {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.code.as_u64(), self.message)
    }
}

impl std::error::Error for StegoError {}

pub type Result<T> = std::result::Result<T, StegoError>;

macro_rules! bail {
    ($code:expr, $($arg:tt)*) => {
        return Err($crate::error::StegoError::new($code, format!($($arg)*)))
    };
}

pub(crate) use bail;
