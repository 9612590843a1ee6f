use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// Range `[lo, hi]` was offered to a window `[window_lo, window_hi]` that
    /// does not contain it.
    pub fn out_of_window(lo: i64, hi: i64, window: Option<(i64, i64)>) -> Error {
        Error(ErrorKind::OutOfWindow { lo, hi, window }.into())
    }

    pub fn capacity_overflow(count: u128) -> Error {
        Error(ErrorKind::CapacityOverflow { count }.into())
    }

    pub fn illegal_state(name: impl Into<String>) -> Error {
        Error(ErrorKind::IllegalState { name: name.into() }.into())
    }

    /// Returns `true` if this is a windowed-view boundary violation.
    pub fn is_out_of_window(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfWindow { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error(
        "range [{lo}, {hi}] is outside the view window {}",
        window.map(|(lo, hi)| format!("[{lo}, {hi}]")).unwrap_or_else(|| "(empty)".to_string())
    )]
    OutOfWindow {
        lo: i64,
        hi: i64,
        /// `None` for the empty window.
        window: Option<(i64, i64)>,
    },

    #[error("set of {count} values does not fit in the destination container")]
    CapacityOverflow { count: u128 },

    #[error("illegal state: {name}")]
    IllegalState { name: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
