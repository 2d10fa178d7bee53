use std::fmt;
use std::io;

use hpgp_frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(INTERNAL, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::BufferTooSmall { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        FrameError::Truncated { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_errors_map_to_exit_codes() {
        let small = frame_error(
            "pack failed",
            FrameError::BufferTooSmall {
                capacity: 2,
                required: 5,
            },
        );
        assert_eq!(small.code, USAGE);
        assert!(small.message.starts_with("pack failed: buffer too small"));

        let short = frame_error("inspect failed", FrameError::Truncated { len: 3, required: 5 });
        assert_eq!(short.code, DATA_INVALID);

        let closed = frame_error("write failed", FrameError::SinkClosed);
        assert_eq!(closed.code, INTERNAL);
    }
}
