/// Errors that can occur while packing or inspecting HPGP frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The output buffer cannot hold the frame header and MME sub-header.
    #[error("buffer too small ({capacity} bytes, need at least {required})")]
    BufferTooSmall { capacity: usize, required: usize },

    /// The input ended before a complete header or payload was available.
    #[error("truncated input ({len} bytes, need {required})")]
    Truncated { len: usize, required: usize },

    /// An I/O error occurred while writing a packed frame.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink stopped accepting bytes before the frame was fully written.
    #[error("sink closed (incomplete frame)")]
    SinkClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
