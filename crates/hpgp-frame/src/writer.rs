use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::{
    frame_len, pack_payload_with_config, pack_with_config, PackConfig, MAX_FRAME_LEN,
};
use crate::error::{FrameError, Result};
use crate::mmtype::{MmType, Variant};
use crate::payload::Payload;

/// Packs frames into an internal scratch buffer and writes them to any
/// `Write` sink.
///
/// Each frame is written as header plus the reported body length, so short
/// bodies go out zero-padded to the Ethernet minimum.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    config: PackConfig,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, PackConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, config: PackConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::zeroed(MAX_FRAME_LEN),
            config,
        }
    }

    /// Pack and write one frame from raw body bytes. Returns the number of
    /// bytes written.
    pub fn send(&mut self, kind: MmType, variant: Variant, body: &[u8]) -> Result<usize> {
        let len = pack_with_config(&self.config, kind, variant, body, &mut self.buf)?;
        self.write_packed(frame_len(len))
    }

    /// Pack and write one frame from a typed body. Returns the number of
    /// bytes written.
    pub fn send_payload<P: Payload>(&mut self, payload: &P) -> Result<usize> {
        let len = pack_payload_with_config(&self.config, payload, &mut self.buf)?;
        self.write_packed(frame_len(len))
    }

    fn write_packed(&mut self, total: usize) -> Result<usize> {
        let mut offset = 0usize;
        while offset < total {
            match self.inner.write(&self.buf[offset..total]) {
                Ok(0) => return Err(FrameError::SinkClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()?;
        Ok(total)
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current packer configuration.
    pub fn config(&self) -> &PackConfig {
        &self.config
    }
}
