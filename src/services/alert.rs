//! Low-time alert output

use std::io::Write;

use crate::error::AlertError;

/// Something that can make the low-time sound
pub trait AlertSink: Send + Sync {
    fn play(&self) -> Result<(), AlertError>;
}

/// Rings the terminal bell on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn play(&self) -> Result<(), AlertError> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Discards alerts
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAlert;

impl AlertSink for SilentAlert {
    fn play(&self) -> Result<(), AlertError> {
        Ok(())
    }
}
