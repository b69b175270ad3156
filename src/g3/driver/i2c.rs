use embedded_hal::i2c::{Error, ErrorKind, I2c, NoAcknowledgeSource};
use fugit::MillisDurationU32;
use log::debug;

use super::{BusWriteError, G3Bus};

impl From<ErrorKind> for BusWriteError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => BusWriteError::AddressNack,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => BusWriteError::DataNack,
            ErrorKind::Overrun => BusWriteError::SizeError,
            _ => BusWriteError::Other,
        }
    }
}

/// [`G3Bus`] on top of any blocking embedded-hal I2C master.
///
/// embedded-hal has no per-transaction timeout, so the timeout handed in by the
/// driver is only logged; the peripheral's own bus timeout bounds each call.
pub struct G3I2cBus<I2C: I2c> {
    pub i2c: I2C,
}

impl<I2C: I2c> G3I2cBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> G3Bus for G3I2cBus<I2C> {
    fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
        timeout: MillisDurationU32,
    ) -> Result<(), BusWriteError> {
        self.i2c.write(address, bytes).map_err(|e| {
            debug!("g3 i2c write of {} bytes failed ({} ms): {:?}", bytes.len(), timeout.ticks(), e.kind());
            BusWriteError::from(e.kind())
        })
    }

    fn read(&mut self, address: u8, buffer: &mut [u8], timeout: MillisDurationU32) -> usize {
        match self.i2c.read(address, buffer) {
            Ok(()) => buffer.len(),
            Err(e) => {
                debug!("g3 i2c read of {} bytes failed ({} ms): {:?}", buffer.len(), timeout.ticks(), e.kind());
                0
            }
        }
    }
}
