pub mod i2c;

use fugit::MillisDurationU32;

/// Why a bus write was not completed, mirroring the status a two-wire master
/// reports at the end of a transmission.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BusWriteError {
    /// data did not fit into the peripheral's transmit buffer
    SizeError,
    AddressNack,
    DataNack,
    Other,
    Timeout,
}

/// Raw byte transport to the chip.
///
/// Every call carries its own timeout; implementations apply it for the
/// duration of that transaction only.
pub trait G3Bus {
    fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
        timeout: MillisDurationU32,
    ) -> Result<(), BusWriteError>;

    /// Requests up to `buffer.len()` bytes and returns how many the chip actually
    /// offered. Zero means the read was not acknowledged.
    fn read(&mut self, address: u8, buffer: &mut [u8], timeout: MillisDurationU32) -> usize;
}

impl<B: G3Bus + ?Sized> G3Bus for &mut B {
    fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
        timeout: MillisDurationU32,
    ) -> Result<(), BusWriteError> {
        (**self).write(address, bytes, timeout)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8], timeout: MillisDurationU32) -> usize {
        (**self).read(address, buffer, timeout)
    }
}
