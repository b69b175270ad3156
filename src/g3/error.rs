use core::fmt;

use super::driver::BusWriteError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum G3Error {
    /// frame or transfer larger than the bus buffer, rejected before touching the bus
    BufferSizeExceeded { requested: usize, capacity: usize },
    BusWrite(BusWriteError),
    /// the chip acknowledged zero bytes of a read
    BusReadNack,
    /// CRC of a response did not match its trailer
    Integrity { expected: u16, received: u16 },
    /// response length byte does not describe a checkable frame
    MalformedResponse { declared: u8, received: usize },
    WakeupFailed,
    SleepFailed,
    IdleFailed,
}

impl From<BusWriteError> for G3Error {
    fn from(e: BusWriteError) -> Self {
        G3Error::BusWrite(e)
    }
}

impl fmt::Display for G3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            G3Error::BufferSizeExceeded {
                requested,
                capacity,
            } => write!(f, "transfer of {requested} bytes exceeds {capacity} byte buffer"),
            G3Error::BusWrite(e) => write!(f, "bus write failed: {e:?}"),
            G3Error::BusReadNack => f.write_str("bus read not acknowledged"),
            G3Error::Integrity { expected, received } => write!(
                f,
                "response crc mismatch: expected {expected:#06x}, received {received:#06x}"
            ),
            G3Error::MalformedResponse { declared, received } => write!(
                f,
                "response declares {declared} bytes, {received} received"
            ),
            G3Error::WakeupFailed => f.write_str("chip did not answer wakeup"),
            G3Error::SleepFailed => f.write_str("chip still responsive after sleep"),
            G3Error::IdleFailed => f.write_str("chip still responsive after idle"),
        }
    }
}
