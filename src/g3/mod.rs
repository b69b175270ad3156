mod crc;
mod driver;
mod error;
mod instruction;
mod packet;
mod power;

#[cfg(test)]
mod fakes;

pub use self::crc::{crc16, crc16_bytes, CRC_16_G3};
pub use driver::{i2c::G3I2cBus, BusWriteError, G3Bus};
pub use error::G3Error;
pub use instruction::{ControlFlag, Instruction, ResultCode};
pub use packet::{decode_response, encode_instruction, Integrity, ResponsePacket};
pub use power::WAKEUP_RESPONSE;

use embedded_hal::{delay::DelayNs, digital::OutputPin};
use fugit::MillisDurationU32;
use heapless::Vec;
use log::debug;

use crate::config::G3Config;

/// Receive/transmit buffer size of a classic two-wire master.
pub const DEFAULT_BUFFER_LENGTH: usize = 32;

/// One G3 chip on the bus.
///
/// `N` is the largest transfer the bus can move in one transaction. The
/// driver owns a scratch buffer of that size which holds exactly one frame at
/// a time; every operation takes `&mut self`, so frames can never interleave.
/// Responses are returned as borrows of that buffer and stay valid until the
/// next call.
pub struct G3<BUS, PIN, DELAY, const N: usize = DEFAULT_BUFFER_LENGTH> {
    bus: BUS,
    wakeup_pin: PIN,
    delay: DELAY,
    config: G3Config,
    buffer: Vec<u8, N>,
}

impl<BUS, PIN, DELAY, const N: usize> G3<BUS, PIN, DELAY, N>
where
    BUS: G3Bus,
    PIN: OutputPin,
    DELAY: DelayNs,
{
    pub fn new(bus: BUS, wakeup_pin: PIN, delay: DELAY, config: G3Config) -> Self {
        Self {
            bus,
            wakeup_pin,
            delay,
            config,
            buffer: Vec::new(),
        }
    }

    /// Releases the wakeup line so the chip sees it idle high.
    pub fn setup(&mut self) {
        let _ = self.wakeup_pin.set_high();
        debug!("g3 at {:#04x} set up, {} byte buffer", self.config.address, N);
    }

    pub fn config(&self) -> &G3Config {
        &self.config
    }

    pub fn release(self) -> (BUS, PIN, DELAY) {
        (self.bus, self.wakeup_pin, self.delay)
    }

    /// Writes raw bytes, no framing.
    pub fn write(&mut self, bytes: &[u8], timeout: MillisDurationU32) -> Result<(), G3Error> {
        check_transfer_size::<N>(bytes.len())?;
        self.bus.write(self.config.address, bytes, timeout)?;
        Ok(())
    }

    /// Reads up to `len` raw bytes. The chip decides how many it actually sends,
    /// so the returned slice may be shorter than requested.
    pub fn read(&mut self, len: usize, timeout: MillisDurationU32) -> Result<&[u8], G3Error> {
        check_transfer_size::<N>(len)?;
        self.buffer.clear();
        self.buffer
            .resize(len, 0)
            .map_err(|_| buffer_exceeded::<N>(len))?;

        let received = self.bus.read(self.config.address, &mut self.buffer, timeout);
        if received == 0 {
            return Err(G3Error::BusReadNack);
        }
        self.buffer.truncate(received);
        Ok(self.buffer.as_slice())
    }

    /// Sends the frame currently held in the scratch buffer.
    fn transmit_buffer(&mut self, timeout: MillisDurationU32) -> Result<(), G3Error> {
        debug!("g3 tx {:02x?}", self.buffer.as_slice());
        self.bus.write(self.config.address, &self.buffer, timeout)?;
        Ok(())
    }
}

fn buffer_exceeded<const N: usize>(requested: usize) -> G3Error {
    G3Error::BufferSizeExceeded {
        requested,
        capacity: N,
    }
}

fn check_transfer_size<const N: usize>(len: usize) -> Result<(), G3Error> {
    if len > N {
        return Err(buffer_exceeded::<N>(len));
    }
    Ok(())
}
