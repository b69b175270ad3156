use embedded_hal::{delay::DelayNs, digital::OutputPin};
use fugit::MillisDurationU32;
use log::{debug, warn};

use super::{
    instruction::{ControlFlag, ResultCode},
    packet::ResponsePacket,
    G3Bus, G3Error, G3,
};

/// What the chip answers right after waking up: length 4, the after-wakeup
/// result code and the CRC of those two bytes.
pub const WAKEUP_RESPONSE: [u8; 4] = [0x04, ResultCode::AfterWakeup as u8, 0x33, 0x43];

const WAKEUP_READ_TIMEOUT: MillisDurationU32 = MillisDurationU32::millis(10);
// a sleeping chip must not answer even a single byte within this window
const CONTROL_TIMEOUT: MillisDurationU32 = MillisDurationU32::millis(1);

impl<BUS, PIN, DELAY, const N: usize> G3<BUS, PIN, DELAY, N>
where
    BUS: G3Bus,
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// Pulls the wakeup line low for `low`, releases it for `high`, then expects
    /// the chip's wakeup response.
    pub fn wakeup(&mut self, low: MillisDurationU32, high: MillisDurationU32) -> Result<(), G3Error> {
        let _ = self.wakeup_pin.set_low();
        self.delay.delay_ms(low.ticks());
        let _ = self.wakeup_pin.set_high();
        self.delay.delay_ms(high.ticks());

        let response = match self.read(WAKEUP_RESPONSE.len(), WAKEUP_READ_TIMEOUT) {
            Ok(response) => response,
            Err(e) => {
                warn!("g3 wakeup: no response ({e:?})");
                return Err(G3Error::WakeupFailed);
            }
        };

        if response != WAKEUP_RESPONSE {
            warn!("g3 wakeup: unexpected response {:02x?}", response);
            return Err(G3Error::WakeupFailed);
        }

        debug!("g3 awake");
        Ok(())
    }

    /// [`Self::wakeup`] with the pulse timing from the configuration.
    pub fn wakeup_default(&mut self) -> Result<(), G3Error> {
        let (low, high) = (self.config.wakeup_low(), self.config.wakeup_high());
        self.wakeup(low, high)
    }

    /// Puts the chip to sleep. Succeeds when the chip stops answering.
    pub fn sleep(&mut self) -> Result<(), G3Error> {
        if self.send_control(ControlFlag::Sleep) {
            warn!("g3 still answering after sleep");
            return Err(G3Error::SleepFailed);
        }
        Ok(())
    }

    /// Idles the chip. Succeeds when the chip stops answering.
    pub fn idle(&mut self) -> Result<(), G3Error> {
        if self.send_control(ControlFlag::Idle) {
            warn!("g3 still answering after idle");
            return Err(G3Error::IdleFailed);
        }
        Ok(())
    }

    /// Asks the chip to send its last response again, e.g. after a CRC failure.
    pub fn reread(
        &mut self,
        len: usize,
        timeout: MillisDurationU32,
    ) -> Result<ResponsePacket<'_>, G3Error> {
        self.write(&[ControlFlag::Reread as u8], timeout)?;
        self.read_response_packet(len, timeout)
    }

    /// Writes a single control byte and reports whether the chip still answers.
    fn send_control(&mut self, flag: ControlFlag) -> bool {
        // only the silence afterwards tells whether the chip took the byte
        if let Err(e) = self.write(&[flag as u8], CONTROL_TIMEOUT) {
            debug!("g3 {flag:?} write: {e:?}");
        }
        self.read(1, CONTROL_TIMEOUT).is_ok()
    }
}
