use fugit::{ExtU32, MillisDurationU32};
use serde::{Deserialize, Serialize};

/// 0xC8 on the wire, shifted down to the 7-bit address
pub const G3_I2C_ADDR: u8 = 0xc8 >> 1;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct G3Config {
    // 7-bit bus address
    pub address: u8,
    // wakeup pulse: line held low, then released before the chip is read
    pub wakeup_low_ms: u32,
    pub wakeup_high_ms: u32,
    // used by send_instruction and reread when the caller gives no timeout
    pub command_timeout_ms: u32,
}

impl G3Config {
    pub fn validate(&self) -> bool {
        // 0x00..=0x07 and 0x78..=0x7f are reserved by the bus
        (0x08..0x78).contains(&self.address)
    }

    pub fn wakeup_low(&self) -> MillisDurationU32 {
        self.wakeup_low_ms.millis()
    }

    pub fn wakeup_high(&self) -> MillisDurationU32 {
        self.wakeup_high_ms.millis()
    }

    pub fn command_timeout(&self) -> MillisDurationU32 {
        self.command_timeout_ms.millis()
    }
}

impl Default for G3Config {
    fn default() -> Self {
        Self {
            address: G3_I2C_ADDR,
            wakeup_low_ms: 1,
            wakeup_high_ms: 1,
            command_timeout_ms: 100,
        }
    }
}
