//! Driver for the G3 secure element on a two-wire (I2C) bus.
//!
//! Covers power-state control (wakeup / sleep / idle) and the framed
//! instruction / response protocol with its CRC16 check. Instruction semantics
//! are left to the caller, the driver only moves and validates frames.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod g3;

pub use config::{ConfigError, G3Config};
pub use g3::{
    crc16, decode_response, encode_instruction, BusWriteError, ControlFlag, G3Bus, G3Error,
    G3I2cBus, Instruction, Integrity, ResponsePacket, ResultCode, DEFAULT_BUFFER_LENGTH, G3,
};
