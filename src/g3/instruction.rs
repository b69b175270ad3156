/// First byte of every transmission to the chip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlFlag {
    /// ask the chip to send its last response again
    Reread = 0x00,
    Sleep = 0x01,
    Idle = 0x02,
    /// a framed instruction follows
    Instruction = 0x03,
}

/// Instruction codes understood by the G3 firmware.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Read = 0x80,
    Write = 0x81,
    VerifyPassword = 0x82,
    ChangePassword = 0x83,
    GetChallenge = 0x84,
    InitPrivateKey = 0x85,
    Sign = 0x86,
    Verify = 0x87,
    Encrypt = 0x88,
    Decrypt = 0x89,
    Session = 0x8a,
    Diversify = 0x8b,
    GetPublicKey = 0x8c,
    Certificate = 0x8d,
    IssueCertificate = 0x8e,
    Ecdh = 0x90,
    TlsMacAndEncrypt = 0x91,
    TlsDecryptAndVerify = 0x92,
    TlsGetHandshakeDigest = 0x93,
    Hash = 0x94,
    Reset = 0x9f,
}

impl Instruction {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Result byte the chip puts after the length byte of a response.
///
/// Verification failures are also reported as 0x00 by the firmware.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResultCode {
    Success = 0x00,
    ParseError = 0x03,
    ExecutionError = 0x0f,
    AfterWakeup = 0x11,
    Abnormal = 0x21,
    CommunicationError = 0xff,
}

impl ResultCode {
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0x00 => ResultCode::Success,
            0x03 => ResultCode::ParseError,
            0x0f => ResultCode::ExecutionError,
            0x11 => ResultCode::AfterWakeup,
            0x21 => ResultCode::Abnormal,
            0xff => ResultCode::CommunicationError,
            _ => return None,
        })
    }
}
