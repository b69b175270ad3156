use embedded_hal::{delay::DelayNs, digital::OutputPin};
use fugit::MillisDurationU32;
use heapless::Vec;
use log::{debug, warn};

use super::{
    buffer_exceeded,
    crc::{crc16, crc16_bytes, CRC16_SIZE},
    instruction::{ControlFlag, Instruction, ResultCode},
    G3Bus, G3Error, G3,
};

const LENGTH_OFFSET: usize = 1;
const FLAG_SIZE: usize = 1;
/// length byte, code, p1, p2 (2), crc (2)
pub const MIN_INSTRUCTION_LENGTH: usize = 7;
/// length byte plus crc
pub const MIN_RESPONSE_LENGTH: usize = 1 + CRC16_SIZE;

/// Builds an instruction frame into `buf`:
///
/// ```text
/// flag | length | code | p1 | p2 (BE) | payload.. | crc16 (LE)
/// ```
///
/// `length` counts from itself through the crc, the crc covers `length`
/// through the end of the payload. Frames that would not fit into `N` bytes
/// are rejected and `buf` is left empty.
pub fn encode_instruction<const N: usize>(
    buf: &mut Vec<u8, N>,
    code: u8,
    p1: u8,
    p2: u16,
    payload: Option<&[u8]>,
) -> Result<(), G3Error> {
    buf.clear();

    let payload = payload.unwrap_or(&[]);
    let length = MIN_INSTRUCTION_LENGTH + payload.len();
    let total = FLAG_SIZE + length;
    if total > N || length > u8::MAX as usize {
        return Err(buffer_exceeded::<N>(total));
    }

    let [p2_hi, p2_lo] = p2.to_be_bytes();
    let header = [
        ControlFlag::Instruction as u8,
        length as u8,
        code,
        p1,
        p2_hi,
        p2_lo,
    ];
    let overflow = |_: ()| buffer_exceeded::<N>(total);
    buf.extend_from_slice(&header).map_err(overflow)?;
    buf.extend_from_slice(payload).map_err(overflow)?;
    let crc = crc16_bytes(&buf[LENGTH_OFFSET..]);
    buf.extend_from_slice(&crc).map_err(overflow)?;

    Ok(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Integrity {
    Valid,
    CrcMismatch { expected: u16, received: u16 },
    /// the length byte is below the minimum frame or beyond the received bytes
    BadLength { declared: u8 },
}

/// A response as read from the chip, handed out even when its CRC is wrong.
///
/// Callers that only want good data use [`ResponsePacket::checked`]; callers
/// that want to look at a damaged frame still can through [`ResponsePacket::frame`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResponsePacket<'a> {
    frame: &'a [u8],
    integrity: Integrity,
}

impl<'a> ResponsePacket<'a> {
    /// every byte read, including length byte, crc and anything after the frame
    pub fn frame(&self) -> &'a [u8] {
        self.frame
    }

    /// bytes between the length byte and the crc; empty if the length is unusable
    pub fn payload(&self) -> &'a [u8] {
        match self.integrity {
            Integrity::BadLength { .. } => &[],
            _ => &self.frame[1..self.frame[0] as usize - CRC16_SIZE],
        }
    }

    pub fn integrity(&self) -> Integrity {
        self.integrity
    }

    pub fn is_crc_valid(&self) -> bool {
        self.integrity == Integrity::Valid
    }

    pub fn result_code(&self) -> Option<ResultCode> {
        self.payload().first().copied().and_then(ResultCode::from_u8)
    }

    /// The payload, or the integrity failure as an error.
    pub fn checked(&self) -> Result<&'a [u8], G3Error> {
        match self.integrity {
            Integrity::Valid => Ok(self.payload()),
            Integrity::CrcMismatch { expected, received } => {
                Err(G3Error::Integrity { expected, received })
            }
            Integrity::BadLength { declared } => Err(G3Error::MalformedResponse {
                declared,
                received: self.frame.len(),
            }),
        }
    }
}

/// Checks a response frame against its own length byte and trailing crc.
pub fn decode_response(frame: &[u8]) -> ResponsePacket<'_> {
    let declared = frame.first().copied().unwrap_or(0);
    let len = declared as usize;

    let integrity = if len < MIN_RESPONSE_LENGTH || len > frame.len() {
        Integrity::BadLength { declared }
    } else {
        let (body, trailer) = frame[..len].split_at(len - CRC16_SIZE);
        let expected = crc16(body);
        let received = u16::from_le_bytes([trailer[0], trailer[1]]);
        if expected == received {
            Integrity::Valid
        } else {
            Integrity::CrcMismatch { expected, received }
        }
    };

    ResponsePacket { frame, integrity }
}

impl<BUS, PIN, DELAY, const N: usize> G3<BUS, PIN, DELAY, N>
where
    BUS: G3Bus,
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// Frames and sends one instruction. Nothing is put on the bus if the frame
    /// does not fit the buffer.
    pub fn write_instruction_packet(
        &mut self,
        code: u8,
        p1: u8,
        p2: u16,
        payload: Option<&[u8]>,
        timeout: MillisDurationU32,
    ) -> Result<(), G3Error> {
        encode_instruction(&mut self.buffer, code, p1, p2, payload)?;
        self.transmit_buffer(timeout)
    }

    /// [`Self::write_instruction_packet`] with a typed code and the configured timeout.
    pub fn send_instruction(
        &mut self,
        instruction: Instruction,
        p1: u8,
        p2: u16,
        payload: Option<&[u8]>,
    ) -> Result<(), G3Error> {
        let timeout = self.config.command_timeout();
        self.write_instruction_packet(instruction.code(), p1, p2, payload, timeout)
    }

    /// Reads `len` bytes and checks them as a response frame.
    ///
    /// The protocol has no length negotiation, the caller has to know how long
    /// the answer will be. A CRC mismatch does not fail the read, it is carried
    /// in the returned packet.
    pub fn read_response_packet(
        &mut self,
        len: usize,
        timeout: MillisDurationU32,
    ) -> Result<ResponsePacket<'_>, G3Error> {
        let frame = self.read(len, timeout)?;
        debug!("g3 rx {:02x?}", frame);

        let packet = decode_response(frame);
        if !packet.is_crc_valid() {
            warn!("g3 response failed integrity check: {:?}", packet.integrity());
        }
        Ok(packet)
    }
}
