use crc::{Algorithm, Crc};

/// CRC16 of the G3 link layer.
///
/// Polynomial 0x8005, register starts at zero, data bits enter LSB first while
/// the register shifts out MSB first, no output reflection and no final xor.
/// This is neither CRC-16/ARC nor CRC-16/USB; only the input is reflected.
pub const CRC_16_G3: Algorithm<u16> = Algorithm {
    width: 16,
    poly: 0x8005,
    init: 0x0000,
    refin: true,
    refout: false,
    xorout: 0x0000,
    check: 0xbcdd,
    residue: 0x0000,
};

const CRC_G3: Crc<u16> = Crc::<u16>::new(&CRC_16_G3);

pub const CRC16_SIZE: usize = 2;

pub fn crc16(data: &[u8]) -> u16 {
    CRC_G3.checksum(data)
}

/// checksum as it goes on the wire: low byte first
pub fn crc16_bytes(data: &[u8]) -> [u8; CRC16_SIZE] {
    crc16(data).to_le_bytes()
}
