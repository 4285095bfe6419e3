//! PRG framing: a 2-byte little-endian load address followed by the payload.

use core::fmt;

/// A Commodore 64 program file split into load address and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prg {
    pub load_addr: u16,
    pub data: Vec<u8>,
}

/// Failure to interpret a byte buffer as a PRG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrgError {
    /// The buffer is shorter than the 2-byte load address.
    TooShort,
}

impl fmt::Display for PrgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrgError::TooShort => write!(f, "file too short to carry a PRG load address"),
        }
    }
}

impl std::error::Error for PrgError {}

impl Prg {
    /// Split a raw file into load address and payload.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, PrgError> {
        if raw.len() < 2 {
            return Err(PrgError::TooShort);
        }
        Ok(Prg {
            load_addr: u16::from_le_bytes([raw[0], raw[1]]),
            data: raw[2..].to_vec(),
        })
    }

    /// Reassemble the on-disk form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 2);
        out.extend_from_slice(&self.load_addr.to_le_bytes());
        out.extend_from_slice(&self.data);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_address_and_payload() {
        let prg = Prg::from_bytes(&[0x01, 0x08, 0xA9, 0x00]).unwrap();
        assert_eq!(prg.load_addr, 0x0801);
        assert_eq!(prg.data, vec![0xA9, 0x00]);
        assert_eq!(prg.to_bytes(), vec![0x01, 0x08, 0xA9, 0x00]);
    }

    #[test]
    fn empty_payload_is_allowed() {
        let prg = Prg::from_bytes(&[0x00, 0x10]).unwrap();
        assert_eq!(prg.load_addr, 0x1000);
        assert!(prg.data.is_empty());
    }

    #[test]
    fn short_buffers_are_rejected() {
        assert_eq!(Prg::from_bytes(&[0x01]), Err(PrgError::TooShort));
        assert_eq!(Prg::from_bytes(&[]), Err(PrgError::TooShort));
    }
}
