//! Helpers for extracting data from opcodes.
use std::fmt;

use crate::constants::*;

/// Raw 16-bit instruction word.
///
/// ```text
/// ┌──────┬──────┬──────┬──────┐
/// │ code │  x   │  y   │  n   │
/// └──────┴──────┴──────┴──────┘
///         └──── nnn ─────────┘
///                └──── nn ───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Assemble an instruction word from its four nibbles.
    ///
    /// Only the lower 4 bits of each argument are used.
    #[inline(always)]
    pub fn from_nibbles(code: u8, x: u8, y: u8, n: u8) -> Self {
        Self(
            ((code as u16 & 0xF) << 12)
                | ((x as u16 & 0xF) << 8)
                | ((y as u16 & 0xF) << 4)
                | (n as u16 & 0xF),
        )
    }

    /// Opcode group in the upper nibble.
    #[inline(always)]
    pub fn code(self) -> u8 {
        ((self.0 & 0xF000) >> 12) as u8
    }

    /// Register index VX.
    #[inline(always)]
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// Register index VY.
    #[inline(always)]
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// Literal nibble N.
    #[inline(always)]
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// Immediate byte NN, sometimes written as KK.
    #[inline(always)]
    pub fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// 12-bit address NNN.
    #[inline(always)]
    pub fn nnn(self) -> Address {
        self.0 & 0x0FFF
    }
}

impl From<[u8; 2]> for Opcode {
    fn from(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// Fetch the instruction at the given address.
///
/// Instructions are stored big-endian. The address wraps around
/// the 12-bit address space.
#[inline(always)]
pub fn fetch(ram: &[u8; MEM_SIZE], pc: Address) -> Opcode {
    let pc = pc as usize;
    Opcode::from([ram[pc & ADDRESS_MASK], ram[(pc + 1) & ADDRESS_MASK]])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fields() {
        let op = Opcode(0xD12F);
        assert_eq!(op.code(), 0xD);
        assert_eq!(op.x(), 0x1);
        assert_eq!(op.y(), 0x2);
        assert_eq!(op.n(), 0xF);
        assert_eq!(op.nn(), 0x2F);
        assert_eq!(op.nnn(), 0x12F);
    }

    #[test]
    fn test_nibble_roundtrip() {
        for word in 0..=u16::MAX {
            let op = Opcode(word);
            assert_eq!(Opcode::from_nibbles(op.code(), op.x(), op.y(), op.n()), op);
        }
    }

    #[test]
    fn test_fetch_big_endian() {
        let mut ram = Box::new([0; MEM_SIZE]);
        ram[MEM_START] = 0xA2;
        ram[MEM_START + 1] = 0x1E;
        assert_eq!(fetch(&ram, MEM_START as Address), Opcode(0xA21E));
    }

    #[test]
    fn test_fetch_wraps_address_space() {
        let mut ram = Box::new([0; MEM_SIZE]);
        ram[MEM_SIZE - 1] = 0x12;
        ram[0] = 0x34;
        assert_eq!(fetch(&ram, (MEM_SIZE - 1) as Address), Opcode(0x1234));
    }
}
