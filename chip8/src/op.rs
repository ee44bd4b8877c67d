//! Decoded instruction representation.
//!
//! Each 16-bit word maps to exactly one [`Op`]. Unassigned bit patterns
//! decode to [`Op::Unknown`], which the interpreter treats as a no-op.
use std::fmt::{self, Formatter};

use crate::{bytecode::Opcode, constants::Address};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Op {
    /// 0nnn (SYS addr)
    ///
    /// Jump to a machine code routine on the original hardware.
    /// Ignored by modern interpreters.
    Sys { address: Address },
    /// 00E0 (CLS)
    ///
    /// Clear the screen.
    ClearScreen,
    /// 00EE (RET)
    ///
    /// Return from the sub-routine.
    Return,
    /// 1nnn (JP addr)
    ///
    /// Jump to the address in `nnn`.
    JumpAddress { address: Address },
    /// 2nnn (CALL addr)
    ///
    /// Call the sub-routine at address `nnn`.
    Call { address: Address },
    /// 3xnn (SE Vx, byte)
    ///
    /// Skip the next instruction if register `Vx` equals value `nn`
    Skip_Eq_Byte { vx: u8, nn: u8 },
    /// 4xnn (SNE Vx, byte)
    ///
    /// Skip the next instruction if register `Vx` does not equal value `nn`.
    Skip_NotEq_Byte { vx: u8, nn: u8 },
    /// 5xy0 (SE Vx, Vy)
    ///
    /// Skip the next instruction if register `Vx` equals register `Vy`.
    Skip_Eq { vx: u8, vy: u8 },
    /// 6xnn (LD Vx, byte)
    Load_Byte { vx: u8, nn: u8 },
    /// 7xnn (ADD Vx, byte)
    ///
    /// Add byte to the value in register `Vx`, store the result in `Vx`.
    /// Carry flag is not touched.
    Add_Byte { vx: u8, nn: u8 },

    // ------------------------------------------------------------------------
    // Math
    /// 8xy0 (LD Vx, Vy)
    Load_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy1 (OR Vx, Vy)
    Or_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy2 (AND Vx, Vy)
    And_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy3 (XOR Vx, Vy)
    Xor_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy4 (ADD Vx, Vy)
    Add_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy5 (SUB Vx, Vy)
    Sub_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy6 (SHR Vx)
    ShiftRight { vx: u8 },
    /// 8xy7 (SUBN Vx, Vy)
    SubReverse_Vx_Vy { vx: u8, vy: u8 },
    /// 8xyE (SHL Vx)
    ShiftLeft { vx: u8 },

    /// 9xy0 (SNE Vx, Vy)
    Skip_NotEq { vx: u8, vy: u8 },
    /// Annn (LD I, addr)
    ///
    /// Load address into register `I`.
    Load_Address { address: Address },
    /// Bnnn (JP V0, addr)
    ///
    /// Jump to location nnn + V0.
    Jump_V0 { address: Address },
    /// Cxnn (RND Vx, byte)
    Random { vx: u8, nn: u8 },
    /// Dxyn (DRW Vx, Vy, nibble)
    ///
    /// Draw sprite to the display buffer.
    Draw { vx: u8, vy: u8, n: u8 },

    // ------------------------------------------------------------------------
    // Keyboard
    /// Ex9E (SKP Vx)
    Skip_KeyPressed { vx: u8 },
    /// ExA1 (SKNP Vx)
    Skip_KeyNotPressed { vx: u8 },

    // ------------------------------------------------------------------------
    // Timers and memory
    /// Fx07 (LD Vx, DT)
    Load_Vx_Delay { vx: u8 },
    /// Fx0A (LD Vx, K)
    WaitKey { vx: u8 },
    /// Fx15 (LD DT, Vx)
    Load_Delay_Vx { vx: u8 },
    /// Fx18 (LD ST, Vx)
    Load_Sound_Vx { vx: u8 },
    /// Fx1E (ADD I, Vx)
    Add_Address_Vx { vx: u8 },
    /// Fx29 (LD F, Vx)
    Load_Font { vx: u8 },
    /// Fx33 (LD B, Vx)
    Load_Bcd { vx: u8 },
    /// Fx55 (LD [I], Vx)
    Store_Registers { vx: u8 },
    /// Fx65 (LD Vx, [I])
    Load_Registers { vx: u8 },

    /// Bit pattern that is not assigned to any instruction.
    Unknown { code: u16 },
}

impl Op {
    /// Decode a raw instruction word.
    pub fn decode(opcode: Opcode) -> Op {
        let vx = opcode.x();
        let vy = opcode.y();
        let n = opcode.n();
        let nn = opcode.nn();
        let address = opcode.nnn();
        let unknown = Op::Unknown { code: opcode.0 };

        match opcode.code() {
            0x0 => match address {
                0x0E0 => Op::ClearScreen,
                0x0EE => Op::Return,
                _ => Op::Sys { address },
            },
            0x1 => Op::JumpAddress { address },
            0x2 => Op::Call { address },
            0x3 => Op::Skip_Eq_Byte { vx, nn },
            0x4 => Op::Skip_NotEq_Byte { vx, nn },
            // Lower nibble is unused.
            0x5 => Op::Skip_Eq { vx, vy },
            0x6 => Op::Load_Byte { vx, nn },
            0x7 => Op::Add_Byte { vx, nn },
            // Arithmetic identified by n
            0x8 => match n {
                0x0 => Op::Load_Vx_Vy { vx, vy },
                0x1 => Op::Or_Vx_Vy { vx, vy },
                0x2 => Op::And_Vx_Vy { vx, vy },
                0x3 => Op::Xor_Vx_Vy { vx, vy },
                0x4 => Op::Add_Vx_Vy { vx, vy },
                0x5 => Op::Sub_Vx_Vy { vx, vy },
                0x6 => Op::ShiftRight { vx },
                0x7 => Op::SubReverse_Vx_Vy { vx, vy },
                0xE => Op::ShiftLeft { vx },
                _ => unknown,
            },
            0x9 => Op::Skip_NotEq { vx, vy },
            0xA => Op::Load_Address { address },
            0xB => Op::Jump_V0 { address },
            0xC => Op::Random { vx, nn },
            0xD => Op::Draw { vx, vy, n },
            // Keyboard instructions identified by nn
            0xE => match nn {
                0x9E => Op::Skip_KeyPressed { vx },
                0xA1 => Op::Skip_KeyNotPressed { vx },
                _ => unknown,
            },
            // Miscellaneous instructions identified by nn
            0xF => match nn {
                0x07 => Op::Load_Vx_Delay { vx },
                0x0A => Op::WaitKey { vx },
                0x15 => Op::Load_Delay_Vx { vx },
                0x18 => Op::Load_Sound_Vx { vx },
                0x1E => Op::Add_Address_Vx { vx },
                0x29 => Op::Load_Font { vx },
                0x33 => Op::Load_Bcd { vx },
                0x55 => Op::Store_Registers { vx },
                0x65 => Op::Load_Registers { vx },
                _ => unknown,
            },
            code => unreachable!("opcode group is a nibble, got {code:X}"),
        }
    }
}

impl From<u16> for Op {
    fn from(word: u16) -> Self {
        Op::decode(Opcode(word))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Op::Sys { address } => write!(f, "SYS 0x{address:03X}"),
            Op::ClearScreen => write!(f, "CLS"),
            Op::Return => write!(f, "RET"),
            Op::JumpAddress { address } => write!(f, "JP 0x{address:03X}"),
            Op::Call { address } => write!(f, "CALL 0x{address:03X}"),
            Op::Skip_Eq_Byte { vx, nn } => write!(f, "SE v{vx:X}, {nn}"),
            Op::Skip_NotEq_Byte { vx, nn } => write!(f, "SNE v{vx:X}, {nn}"),
            Op::Skip_Eq { vx, vy } => write!(f, "SE v{vx:X}, v{vy:X}"),
            Op::Load_Byte { vx, nn } => write!(f, "LD v{vx:X}, {nn}"),
            Op::Add_Byte { vx, nn } => write!(f, "ADD v{vx:X}, {nn}"),
            // ------
            Op::Load_Vx_Vy { vx, vy } => write!(f, "LD v{vx:X}, v{vy:X}"),
            Op::Or_Vx_Vy { vx, vy } => write!(f, "OR v{vx:X}, v{vy:X}"),
            Op::And_Vx_Vy { vx, vy } => write!(f, "AND v{vx:X}, v{vy:X}"),
            Op::Xor_Vx_Vy { vx, vy } => write!(f, "XOR v{vx:X}, v{vy:X}"),
            Op::Add_Vx_Vy { vx, vy } => write!(f, "ADD v{vx:X}, v{vy:X}"),
            Op::Sub_Vx_Vy { vx, vy } => write!(f, "SUB v{vx:X}, v{vy:X}"),
            Op::ShiftRight { vx } => write!(f, "SHR v{vx:X}"),
            Op::SubReverse_Vx_Vy { vx, vy } => write!(f, "SUBN v{vx:X}, v{vy:X}"),
            Op::ShiftLeft { vx } => write!(f, "SHL v{vx:X}"),
            // ------
            Op::Skip_NotEq { vx, vy } => write!(f, "SNE v{vx:X}, v{vy:X}"),
            Op::Load_Address { address } => write!(f, "LD I, 0x{address:03X}"),
            Op::Jump_V0 { address } => write!(f, "JP v0, 0x{address:03X}"),
            Op::Random { vx, nn } => write!(f, "RND v{vx:X}, {nn}"),
            Op::Draw { vx, vy, n } => write!(f, "DRW v{vx:X}, v{vy:X}, {n}"),
            // ------
            Op::Skip_KeyPressed { vx } => write!(f, "SKP v{vx:X}"),
            Op::Skip_KeyNotPressed { vx } => write!(f, "SKNP v{vx:X}"),
            // ------
            Op::Load_Vx_Delay { vx } => write!(f, "LD v{vx:X}, DT"),
            Op::WaitKey { vx } => write!(f, "LD v{vx:X}, K"),
            Op::Load_Delay_Vx { vx } => write!(f, "LD DT, v{vx:X}"),
            Op::Load_Sound_Vx { vx } => write!(f, "LD ST, v{vx:X}"),
            Op::Add_Address_Vx { vx } => write!(f, "ADD I, v{vx:X}"),
            Op::Load_Font { vx } => write!(f, "LD F, v{vx:X}"),
            Op::Load_Bcd { vx } => write!(f, "LD B, v{vx:X}"),
            Op::Store_Registers { vx } => write!(f, "LD [I], v{vx:X}"),
            Op::Load_Registers { vx } => write!(f, "LD v{vx:X}, [I]"),
            Op::Unknown { code } => write!(f, "0x{code:04X}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_decode_system_group() {
        assert_eq!(Op::from(0x00E0), Op::ClearScreen);
        assert_eq!(Op::from(0x00EE), Op::Return);
        assert_eq!(Op::from(0x0123), Op::Sys { address: 0x123 });
        assert_eq!(Op::from(0x0000), Op::Sys { address: 0x000 });
    }

    #[test]
    fn test_decode_math_group() {
        assert_eq!(Op::from(0x8124), Op::Add_Vx_Vy { vx: 1, vy: 2 });
        assert_eq!(Op::from(0x8127), Op::SubReverse_Vx_Vy { vx: 1, vy: 2 });
        assert_eq!(Op::from(0x810E), Op::ShiftLeft { vx: 1 });
        assert_eq!(Op::from(0x8128), Op::Unknown { code: 0x8128 });
    }

    #[test]
    fn test_decode_misc_group() {
        assert_eq!(Op::from(0xE39E), Op::Skip_KeyPressed { vx: 3 });
        assert_eq!(Op::from(0xE3A1), Op::Skip_KeyNotPressed { vx: 3 });
        assert_eq!(Op::from(0xE3FF), Op::Unknown { code: 0xE3FF });
        assert_eq!(Op::from(0xF20A), Op::WaitKey { vx: 2 });
        assert_eq!(Op::from(0xF265), Op::Load_Registers { vx: 2 });
        assert_eq!(Op::from(0xF299), Op::Unknown { code: 0xF299 });
    }

    /// Every word must decode without panicking.
    #[test]
    fn test_decode_total() {
        for word in 0..=u16::MAX {
            let _ = Op::from(word);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Op::from(0x1200).to_string(), "JP 0x200");
        assert_eq!(Op::from(0xD01F).to_string(), "DRW v0, v1, 15");
        assert_eq!(Op::from(0xFA0A).to_string(), "LD vA, K");
        assert_eq!(Op::from(0xB300).to_string(), "JP v0, 0x300");
    }
}
