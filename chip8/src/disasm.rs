//! Disassembler.
use std::fmt::{self, Write as FmtWrite};

use crate::{bytecode::Opcode, constants::MEM_START, op::Op};

/// Prints a program listing, one instruction per line, addressed as
/// the program would be laid out in VM memory.
pub struct Disassembler<'a> {
    bytecode: &'a [u8],
}

impl<'a> Disassembler<'a> {
    pub fn new(bytecode: &'a [u8]) -> Self {
        Self { bytecode }
    }

    /// Write the listing of the whole program to the given writer.
    ///
    /// A trailing odd byte can't form an instruction, and is listed as data.
    pub fn disassemble<W: FmtWrite>(&self, w: &mut W) -> fmt::Result {
        let mut chunks = self.bytecode.chunks_exact(2);

        for (index, chunk) in chunks.by_ref().enumerate() {
            let opcode = Opcode::from([chunk[0], chunk[1]]);
            let addr = MEM_START + index * 2;
            writeln!(w, "0x{:04X} {} {}", addr, opcode, Op::decode(opcode))?;
        }

        if let [byte] = chunks.remainder() {
            let addr = MEM_START + self.bytecode.len() - 1;
            writeln!(w, "0x{:04X} {:02X}   DB 0x{:02X}", addr, byte, byte)?;
        }

        Ok(())
    }

    /// Listing of the whole program as a string.
    pub fn listing(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();
        self.disassemble(&mut buf)?;
        Ok(buf)
    }

    pub fn print_bytecode(&self) -> fmt::Result {
        print!("{}", self.listing()?);
        Ok(())
    }
}
