pub mod bytecode;
mod clock;
pub mod constants;
mod cpu;
pub mod devices;
mod disasm;
mod error;
pub mod keymap;
pub mod op;
mod vm;

pub use self::{
    devices::KeyCode,
    error::{Chip8Error, Chip8Result, Fault},
    vm::Hz,
};

pub const IMPL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read-only view of the display, one `bool` per pixel, row by row.
pub type Chip8DisplayBuffer<'a> = &'a [bool; constants::DISPLAY_BUFFER_SIZE];

pub mod prelude {
    pub use super::{
        bytecode::Opcode,
        devices::{Buzzer, InputState, KeyCode, Keypad},
        disasm::Disassembler,
        error::{Chip8Error, Chip8Result, Fault},
        keymap::{KeyBinding, KeyMap},
        op::Op,
        vm::{Chip8Conf, Chip8Vm, Flow, Hz, Quirks},
        Chip8DisplayBuffer,
    };
}
