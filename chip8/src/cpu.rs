//! CPU and memory state.
use crate::{constants::*, error::Fault};

/// Core state for a chip8 interpreter.
pub struct Chip8Cpu {
    // ------------------------------------------------------------------------
    // Registers
    /// Program counter pointing to the current position in the bytecode.
    pub(crate) pc: Address,
    /// Stack pointer, the number of return addresses on the stack.
    pub(crate) sp: usize,
    /// General purpose registers for temporary values.
    ///
    /// Register 16 (VF) is used for either the carry flag or borrow switch depending on opcode.
    /// It must only be written through [`Chip8Cpu::set_flag`] by instructions that define a flag.
    pub(crate) registers: [u8; REGISTER_COUNT],
    /// Pointer register used for temporarily storing an address.
    pub(crate) address: Address,
    /// (DT) Delay timer that counts down to 0.
    pub(crate) delay_timer: u8,
    /// (ST) Sound timer that counts down to 0. When it has a non-zero value, a beep is played.
    pub(crate) sound_timer: u8,
    /// Switch tracking whether the buzzer is on or off.
    pub(crate) buzzer_state: bool,
    /// Register waiting to receive the next released key.
    pub(crate) waiting_key: Option<u8>,

    // ------------------------------------------------------------------------
    // Memory
    /// Main memory storage space.
    pub(crate) ram: Box<[u8; MEM_SIZE]>,
    /// Stack of return pointers used for jumping when a routine call finishes.
    pub(crate) stack: [Address; STACK_SIZE],
    /// Screen buffer that is drawn too.
    pub(crate) display: Box<[bool; DISPLAY_BUFFER_SIZE]>,

    // ------------------------------------------------------------------------
    // Control
    /// Fault that halted the machine.
    pub(crate) error: Option<Fault>,
}

impl Default for Chip8Cpu {
    fn default() -> Self {
        Self {
            pc: MEM_START as Address,
            sp: 0,
            registers: [0; REGISTER_COUNT],
            address: 0,
            delay_timer: 0,
            sound_timer: 0,
            buzzer_state: false,
            waiting_key: None,

            ram: Box::new([0; MEM_SIZE]),
            stack: [0; STACK_SIZE],
            display: Box::new([false; DISPLAY_BUFFER_SIZE]),

            error: None,
        }
    }
}

impl Chip8Cpu {
    pub fn new() -> Self {
        Default::default()
    }

    /// Erase the contents of the memory buffers `ram`, `stack` and `display`,
    /// and zero all registers.
    pub(crate) fn clear_memory(&mut self) {
        self.ram.fill(0);
        self.stack.fill(0);
        self.display.fill(false);

        self.pc = MEM_START as Address;
        self.sp = 0;
        self.registers.fill(0);
        self.address = 0;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.buzzer_state = false;
        self.waiting_key = None;
        self.error = None;
    }

    /// Copy the builtin font into the reserved area at the start of memory.
    pub(crate) fn load_font(&mut self) {
        let start = FONTSET_START as usize;
        self.ram[start..start + FONTSET_DATA_LENGTH].copy_from_slice(&FONTSET);
    }

    pub fn clear_display(&mut self) {
        self.display.fill(false);
    }

    /// Write the carry, borrow or collision flag into VF.
    #[inline(always)]
    pub(crate) fn set_flag(&mut self, flag: bool) {
        self.registers[FLAG_REGISTER] = flag as u8;
    }

    /// Push the return address for a sub-routine call.
    pub(crate) fn push_return(&mut self, addr: Address) -> Result<(), Fault> {
        if self.sp >= STACK_SIZE {
            return Err(Fault::StackOverflow {
                pc: self.pc,
                sp: self.sp,
            });
        }
        self.stack[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pop the return address of the current sub-routine.
    pub(crate) fn pop_return(&mut self) -> Result<Address, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow {
                pc: self.pc,
                sp: self.sp,
            });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    /// Read a byte of memory, wrapping around the address space.
    #[inline(always)]
    pub(crate) fn read(&self, addr: usize) -> u8 {
        self.ram[addr & ADDRESS_MASK]
    }

    /// Write a byte of memory, wrapping around the address space.
    #[inline(always)]
    pub(crate) fn write(&mut self, addr: usize, value: u8) {
        self.ram[addr & ADDRESS_MASK] = value;
    }

    /// Count down the delay timer.
    #[inline]
    pub fn tick_delay(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
    }

    /// Count down the sound timer.
    ///
    /// Returns `true` when the timer just reached zero.
    #[inline]
    pub fn tick_sound(&mut self) -> bool {
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            self.sound_timer == 0
        } else {
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stack_discipline() {
        let mut cpu = Chip8Cpu::default();

        for i in 0..STACK_SIZE {
            cpu.push_return(0x200 + i as Address * 2).unwrap();
        }
        assert_eq!(cpu.sp, STACK_SIZE);
        assert_eq!(
            cpu.push_return(0x300),
            Err(Fault::StackOverflow {
                pc: MEM_START as Address,
                sp: STACK_SIZE
            })
        );

        for i in (0..STACK_SIZE).rev() {
            assert_eq!(cpu.pop_return(), Ok(0x200 + i as Address * 2));
        }
        assert_eq!(cpu.sp, 0);
        assert!(matches!(
            cpu.pop_return(),
            Err(Fault::StackUnderflow { sp: 0, .. })
        ));
    }

    #[test]
    fn test_timers_clamp() {
        let mut cpu = Chip8Cpu::default();
        cpu.delay_timer = 1;
        cpu.sound_timer = 1;

        cpu.tick_delay();
        assert!(cpu.tick_sound());
        assert_eq!(cpu.delay_timer, 0);
        assert_eq!(cpu.sound_timer, 0);

        cpu.tick_delay();
        assert!(!cpu.tick_sound());
        assert_eq!(cpu.delay_timer, 0);
        assert_eq!(cpu.sound_timer, 0);
    }

    #[test]
    fn test_font_loaded() {
        let mut cpu = Chip8Cpu::default();
        cpu.load_font();
        assert_eq!(&cpu.ram[0..5], &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(&cpu.ram[75..80], &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }
}
