//! Virtual machine.
use std::{
    fmt::{self, Write},
    time::Duration,
};

use rand::prelude::*;

use crate::{
    bytecode::{fetch, Opcode},
    clock::Clock,
    constants::*,
    cpu::Chip8Cpu,
    devices::{Buzzer, Keypad},
    error::{Chip8Error, Chip8Result, Fault},
    keymap::KeyMap,
    op::Op,
    Chip8DisplayBuffer,
};

pub struct Chip8Vm {
    cpu: Chip8Cpu,
    /// Instruction cadence.
    clock: Clock,
    /// Delay and sound timer cadence.
    timer: Clock,
    /// Number of instructions executed since the program was loaded.
    cycle_count: u64,
    rng: StdRng,
    conf: Chip8Conf,
}

impl Chip8Vm {
    pub fn new(conf: Chip8Conf) -> Self {
        let rng = match conf.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut cpu = Chip8Cpu::new();
        cpu.load_font();

        Chip8Vm {
            cpu,
            clock: Clock::new(conf.clock_frequency.unwrap_or_default().0),
            timer: Clock::new(DELAY_FREQUENCY),
            cycle_count: 0,
            rng,
            conf,
        }
    }

    pub fn load_bytecode(&mut self, bytecode: &[u8]) -> Chip8Result<()> {
        if bytecode.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::LargeProgram);
        }

        // Start with clean memory to avoid leaking previous program.
        // This also resets the program counter to prepare for execution.
        self.cpu.clear_memory();
        self.cpu.load_font();

        // Load program into virtual RAM
        self.cpu.ram[MEM_START..MEM_START + bytecode.len()].copy_from_slice(bytecode);

        self.reset();

        log::debug!(
            "loaded {} byte program, clock {} Hz",
            bytecode.len(),
            self.clock.frequency()
        );

        Ok(())
    }

    pub fn display_buffer(&self) -> Chip8DisplayBuffer<'_> {
        &self.cpu.display
    }

    /// State of the pixel at the given coordinate.
    ///
    /// Out of bounds coordinates are always off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT && self.cpu.display[x + y * DISPLAY_WIDTH]
    }
}

/// Register inspection
impl Chip8Vm {
    pub fn pc(&self) -> Address {
        self.cpu.pc
    }

    pub fn sp(&self) -> usize {
        self.cpu.sp
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.cpu.registers
    }

    /// Address register `I`.
    pub fn address(&self) -> Address {
        self.cpu.address
    }

    pub fn delay_timer(&self) -> u8 {
        self.cpu.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.cpu.sound_timer
    }

    pub fn is_buzzing(&self) -> bool {
        self.cpu.buzzer_state
    }

    /// Register that will receive the next released key, if the machine is waiting.
    pub fn waiting_key(&self) -> Option<u8> {
        self.cpu.waiting_key
    }

    pub fn memory(&self) -> &[u8] {
        &self.cpu.ram[..]
    }

    /// Instruction that the next step will execute.
    pub fn current_opcode(&self) -> Opcode {
        fetch(&self.cpu.ram, self.cpu.pc)
    }

    /// Fault that halted the machine.
    pub fn fault(&self) -> Option<Fault> {
        self.cpu.error
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Flow {
    Ok,
    /// Program counter has jumped to a new address.
    ///
    /// The program counter is not advanced past the instruction.
    ///
    /// This is returned when the interpreter encounters:
    ///
    /// - 1nnn (`JP addr`)
    /// - 2nnn (`CALL addr`)
    /// - Bnnn (`JP V0, addr`)
    Jump,
    /// The display buffer was changed.
    Draw,
    /// The sound timer was set.
    Sound,
    /// Wait for a keypress.
    ///
    /// This is triggered by the opcode `Fx0A` (`LD Vx, K`), which stops
    /// execution until a key is released, and loads the key value into `Vx`.
    KeyWait,
}

/// VM Configuration Parameters.
#[derive(Debug, Default, Clone)]
pub struct Chip8Conf {
    /// Instructions executed per second of elapsed time. Defaults to 750 Hz.
    pub clock_frequency: Option<Hz>,
    /// Seed for `Cxnn` (`RND Vx, byte`). Seeded from system entropy when omitted.
    pub rng_seed: Option<u64>,
    pub quirks: Quirks,
    pub keymap: KeyMap,
}

/// Switches between conflicting interpretations of instructions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 8xy7 (`SUBN Vx, Vy`) sets VF to 1 when `Vy >= Vx`, comparing the original
    /// operands.
    ///
    /// When off, VF is set when the result left in `Vx` is less than `Vy`, which
    /// differs when `Vx` is zero or when `x` and `y` are the same register.
    pub subn_borrow_flag: bool,
}

/// CPU clock frequency, in hertz (per second)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hz(pub u64);

impl Default for Hz {
    fn default() -> Self {
        Hz(CLOCK_FREQUENCY)
    }
}

/// Interpreter
impl Chip8Vm {
    /// Clear internal state in preparation for a fresh startup.
    fn reset(&mut self) {
        self.cycle_count = 0;
        self.clock.reset();
        self.timer.reset();
    }

    /// Execute exactly one instruction, then count down both timers once.
    ///
    /// Intended for stepping through a program, driven by user input
    /// instead of elapsed time.
    pub fn step(&mut self, keypad: &impl Keypad, buzzer: &mut impl Buzzer) -> Chip8Result<Flow> {
        self.check_trap()?;

        let flow = if self.poll_key_wait(keypad) {
            Flow::KeyWait
        } else {
            self.exec_next(keypad, buzzer)?
        };

        self.tick_timers(buzzer);

        Ok(flow)
    }

    /// Advance the machine by the time elapsed since the previous call.
    ///
    /// Instructions run at the configured clock frequency and the timers count
    /// down at 60 Hz, each drained from its own accumulator.
    ///
    /// Returns [`Flow::KeyWait`] if the machine is blocked on a key press,
    /// [`Flow::Draw`] if any instruction touched the display, otherwise [`Flow::Ok`].
    pub fn tick(
        &mut self,
        delta: Duration,
        keypad: &impl Keypad,
        buzzer: &mut impl Buzzer,
    ) -> Chip8Result<Flow> {
        self.check_trap()?;

        self.clock.advance(delta);
        self.timer.advance(delta);

        let mut control_flow = Flow::Ok;

        if self.poll_key_wait(keypad) {
            // Time spent blocked is not owed to the program afterwards.
            self.clock.reset();
            control_flow = Flow::KeyWait;
        } else {
            while self.clock.tick() {
                match self.exec_next(keypad, buzzer)? {
                    Flow::Draw => control_flow = Flow::Draw,
                    Flow::KeyWait => {
                        self.clock.reset();
                        control_flow = Flow::KeyWait;
                        break;
                    }
                    _ => {}
                }
            }
        }

        while self.timer.tick() {
            self.tick_timers(buzzer);
        }

        Ok(control_flow)
    }

    /// Step the machine a fixed number of times.
    pub fn run_steps(
        &mut self,
        step_count: usize,
        keypad: &impl Keypad,
        buzzer: &mut impl Buzzer,
    ) -> Chip8Result<Flow> {
        let mut control_flow = Flow::Ok;

        for _ in 0..step_count {
            control_flow = self.step(keypad, buzzer)?;
        }

        Ok(control_flow)
    }

    fn check_trap(&self) -> Chip8Result<()> {
        match self.cpu.error {
            Some(fault) => Err(Chip8Error::Runtime(fault)),
            None => Ok(()),
        }
    }

    /// Check the key wait gate.
    ///
    /// Returns `true` while the machine is blocked on `Fx0A`, including the
    /// poll that observes the key release. Execution resumes on the next call.
    fn poll_key_wait(&mut self, keypad: &impl Keypad) -> bool {
        let vx = match self.cpu.waiting_key {
            Some(vx) => vx,
            None => return false,
        };

        if let Some(key) = self.conf.keymap.first_released(keypad) {
            log::debug!("key wait: {key} released into v{vx:X}");
            self.cpu.registers[vx as usize] = key.as_u8();
            self.cpu.waiting_key = None;
        }

        true
    }

    /// Count down the delay and sound timers by one 60 Hz cycle.
    fn tick_timers(&mut self, buzzer: &mut impl Buzzer) {
        self.cpu.tick_delay();

        // Buzzer should be on while sound timer counts down,
        // then turned off when the timer reaches zero.
        if self.cpu.tick_sound() && self.cpu.buzzer_state {
            self.set_buzzer(buzzer, false);
        }
    }

    fn set_buzzer(&mut self, buzzer: &mut impl Buzzer, on: bool) {
        self.cpu.buzzer_state = on;
        if on {
            log::info!("tone on");
            buzzer.start_tone();
        } else {
            log::info!("tone off");
            buzzer.stop_tone();
        }
    }

    /// Fetch, decode and execute the instruction at the program counter.
    fn exec_next(&mut self, keypad: &impl Keypad, buzzer: &mut impl Buzzer) -> Chip8Result<Flow> {
        let pc = self.cpu.pc;
        let op = Op::decode(fetch(&self.cpu.ram, pc));
        op_trace(pc, &op);

        let control_flow = match self.exec(op, keypad, buzzer) {
            Ok(flow) => flow,
            Err(fault) => {
                log::error!("{fault}\n{}", self.dump_registers()?);
                self.cpu.error = Some(fault);
                return Err(Chip8Error::Runtime(fault));
            }
        };

        // Each instruction is two bytes.
        if control_flow != Flow::Jump {
            self.cpu.pc = self.cpu.pc.wrapping_add(2);
        }

        self.cycle_count += 1;

        Ok(control_flow)
    }

    /// Skip the next instruction when the condition holds.
    #[inline(always)]
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.cpu.pc = self.cpu.pc.wrapping_add(2);
        }
    }

    /// Execute a single decoded instruction.
    ///
    /// The program counter still points at the instruction being executed.
    fn exec(
        &mut self,
        op: Op,
        keypad: &impl Keypad,
        buzzer: &mut impl Buzzer,
    ) -> Result<Flow, Fault> {
        let mut control_flow = Flow::Ok;

        match op {
            Op::Sys { .. } => { /* No Op */ }
            Op::Unknown { code } => {
                log::warn!("{:04X}: skipping unknown opcode {code:04X}", self.cpu.pc);
            }
            // ----------------------------------------------------------------
            // 00E0 (CLS)
            //
            // Clear display
            Op::ClearScreen => {
                self.cpu.clear_display();
                control_flow = Flow::Draw;
            }
            // 00EE (RET)
            //
            // Return from a subroutine.
            // The popped address is that of the CALL, so the usual
            // advance moves past it.
            Op::Return => {
                self.cpu.pc = self.cpu.pop_return()?;
            }
            // 1nnn (JP addr)
            Op::JumpAddress { address } => {
                self.cpu.pc = address;
                control_flow = Flow::Jump;
            }
            // 2nnn (CALL addr)
            //
            // Call subroutine at NNN.
            Op::Call { address } => {
                self.cpu.push_return(self.cpu.pc)?;
                self.cpu.pc = address;
                control_flow = Flow::Jump;
            }
            // 3xnn (SE Vx, byte)
            Op::Skip_Eq_Byte { vx, nn } => {
                self.skip_if(self.cpu.registers[vx as usize] == nn);
            }
            // 4xnn (SNE Vx, byte)
            Op::Skip_NotEq_Byte { vx, nn } => {
                self.skip_if(self.cpu.registers[vx as usize] != nn);
            }
            // 5xy0 (SE Vx, Vy)
            Op::Skip_Eq { vx, vy } => {
                let (x, y) = self.operands(vx, vy);
                self.skip_if(x == y);
            }
            // 6xnn (LD Vx, byte)
            Op::Load_Byte { vx, nn } => {
                self.cpu.registers[vx as usize] = nn;
            }
            // 7xnn (ADD Vx, byte)
            //
            // Carry flag is not set.
            Op::Add_Byte { vx, nn } => {
                let x = self.cpu.registers[vx as usize];
                self.cpu.registers[vx as usize] = x.wrapping_add(nn);
            }
            // Arithmetic
            Op::Load_Vx_Vy { .. }
            | Op::Or_Vx_Vy { .. }
            | Op::And_Vx_Vy { .. }
            | Op::Xor_Vx_Vy { .. }
            | Op::Add_Vx_Vy { .. }
            | Op::Sub_Vx_Vy { .. }
            | Op::ShiftRight { .. }
            | Op::SubReverse_Vx_Vy { .. }
            | Op::ShiftLeft { .. } => self.exec_math(op),
            // 9xy0 (SNE Vx, Vy)
            Op::Skip_NotEq { vx, vy } => {
                let (x, y) = self.operands(vx, vy);
                self.skip_if(x != y);
            }
            // Annn (LD I, addr)
            Op::Load_Address { address } => {
                self.cpu.address = address;
            }
            // Bnnn (JP V0, addr)
            Op::Jump_V0 { address } => {
                self.cpu.pc = address.wrapping_add(self.cpu.registers[0] as Address);
                control_flow = Flow::Jump;
            }
            // Cxnn (RND Vx, byte)
            //
            // Random byte modulo NN. Modulo zero has no meaning, so yields zero.
            Op::Random { vx, nn } => {
                let value = if nn == 0 {
                    0
                } else {
                    self.rng.gen::<u8>() % nn
                };
                self.cpu.registers[vx as usize] = value;
            }
            Op::Draw { vx, vy, n } => {
                self.exec_draw(vx, vy, n);
                control_flow = Flow::Draw;
            }
            // Keyboard and timers
            Op::Skip_KeyPressed { .. }
            | Op::Skip_KeyNotPressed { .. }
            | Op::Load_Vx_Delay { .. }
            | Op::WaitKey { .. }
            | Op::Load_Delay_Vx { .. }
            | Op::Load_Sound_Vx { .. }
            | Op::Add_Address_Vx { .. }
            | Op::Load_Font { .. }
            | Op::Load_Bcd { .. }
            | Op::Store_Registers { .. }
            | Op::Load_Registers { .. } => control_flow = self.exec_misc(op, keypad, buzzer),
        }

        Ok(control_flow)
    }

    #[inline(always)]
    fn operands(&self, vx: u8, vy: u8) -> (u8, u8) {
        (
            self.cpu.registers[vx as usize],
            self.cpu.registers[vy as usize],
        )
    }

    /// Execute an arithmetic instruction.
    ///
    /// The result is written to `Vx` before the flag, so when `x` is `F`
    /// the flag wins.
    fn exec_math(&mut self, op: Op) {
        match op {
            // 8xy0 (LD Vx, Vy)
            Op::Load_Vx_Vy { vx, vy } => {
                self.cpu.registers[vx as usize] = self.cpu.registers[vy as usize];
            }
            // 8xy1 (OR Vx, Vy)
            //
            // VF is reset.
            Op::Or_Vx_Vy { vx, vy } => {
                self.cpu.registers[vx as usize] |= self.cpu.registers[vy as usize];
                self.cpu.set_flag(false);
            }
            // 8xy2 (AND Vx, Vy)
            Op::And_Vx_Vy { vx, vy } => {
                self.cpu.registers[vx as usize] &= self.cpu.registers[vy as usize];
                self.cpu.set_flag(false);
            }
            // 8xy3 (XOR Vx, Vy)
            Op::Xor_Vx_Vy { vx, vy } => {
                self.cpu.registers[vx as usize] ^= self.cpu.registers[vy as usize];
                self.cpu.set_flag(false);
            }
            // 8xy4 (ADD Vx, Vy)
            //
            // If overflow, set VF to 1, else 0.
            Op::Add_Vx_Vy { vx, vy } => {
                let (x, y) = self.operands(vx, vy);
                let (result, carry) = x.overflowing_add(y);
                self.cpu.registers[vx as usize] = result;
                self.cpu.set_flag(carry);
            }
            // 8xy5 (SUB Vx, Vy)
            //
            // VF is 1 when Vx is strictly greater than Vy.
            Op::Sub_Vx_Vy { vx, vy } => {
                let (x, y) = self.operands(vx, vy);
                self.cpu.registers[vx as usize] = x.wrapping_sub(y);
                self.cpu.set_flag(x > y);
            }
            // 8xy6 (SHR Vx)
            //
            // VF is the bit shifted out. VY is unused.
            Op::ShiftRight { vx } => {
                let x = self.cpu.registers[vx as usize];
                self.cpu.registers[vx as usize] = x >> 1;
                self.cpu.set_flag(x & 1 == 1);
            }
            // 8xy7 (SUBN Vx, Vy)
            //
            // Subtracts VX from VY, and stores the result in VX.
            Op::SubReverse_Vx_Vy { vx, vy } => {
                let (x, y) = self.operands(vx, vy);
                self.cpu.registers[vx as usize] = y.wrapping_sub(x);

                let flag = if self.conf.quirks.subn_borrow_flag {
                    y >= x
                } else {
                    // Compared after the result has been written.
                    let (x, y) = self.operands(vx, vy);
                    x < y
                };
                self.cpu.set_flag(flag);
            }
            // 8xyE (SHL Vx)
            //
            // VF is the bit shifted out. VY is unused.
            Op::ShiftLeft { vx } => {
                let x = self.cpu.registers[vx as usize];
                self.cpu.registers[vx as usize] = x << 1;
                self.cpu.set_flag(x >> 7 == 1);
            }
            _ => unreachable!("not an arithmetic instruction: {op:?}"),
        }
    }

    /// Dxyn (DRW Vx, Vy, nibble)
    ///
    /// Draw sprite to the display buffer, at coordinate as per registers Vx and Vy.
    /// Sprite is encoded as 8 pixels wide, N pixels high, stored in bits located in
    /// memory pointed to by address register I.
    ///
    /// Pixels that fall outside of the display area are clipped.
    ///
    /// If the drawing operation erases existing pixels in the display buffer, register VF is set to
    /// 1, and set to 0 if no display bits are unset. This is used for collision detection.
    fn exec_draw(&mut self, vx: u8, vy: u8, n: u8) {
        let (x, y) = self.operands(vx, vy);
        let (x, y) = (x as usize, y as usize);
        let mut is_erased = false;

        for r in 0..n as usize {
            let row = self.cpu.read(self.cpu.address as usize + r);
            let py = y + r;
            if py >= DISPLAY_HEIGHT {
                break;
            }

            // Each row is 8 bits representing the 8 pixels of the sprite.
            for c in 0..SPRITE_WIDTH {
                let px = x + c;
                if px >= DISPLAY_WIDTH {
                    break;
                }

                let d = px + py * DISPLAY_WIDTH;
                let old_px = self.cpu.display[d];
                let new_px = (row >> (7 - c) & 1) != 0;

                // XOR erases a pixel when both the old and new values are both 1.
                is_erased |= old_px && new_px;

                self.cpu.display[d] = old_px ^ new_px;
            }
        }

        self.cpu.set_flag(is_erased);
    }

    /// Execute a keyboard, timer or memory instruction.
    fn exec_misc(&mut self, op: Op, keypad: &impl Keypad, buzzer: &mut impl Buzzer) -> Flow {
        let mut control_flow = Flow::Ok;

        match op {
            // Ex9E (SKP Vx)
            Op::Skip_KeyPressed { vx } => {
                let key_id = self.cpu.registers[vx as usize];
                self.skip_if(self.conf.keymap.is_held(keypad, key_id));
            }
            // ExA1 (SKNP Vx)
            Op::Skip_KeyNotPressed { vx } => {
                let key_id = self.cpu.registers[vx as usize];
                self.skip_if(!self.conf.keymap.is_held(keypad, key_id));
            }
            // Fx07 (LD Vx, DT)
            Op::Load_Vx_Delay { vx } => {
                self.cpu.registers[vx as usize] = self.cpu.delay_timer;
            }
            // Fx0A (LD Vx, K)
            //
            // Wait for a key release, store the value of the key in Vx.
            // All execution stops until then. The gate is checked before
            // every following instruction.
            Op::WaitKey { vx } => {
                self.cpu.waiting_key = Some(vx);
                control_flow = Flow::KeyWait;
            }
            // Fx15 (LD DT, Vx)
            Op::Load_Delay_Vx { vx } => {
                self.cpu.delay_timer = self.cpu.registers[vx as usize];
            }
            // Fx18 (LD ST, Vx)
            Op::Load_Sound_Vx { vx } => {
                self.cpu.sound_timer = self.cpu.registers[vx as usize];

                let on = self.cpu.sound_timer > 0;
                if on != self.cpu.buzzer_state {
                    self.set_buzzer(buzzer, on);
                }
                control_flow = Flow::Sound;
            }
            // Fx1E (ADD I, Vx)
            Op::Add_Address_Vx { vx } => {
                let x = self.cpu.registers[vx as usize] as Address;
                self.cpu.address = self.cpu.address.wrapping_add(x);
            }
            // Fx29 (LD F, Vx)
            //
            // Set I = location of sprite for digit Vx.
            Op::Load_Font { vx } => {
                let x = self.cpu.registers[vx as usize] as Address;
                self.cpu.address = FONTSET_START + x * FONTSET_HEIGHT as Address;
            }
            // Fx33 (LD B, Vx)
            //
            // Store the binary-coded decimal representation of Vx
            // in the memory locations I, I+1, and I+2.
            #[rustfmt::skip]
            Op::Load_Bcd { vx } => {
                let addr = self.cpu.address as usize;
                let x = self.cpu.registers[vx as usize];
                self.cpu.write(addr,     x / 100);
                self.cpu.write(addr + 1, x / 10 % 10);
                self.cpu.write(addr + 2, x % 10);
            }
            // Fx55 (LD [I], Vx)
            //
            // Store registers V0 through Vx in memory starting at location I.
            // I is left pointing just past the last stored byte.
            Op::Store_Registers { vx } => {
                for v in 0..=vx as usize {
                    let addr = self.cpu.address as usize;
                    self.cpu.write(addr, self.cpu.registers[v]);
                    self.cpu.address = self.cpu.address.wrapping_add(1);
                }
            }
            // Fx65 (LD Vx, [I])
            //
            // Read registers V0 through Vx from memory starting at location I.
            Op::Load_Registers { vx } => {
                for v in 0..=vx as usize {
                    self.cpu.registers[v] = self.cpu.read(self.cpu.address as usize);
                    self.cpu.address = self.cpu.address.wrapping_add(1);
                }
            }
            _ => unreachable!("not a miscellaneous instruction: {op:?}"),
        }

        control_flow
    }
}

/// Troubleshooting
impl Chip8Vm {
    /// Returns the first `count` bytes of program memory as a human readable string,
    /// one instruction word per line.
    pub fn dump_ram(&self, count: usize) -> Result<String, fmt::Error> {
        let iter = self
            .cpu
            .ram
            .iter()
            .enumerate()
            .skip(MEM_START)
            .take(count)
            .step_by(2);
        let mut buf = String::new();

        for (i, op) in iter {
            writeln!(buf, "{:04X}: {:02X}{:02X}", i, op, self.cpu.read(i + 1))?;
        }

        Ok(buf)
    }

    pub fn dump_display(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if self.cpu.display[x + y * DISPLAY_WIDTH] {
                    write!(buf, "#")?;
                } else {
                    write!(buf, ".")?;
                }
            }
            writeln!(buf)?;
        }

        Ok(buf)
    }

    pub fn dump_registers(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        write!(
            buf,
            "PC: {:03X} I: {:03X} SP: {:X} DT: {} ST: {}",
            self.cpu.pc,
            self.cpu.address,
            self.cpu.sp,
            self.cpu.delay_timer,
            self.cpu.sound_timer
        )?;

        for (i, v) in self.cpu.registers.iter().enumerate() {
            if i % 8 == 0 {
                writeln!(buf)?;
            }
            write!(buf, "v{i:X}: {v:3} ")?;
        }

        Ok(buf)
    }
}

#[cfg(feature = "op_trace")]
#[inline]
fn op_trace(pc: Address, op: &Op) {
    log::trace!("{:04X}: {}", pc, op);
}

#[cfg(not(feature = "op_trace"))]
#[inline]
fn op_trace(_: Address, _: &Op) {}
