use std::time::Duration;

use chip8::prelude::*;

/// Sets the delay timer from `v0`, then runs straight through memory
/// without jumping.
fn straight_program(delay: u8) -> Vec<u8> {
    let mut rom = vec![0x60, delay, 0xF0, 0x15];
    // LD v1, 1
    rom.extend([0x61, 0x01].repeat(1000));
    rom
}

fn load(rom: &[u8]) -> Chip8Vm {
    let mut vm = Chip8Vm::new(Chip8Conf::default());
    vm.load_bytecode(rom).unwrap();
    vm
}

#[test]
fn test_one_second() {
    let mut vm = load(&straight_program(100));
    let input = InputState::new();

    vm.tick(Duration::from_secs(1), &input, &mut ()).unwrap();

    assert_eq!(vm.cycle_count(), 750);
    assert_eq!(vm.pc(), 0x200 + 750 * 2);
    assert_eq!(vm.delay_timer(), 40);
}

#[test]
fn test_uneven_deltas_add_up() {
    let mut vm = load(&straight_program(100));
    let input = InputState::new();

    for millis in [123, 250, 1, 333, 293] {
        vm.tick(Duration::from_millis(millis), &input, &mut ())
            .unwrap();
    }

    assert_eq!(vm.cycle_count(), 750);
    assert_eq!(vm.delay_timer(), 40);
}

#[test]
fn test_small_deltas_carry_over() {
    let mut vm = load(&straight_program(0));
    let input = InputState::new();

    // Shorter than a single instruction
    vm.tick(Duration::from_micros(1000), &input, &mut ())
        .unwrap();
    assert_eq!(vm.cycle_count(), 0);

    vm.tick(Duration::from_micros(400), &input, &mut ())
        .unwrap();
    assert_eq!(vm.cycle_count(), 1);
}

#[test]
fn test_timers_clamp_at_zero() {
    let mut vm = load(&straight_program(30));
    let input = InputState::new();

    vm.tick(Duration::from_secs(1), &input, &mut ()).unwrap();
    assert_eq!(vm.delay_timer(), 0);
    assert_eq!(vm.sound_timer(), 0);
}

#[test]
fn test_custom_frequency() {
    let mut vm = Chip8Vm::new(Chip8Conf {
        clock_frequency: Some(Hz(500)),
        ..Default::default()
    });
    vm.load_bytecode(&straight_program(0)).unwrap();

    vm.tick(Duration::from_millis(100), &InputState::new(), &mut ())
        .unwrap();
    assert_eq!(vm.cycle_count(), 50);
}

/// Timers keep counting down while the machine waits for a key.
#[test]
#[rustfmt::skip]
fn test_timers_run_during_key_wait() {
    let mut vm = load(&[
        0x60, 0x3C, // LD v0, 60
        0xF0, 0x15, // LD DT, v0
        0xF1, 0x0A, // LD v1, K
        0x62, 0x01, // LD v2, 1
    ]);
    let mut input = InputState::new();

    let flow = vm.tick(Duration::from_millis(500), &input, &mut ()).unwrap();
    assert_eq!(flow, Flow::KeyWait);
    assert_eq!(vm.cycle_count(), 3);
    assert_eq!(vm.delay_timer(), 30);

    let flow = vm.tick(Duration::from_millis(250), &input, &mut ()).unwrap();
    assert_eq!(flow, Flow::KeyWait);
    assert_eq!(vm.cycle_count(), 3);
    assert_eq!(vm.delay_timer(), 15);

    input.press('E');
    input.release('E');
    let flow = vm.tick(Duration::from_millis(250), &input, &mut ()).unwrap();
    input.end_poll();
    assert_eq!(flow, Flow::KeyWait);
    assert_eq!(vm.registers()[1], 6);
    assert_eq!(vm.waiting_key(), None);
    assert_eq!(vm.delay_timer(), 0);

    // Time spent waiting is not made up for.
    let flow = vm.tick(Duration::from_millis(4), &input, &mut ()).unwrap();
    assert_eq!(flow, Flow::Ok);
    assert_eq!(vm.cycle_count(), 6);
    assert_eq!(vm.registers()[2], 1);
}

#[test]
fn test_tick_reports_draw() {
    // CLS, then jump to self
    let mut vm = load(&[0x00, 0xE0, 0x12, 0x02]);
    let input = InputState::new();

    let flow = vm.tick(Duration::from_millis(20), &input, &mut ()).unwrap();
    assert_eq!(flow, Flow::Draw);

    let flow = vm.tick(Duration::from_millis(20), &input, &mut ()).unwrap();
    assert_eq!(flow, Flow::Ok);
    assert_eq!(vm.pc(), 0x202);
}
