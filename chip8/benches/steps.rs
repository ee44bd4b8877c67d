use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chip8::prelude::*;

/// Endless maze of random diagonal lines.
#[rustfmt::skip]
const MAZE: &[u8] = &[
    0xA2, 0x20, // 200: LD I, 0x220
    0xC2, 0x02, // 202: RND v2, 2
    0x32, 0x01, // 204: SE v2, 1
    0xA2, 0x1C, // 206: LD I, 0x21C
    0xD0, 0x14, // 208: DRW v0, v1, 4
    0x70, 0x04, // 20A: ADD v0, 4
    0x30, 0x40, // 20C: SE v0, 64
    0x12, 0x00, // 20E: JP 0x200
    0x60, 0x00, // 210: LD v0, 0
    0x71, 0x04, // 212: ADD v1, 4
    0x31, 0x20, // 214: SE v1, 32
    0x12, 0x00, // 216: JP 0x200
    0x61, 0x00, // 218: LD v1, 0
    0x12, 0x00, // 21A: JP 0x200
    0x80, 0x40, 0x20, 0x10, // 21C: sprite \
    0x10, 0x20, 0x40, 0x80, // 220: sprite /
];

fn criterion_benchmark(c: &mut Criterion) {
    let input = InputState::new();

    {
        let mut vm = Chip8Vm::new(Chip8Conf {
            rng_seed: Some(1),
            ..Default::default()
        });
        vm.load_bytecode(MAZE).unwrap();

        c.bench_function("maze steps", |b| {
            b.iter(|| {
                let step_count = black_box(1000_usize);
                black_box(vm.run_steps(step_count, &input, &mut ()).unwrap())
            })
        });
    }

    {
        let mut vm = Chip8Vm::new(Chip8Conf {
            rng_seed: Some(1),
            ..Default::default()
        });
        vm.load_bytecode(MAZE).unwrap();

        c.bench_function("maze frame", |b| {
            b.iter(|| {
                let delta = black_box(Duration::from_nanos(16_666_667));
                black_box(vm.tick(delta, &input, &mut ()).unwrap())
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
