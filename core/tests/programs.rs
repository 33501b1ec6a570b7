use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chippy_core::{Chip8, Chip8Error, Config, UnknownOpcodePolicy};

/// Assemble big-endian opcodes into a ROM image
fn rom(ops: &[u16]) -> Vec<u8> {
    ops.iter().flat_map(|op| op.to_be_bytes().to_vec()).collect()
}

fn run_steps(chip8: &mut Chip8, steps: usize) {
    for _ in 0..steps {
        chip8.step().unwrap();
    }
}

#[test]
fn subroutine_counts_in_a_loop() {
    let mut chip8 = Chip8::new();
    chip8
        .load_rom(&rom(&[
            0x6000, // 200: V0 = 0
            0x220A, // 202: call 20A
            0x3005, // 204: skip if V0 == 5
            0x1202, // 206: jump 202
            0x1208, // 208: halt
            0x7001, // 20A: V0 += 1
            0x00EE, // 20C: return
        ]))
        .unwrap();
    run_steps(&mut chip8, 1 + 4 * 5 + 4);
    assert_eq!(chip8.cpu().v(0x0), 5);
    assert_eq!(chip8.cpu().pc(), 0x208);
    assert_eq!(chip8.cpu().sp(), 0);
}

#[test]
fn draws_digit_and_reports_collision_on_redraw() {
    let mut chip8 = Chip8::new();
    chip8
        .load_rom(&rom(&[
            0x6107, // V1 = 7
            0xF129, // I = sprite(V1)
            0x6A0A, // VA = 10
            0x6B05, // VB = 5
            0xDAB5, // draw
            0xDAB5, // erase
        ]))
        .unwrap();
    run_steps(&mut chip8, 5);
    // top row of 7 is 0xF0
    let frame = *chip8.get_frame().unwrap();
    assert_eq!(frame[5][10..14], [1, 1, 1, 1]);
    assert_eq!(chip8.cpu().v(0xF), 0);
    chip8.acknowledge_frame();

    chip8.step().unwrap();
    let frame = chip8.get_frame().unwrap();
    assert!(frame.iter().flatten().all(|&p| p == 0));
    assert_eq!(chip8.cpu().v(0xF), 1);
}

#[test]
fn bcd_and_register_load_round_trip() {
    let mut chip8 = Chip8::new();
    chip8
        .load_rom(&rom(&[
            0x60FE, // V0 = 254
            0xA300, // I = 300
            0xF033, // mem[300..303] = 2, 5, 4
            0xF265, // V0..=V2 = mem[300..303]
        ]))
        .unwrap();
    run_steps(&mut chip8, 4);
    assert_eq!(&chip8.cpu().registers()[..3], &[2, 5, 4]);
    assert_eq!(chip8.memory().read(0x300, 3).unwrap(), &[2, 5, 4]);
}

#[test]
fn oversized_rom_is_rejected_before_execution() {
    let mut chip8 = Chip8::new();
    let image = vec![0x12; 0xE01];
    assert!(matches!(
        chip8.load_rom(&image),
        Err(Chip8Error::ImageTooLarge { .. })
    ));
    assert!(chip8.memory().as_slice()[0x200..].iter().all(|&b| b == 0));
}

#[test]
fn rom_loads_from_reader() {
    let mut chip8 = Chip8::new();
    let image = rom(&[0x6A08]);
    chip8.load_rom_from(&mut image.as_slice()).unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.cpu().v(0xA), 8);
}

#[test]
fn strict_machine_halts_on_unknown_opcode() {
    let mut chip8 = Chip8::with_config(Config {
        unknown_opcode: UnknownOpcodePolicy::Fail,
        ..Config::default()
    });
    chip8.load_rom(&rom(&[0x6001, 0x0123])).unwrap();
    let stop = AtomicBool::new(false);
    match chip8.run(&stop) {
        Err(Chip8Error::UnknownOpcode { opcode, pc }) => {
            assert_eq!(opcode, 0x0123);
            assert_eq!(pc, 0x202);
        }
        other => panic!("expected UnknownOpcode, got {:?}", other),
    }
}

#[test]
fn lenient_machine_skips_unknown_opcode() {
    let mut chip8 = Chip8::new();
    chip8.load_rom(&rom(&[0x0123, 0x6A01])).unwrap();
    run_steps(&mut chip8, 2);
    assert_eq!(chip8.cpu().v(0xA), 1);
}

#[test]
fn runaway_recursion_overflows_the_stack() {
    let mut chip8 = Chip8::new();
    chip8.load_rom(&rom(&[0x2200])).unwrap();
    let stop = AtomicBool::new(false);
    assert!(matches!(
        chip8.run(&stop),
        Err(Chip8Error::StackOverflow { pc: 0x200 })
    ));
    assert_eq!(chip8.cpu().sp(), 16);
}

#[test]
fn host_can_stop_an_endless_loop() {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let worker = thread::spawn(move || {
        let mut chip8 = Chip8::new();
        chip8.load_rom(&rom(&[0x7001, 0x1200])).unwrap();
        chip8.run(&flag)
    });
    thread::sleep(Duration::from_millis(20));
    stop.store(true, Ordering::Relaxed);
    worker.join().unwrap().unwrap();
}

#[test]
fn delay_timer_counts_down_from_another_thread() {
    let mut chip8 = Chip8::new();
    chip8
        .load_rom(&rom(&[
            0x603C, // V0 = 60
            0xF015, // DT = V0
            0xF107, // V1 = DT
        ]))
        .unwrap();
    run_steps(&mut chip8, 2);
    let timer = chip8.delay_timer();
    thread::spawn(move || {
        for _ in 0..10 {
            timer.tick();
        }
    })
    .join()
    .unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.cpu().v(0x1), 50);
}
