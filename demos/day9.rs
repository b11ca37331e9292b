// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 9 built using the `intcode_vm` library.

use intcode_vm::prelude::*;

fn boost(mut i: Interpreter, mode: i64) -> i64 {
    i.input_mut().add(mode);
    assert_eq!(i.run(), Ok(State::Halted));
    let outputs: Vec<i64> = i.output_mut().drain().collect();
    assert_eq!(outputs.len(), 1, "malfunctioning opcodes: {outputs:?}");
    outputs[0]
}

fn main() {
    use std::env::args_os;
    use std::fs::read_to_string;
    env_logger::init();
    let input =
        read_to_string(args_os().nth(1).expect("missing file name")).expect("failed to read file");

    let interpreter = Interpreter::new(&input).expect("invalid intcode");
    println!("part 1: {}", boost(interpreter.clone(), 1));
    println!("part 2: {}", boost(interpreter, 2));
}
