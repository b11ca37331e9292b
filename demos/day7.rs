// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 7 built using the `intcode_vm` library.
//!
//! Five amplifiers are wired together with [SharedQueue]s, each one's output being the next one's
//! input. In part 2, the last feeds back into the first, and they're run round-robin until all
//! of them have halted.

use intcode_vm::prelude::*;
use intcode_vm::{Program, SharedQueue};
use itertools::Itertools;

type Amplifier = Interpreter<SharedQueue, SharedQueue>;

fn thrust(program: &Program, phases: &[i64]) -> i64 {
    let queues: Vec<SharedQueue> = phases
        .iter()
        .map(|&phase| SharedQueue::from(IoQueue::from([phase])))
        .collect();
    let mut first_input = queues[0].clone();
    first_input.add(0);

    let mut amps: Vec<Amplifier> = (0..queues.len())
        .map(|i| {
            Interpreter::with_config(
                program.clone(),
                Default::default(),
                queues[i].clone(),
                queues[(i + 1) % queues.len()].clone(),
            )
        })
        .collect();

    while !amps.iter().all(Amplifier::is_halted) {
        for amp in &mut amps {
            amp.run().expect("amplifier failed");
        }
    }
    first_input.try_get_next().expect("no signal reached the thrusters")
}

fn best_thrust(program: &Program, phases: [i64; 5]) -> i64 {
    phases
        .into_iter()
        .permutations(5)
        .map(|perm| thrust(program, &perm))
        .max()
        .unwrap()
}

fn main() {
    use std::env::args_os;
    use std::fs::read_to_string;
    let input =
        read_to_string(args_os().nth(1).expect("missing file name")).expect("failed to read file");

    let program = Program::parse(&input).expect("invalid intcode");
    println!("part 1: {}", best_thrust(&program, [0, 1, 2, 3, 4]));
    println!("part 2: {}", best_thrust(&program, [5, 6, 7, 8, 9]));
}
