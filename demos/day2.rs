// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 2 built using the `intcode_vm` library.
//!
//! Both parts poke a noun and verb into addresses 1 and 2, run, and read address 0. Part 2 reuses
//! a single interpreter, resetting it between attempts.

use intcode_vm::prelude::*;

fn run_with(i: &mut Interpreter, noun: i64, verb: i64) -> i64 {
    i.reset();
    i[1] = noun;
    i[2] = verb;
    let (output, state) = i.run_through_inputs(empty()).unwrap();
    assert_eq!(state, State::Halted, "intcode did not run to completion");
    assert!(output.is_empty(), "intcode had unexpected output");
    i[0]
}

fn part1(i: &mut Interpreter) -> i64 {
    run_with(i, 12, 2)
}

fn part2(i: &mut Interpreter) -> i64 {
    for noun in 0..=99 {
        for verb in 0..=99 {
            #[allow(clippy::unreadable_literal, reason = "from Advent of Code")]
            if run_with(i, noun, verb) == 19690720 {
                return 100 * noun + verb;
            }
        }
    }
    panic!("no answer found for part 2");
}

fn main() {
    use std::env::args_os;
    use std::fs::read_to_string;
    let input =
        read_to_string(args_os().nth(1).expect("missing file name")).expect("failed to read file");

    let mut interpreter = Interpreter::new(&input).expect("invalid intcode");
    println!("part 1: {}", part1(&mut interpreter));
    println!("part 2: {}", part2(&mut interpreter));
}
