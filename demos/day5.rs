// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! A solution to Advent of Code 2019 Day 5 built using the `intcode_vm` library.

use intcode_vm::prelude::*;

fn diagnose(i: &mut Interpreter, system_id: i64) -> i64 {
    i.reset();
    let (mut outputs, State::Halted) = i.run_through_inputs([system_id]).unwrap() else {
        panic!("diagnostic program wanted more input");
    };
    let diagnostic = outputs.pop().unwrap();
    assert!(outputs.into_iter().all(|i| i == 0), "diagnostic failed");

    diagnostic
}

fn main() {
    use std::env::args_os;
    use std::fs::read_to_string;
    let input =
        read_to_string(args_os().nth(1).expect("missing file name")).expect("failed to read file");

    let mut interpreter = Interpreter::new(&input).expect("invalid intcode");
    println!("part 1: {}", diagnose(&mut interpreter, 1));
    println!("part 2: {}", diagnose(&mut interpreter, 5));
}
