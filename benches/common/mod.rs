#![allow(dead_code)]
use std::path::Path;

use mython::ast::Program;
use mython::parser;
use test_support::bench_cases;

const PROGRAMS_DIR: &str = "tests/programs";

/// `(label, source)` for every corpus case flagged for benchmarking.
pub fn workloads() -> Vec<(String, String)> {
    bench_cases(Path::new(PROGRAMS_DIR))
        .unwrap_or_else(|err| panic!("load bench cases: {err:#}"))
        .into_iter()
        .map(|case| {
            let source = case
                .read_program()
                .unwrap_or_else(|err| panic!("read {}: {err:#}", case.name));
            (case.name, source)
        })
        .collect()
}

pub fn load_program(source: &str) -> Program {
    parser::parse(source).unwrap_or_else(|err| panic!("parse: {err}"))
}
