//! Scan fuzz target: feed arbitrary bytes to the metafile scanner.
//! Opening and scanning must not panic; every failure is an `EmfError`.
//! Build with: cargo fuzz run scan_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let file = match emfcore::EmfFile::open(data) {
        Ok(f) => f,
        Err(_) => return,
    };
    let _ = file.enumerate_records(|_| emfcore::Flow::Continue);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run scan_fuzz");
}
