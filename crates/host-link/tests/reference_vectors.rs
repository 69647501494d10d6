//! Cycle-by-cycle comparison against traces recorded from the reference
//! link model.
//!
//! Each file in `tests/vectors/` holds one geometry, the memory image, the
//! inbound sample stream and everything the reference produced for it: the
//! outbound stream, each published sample with the cycle it appeared on,
//! and the final state ring.

use host_link::{BitSerial, HostLink, LinkGeometry};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct Geometry {
    io_bits: u8,
    payload_cycles: u8,
    state_words: usize,
    full_state_words: usize,
}

#[derive(Deserialize)]
struct Trace {
    name: String,
    geometry: Geometry,
    memory: Vec<u32>,
    inbound: Vec<u8>,
    outbound: Vec<u8>,
    /// `(cycle, raw sample word)`
    samples: Vec<(u64, u32)>,
    final_ring: Vec<u32>,
    final_cursor: usize,
}

fn run(trace: &Trace) -> Vec<String> {
    let geometry = LinkGeometry::new(
        trace.geometry.io_bits,
        trace.geometry.payload_cycles,
        trace.geometry.state_words,
        trace.geometry.full_state_words,
    );
    let mut link = HostLink::new(geometry, trace.memory.as_slice())
        .unwrap_or_else(|e| panic!("{}: {e}", trace.name));

    let mut errors = Vec::new();
    let mut samples = Vec::new();

    for (cycle, (&rx, &want)) in trace.inbound.iter().zip(&trace.outbound).enumerate() {
        let got = link.advance(rx);
        if got != want && errors.len() < 10 {
            errors.push(format!(
                "cycle {cycle}: tx got {got:#X}, want {want:#X} (rx={rx:#X})"
            ));
        }
        if link.new_sample() {
            samples.push((cycle as u64, link.sample()));
            link.clear_new_sample();
        }
    }

    if samples != trace.samples {
        errors.push(format!(
            "samples: got {samples:?}, want {:?}",
            trace.samples
        ));
    }
    if link.ring().words() != trace.final_ring.as_slice() {
        errors.push(format!(
            "ring: got {:?}, want {:?}",
            link.ring().words(),
            trace.final_ring
        ));
    }
    if link.ring().cursor() != trace.final_cursor {
        errors.push(format!(
            "cursor: got {}, want {}",
            link.ring().cursor(),
            trace.final_cursor
        ));
    }
    errors
}

#[test]
fn reference_traces() {
    let pattern = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/vectors/*.json");
    let paths: Vec<_> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .filter_map(Result::ok)
        .collect();
    assert!(!paths.is_empty(), "no traces under {}", pattern.display());

    let mut failures = Vec::new();
    for path in &paths {
        let data = fs::read_to_string(path).unwrap_or_else(|e| {
            panic!("Failed to read {}: {e}", path.display());
        });
        let trace: Trace = serde_json::from_str(&data).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {e}", path.display());
        });
        assert_eq!(
            trace.inbound.len(),
            trace.outbound.len(),
            "{}: stream lengths differ",
            trace.name
        );

        let errors = run(&trace);
        let status = if errors.is_empty() { "PASS" } else { "FAIL" };
        println!(
            "{} ({} cycles, {} samples): {status}",
            trace.name,
            trace.inbound.len(),
            trace.samples.len()
        );
        for e in &errors {
            println!("  {e}");
        }
        if !errors.is_empty() {
            failures.push(trace.name);
        }
    }

    assert!(failures.is_empty(), "trace mismatches: {failures:?}");
}
