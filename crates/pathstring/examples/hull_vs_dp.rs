//! Timing probe: full pattern sweep with the DP vs. hull jumping.
//!
//! Purpose
//! - Give a concrete number for "how long does the exact sweep take at n
//!   points, and how much of it does hull jumping recover?"
//!
//! Why this shape
//! - One seeded general-position set per n, so reruns are comparable.
//! - The DP sweep shares one session; hull jumping has no memo and runs per
//!   pattern.
//!
//! Code: crates/pathstring/src/batch.rs::enumerate_patterns,
//! crates/pathstring/src/hull_jump.rs::hull_jump

use std::time::Instant;

use pathstring::api::{
    draw_general_position, enumerate_patterns, hull_jump, GeomCfg, PathString, PointCfg,
    ReplayToken,
};

fn main() {
    let geom = GeomCfg::default();
    for n in 4..=10usize {
        let tok = ReplayToken::new(2024, 0);
        let points = draw_general_position(PointCfg::with_count(n), geom, tok)
            .expect("sampler succeeds for small n");

        let dp_start = Instant::now();
        let summary = enumerate_patterns(&points, geom, &mut ()).expect("dp sweep");
        let dp_ms = dp_start.elapsed().as_secs_f64() * 1e3;

        let hj_start = Instant::now();
        let mut jumped = 0usize;
        for p in PathString::all(n - 1).expect("length in range") {
            jumped += hull_jump(&points, p).expect("matching length").len();
        }
        let hj_ms = hj_start.elapsed().as_secs_f64() * 1e3;

        println!(
            "n={n} dp_paths={} hull_jump_paths={jumped} memo={} dp_ms={dp_ms:.3} hull_jump_ms={hj_ms:.3}",
            summary.total_paths(),
            summary.memo_entries,
        );
    }
}
