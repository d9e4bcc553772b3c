//! Mode detection on a circular histogram (e.g. wind directions)

use acontrario_histogram::Histogram;
use acontrario_modality::{
    circular_detector, default_detector, ModeDetectorBuilder, RecordingObserver,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Circular Mode Detection ===\n");

    // 12 direction bins of 30 degrees; the prevailing wind blows from north,
    // so the peak straddles bin 11 and bin 0
    let counts = vec![
        42.0, 18.0, 4.0, 3.0, 2.0, 9.0, 11.0, 3.0, 2.0, 4.0, 15.0, 39.0,
    ];
    let histogram = Histogram::new(counts)?;
    println!("  {histogram}");

    println!("\n1. Linear detection (bins 0 and 11 are far apart)");
    let linear = default_detector().detect_modes(&histogram)?;
    for mode in linear.modes() {
        println!("    {mode}");
    }

    println!("\n2. Circular detection (bin 11 is next to bin 0)");
    let circular = circular_detector().detect_modes(&histogram)?;
    for mode in circular.modes() {
        let kind = if mode.is_wrapping() { "wraps" } else { "inner" };
        println!("    {mode} [{kind}]");
    }
    println!("  {}", circular.summary());

    println!("\n3. Detection stages with a recording observer");
    let detector = ModeDetectorBuilder::new(RecordingObserver::new())
        .epsilon(0.1)
        .circular(true)
        .build();
    let result = detector.detect_modes(&histogram)?;
    let trace = detector.observer().take();
    println!(
        "  threshold {:.4} over {} tested intervals",
        result.threshold(),
        trace.test_count.unwrap_or_default()
    );
    println!("  {} meaningful gaps", trace.gaps.len());
    for (mode, gap) in trace.suppressed.iter().take(5) {
        println!("    candidate {mode} dropped, contains gap {gap}");
    }
    println!("  {} maximal modes: {:?}", result.mode_count(), result.intervals());

    Ok(())
}
