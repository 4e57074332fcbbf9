use ledger_measurement_bot::stats::{mean, population_std_dev, round1, Histo};
use pretty_assertions::assert_eq;

#[test]
fn mean_and_population_std_dev_match_reference_values() {
    let samples = [10.0, 20.0, 30.0];
    assert_eq!(mean(&samples), 20.0);
    // Population std dev (divide by N): sqrt(200/3) ≈ 8.1650, printed as 8.2.
    assert_eq!(round1(population_std_dev(&samples)), 8.2);
}

#[test]
fn empty_sample_yields_zero() {
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(population_std_dev(&[]), 0.0);
}

#[test]
fn histo_tracks_count_and_max() {
    let mut h = Histo::default();
    for v in [5u64, 10, 15, 20] {
        h.record(v);
    }
    assert_eq!(h.count(), 4);
    assert_eq!(h.max(), 20);
    assert!(h.p50() >= 5 && h.p50() <= 20);
}
