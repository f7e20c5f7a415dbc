use super::engine::mz_window;
use super::*;
use crate::signal::{SamplePoint, SignalArrays, SortedSignal};

fn points(rows: &[(f64, f64, f64, f64)]) -> Vec<SamplePoint> {
    rows.iter().copied().map(SamplePoint::from).collect()
}

fn config(mz: f64, rt: f64, dt: f64, min_intensity: f64) -> ToleranceConfig {
    ToleranceConfig::new(mz, rt, dt, min_intensity).unwrap()
}

#[test]
fn test_single_isolated_peak() {
    let input = points(&[(0.0, 0.0, 0.0, 1.0), (0.0, 0.0, 0.0, 5.0), (0.0, 0.0, 0.0, 1.0)]);
    let flags = detect_peaks(&input, &config(0.5, 0.5, 0.5, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[false, true, false]);
}

#[test]
fn test_retention_time_walk() {
    let input = points(&[(0.0, 0.0, 0.0, 1.0), (0.0, 1.0, 0.0, 5.0), (0.0, 2.0, 0.0, 1.0)]);

    let flags = detect_peaks(&input, &config(0.5, 1.0, 0.5, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[false, true, false]);

    // Spacing wider than the window leaves every point without neighbors.
    let flags = detect_peaks(&input, &config(0.5, 0.5, 0.5, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[true, true, true]);
}

#[test]
fn test_all_below_threshold() {
    let input = points(&[
        (100.0, 1.0, 1.0, 10.0),
        (100.2, 1.0, 1.0, 50.0),
        (101.0, 1.0, 1.0, 99.9),
    ]);
    let flags = detect_peaks(&input, &config(0.1, 1.0, 1.0, 100.0)).unwrap();
    assert_eq!(flags.len(), 3);
    assert_eq!(flags.peak_count(), 0);
}

#[test]
fn test_threshold_is_inclusive() {
    let input = points(&[(100.0, 1.0, 1.0, 100.0)]);
    let flags = detect_peaks(&input, &config(0.1, 1.0, 1.0, 100.0)).unwrap();
    assert_eq!(flags.as_slice(), &[true]);
}

#[test]
fn test_tie_earliest_wins() {
    let input = points(&[(100.0, 1.0, 1.0, 7.0), (100.0, 1.5, 1.0, 7.0), (100.0, 2.0, 1.0, 3.0)]);
    let flags = detect_peaks(&input, &config(0.1, 1.0, 1.0, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[true, false, false]);
}

#[test]
fn test_tie_with_higher_neighbor_yields_no_peak() {
    // The earliest of the tied pair has a more intense neighbor on its left,
    // the later one is shadowed by the earlier; neither is a peak.
    let input = points(&[
        (100.00, 1.0, 1.0, 9.0),
        (100.05, 1.0, 1.0, 7.0),
        (100.10, 1.0, 1.0, 7.0),
    ]);
    let flags = detect_peaks(&input, &config(0.06, 1.0, 1.0, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[true, false, false]);
}

#[test]
fn test_boundary_points() {
    let input = points(&[
        (100.0, 1.0, 1.0, 10.0),
        (100.1, 1.0, 1.0, 5.0),
        (100.2, 1.0, 1.0, 2.0),
        (100.3, 1.0, 1.0, 5.0),
        (100.4, 1.0, 1.0, 10.0),
    ]);
    let flags = detect_peaks(&input, &config(0.15, 1.0, 1.0, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[true, false, false, false, true]);
}

#[test]
fn test_neighbors_require_all_axes() {
    // Same m/z, but the drift times are too far apart to compete.
    let input = points(&[(100.0, 1.0, 1.0, 10.0), (100.0, 1.0, 5.0, 20.0)]);
    let flags = detect_peaks(&input, &config(0.5, 1.0, 1.0, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[true, true]);

    // Same m/z and drift time, retention times too far apart.
    let input = points(&[(100.0, 1.0, 1.0, 10.0), (100.0, 9.0, 1.0, 20.0)]);
    let flags = detect_peaks(&input, &config(0.5, 1.0, 1.0, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[true, true]);
}

#[test]
fn test_tolerance_bounds_are_inclusive() {
    let input = points(&[(100.0, 1.0, 1.0, 10.0), (100.5, 2.0, 1.5, 20.0)]);
    let flags = detect_peaks(&input, &config(0.5, 1.0, 0.5, 0.0)).unwrap();
    assert_eq!(flags.as_slice(), &[false, true]);
}

#[test]
fn test_unsorted_input_rejected() {
    let input = points(&[(101.0, 1.0, 1.0, 1.0), (100.0, 1.0, 1.0, 1.0)]);
    let err = detect_peaks(&input, &ToleranceConfig::default()).unwrap_err();
    assert_eq!(
        err,
        DetectionError::InvalidInput(InvalidInputError::Unsorted { index: 1 })
    );
}

#[test]
fn test_empty_input_rejected() {
    let err = detect_peaks(&[], &ToleranceConfig::default()).unwrap_err();
    assert_eq!(err, DetectionError::InvalidInput(InvalidInputError::Empty));
}

#[test]
fn test_negative_tolerance_rejected() {
    let bad = ToleranceConfig {
        mz_tolerance: -1.0,
        ..ToleranceConfig::default()
    };
    let input = points(&[(100.0, 1.0, 1.0, 1.0)]);
    let err = detect_peaks(&input, &bad).unwrap_err();
    assert_eq!(
        err,
        DetectionError::InvalidConfig(InvalidConfigError::Negative {
            field: "mz_tolerance",
            value: -1.0,
        })
    );
}

#[test]
fn test_config_checked_before_input() {
    let bad = ToleranceConfig {
        rt_tolerance: f64::NAN,
        ..ToleranceConfig::default()
    };
    let err = detect_peaks(&[], &bad).unwrap_err();
    assert!(matches!(
        err,
        DetectionError::InvalidConfig(InvalidConfigError::NonFinite {
            field: "rt_tolerance",
            ..
        })
    ));
}

#[test]
fn test_config_validation() {
    assert!(ToleranceConfig::new(0.0, 0.0, 0.0, 0.0).is_ok());
    assert!(ToleranceConfig::default().validate().is_ok());
    assert!(matches!(
        ToleranceConfig::new(0.1, 0.1, 0.1, -5.0),
        Err(InvalidConfigError::Negative {
            field: "min_intensity",
            ..
        })
    ));
    assert!(matches!(
        ToleranceConfig::new(0.1, 0.1, f64::INFINITY, 0.0),
        Err(InvalidConfigError::NonFinite {
            field: "dt_tolerance",
            ..
        })
    ));
}

#[test]
fn test_config_json() {
    let config = config(0.01, 2.0, 0.25, 50.0);
    let json = config.to_json().unwrap();
    let parsed: ToleranceConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);

    let partial: ToleranceConfig = serde_json::from_str(r#"{"mz_tolerance": 0.2}"#).unwrap();
    assert_eq!(partial.mz_tolerance, 0.2);
    assert_eq!(partial.rt_tolerance, ToleranceConfig::default().rt_tolerance);
}

#[test]
fn test_zero_chunk_size_rejected() {
    let detector = PeakDetector::new(ToleranceConfig::default()).unwrap();
    assert_eq!(
        detector.with_chunk_size(0).unwrap_err(),
        InvalidConfigError::ZeroChunkSize
    );
}

#[test]
fn test_detect_arrays_matches_points() {
    let input = points(&[
        (100.0, 1.0, 1.0, 3.0),
        (100.01, 1.2, 1.1, 8.0),
        (100.02, 1.4, 1.2, 4.0),
        (200.0, 5.0, 2.0, 6.0),
    ]);
    let config = config(0.05, 0.5, 0.5, 0.0);
    let from_points = detect_peaks(&input, &config).unwrap();
    let from_arrays = detect_peaks_arrays(&SignalArrays::from_points(&input), &config).unwrap();
    assert_eq!(from_points, from_arrays);
    assert_eq!(from_points.peak_indices().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn test_parallel_matches_sequential() {
    // A grid with repeated intensities so that ties cross chunk boundaries.
    let mut input = Vec::new();
    for i in 0..40 {
        for j in 0..5 {
            let intensity = ((i * 7 + j * 3) % 11) as f64;
            input.push(SamplePoint::new(100.0 + i as f64 * 0.01, j as f64, 1.0, intensity));
        }
    }
    let signal = SortedSignal::from_points(&input).unwrap();
    let config = config(0.015, 1.0, 0.5, 1.0);

    let sequential = PeakDetector::new(config)
        .unwrap()
        .with_parallel(false)
        .detect(&signal);
    let parallel = PeakDetector::new(config)
        .unwrap()
        .with_parallel(true)
        .with_chunk_size(7)
        .unwrap()
        .detect(&signal);

    assert_eq!(sequential, parallel);
    assert!(sequential.peak_count() > 0);
}

#[test]
fn test_mz_window_bounds() {
    let mz = [1.0, 1.0, 1.5, 2.0, 2.0, 2.5, 4.0];
    assert_eq!(mz_window(&mz, 0, 0.0), 0..2);
    assert_eq!(mz_window(&mz, 1, 0.0), 0..2);
    assert_eq!(mz_window(&mz, 3, 0.5), 2..6);
    assert_eq!(mz_window(&mz, 6, 1.0), 6..7);
    assert_eq!(mz_window(&mz, 2, 10.0), 0..7);
}

#[test]
fn test_peak_flags_accessors() {
    let flags = PeakFlags::from(vec![false, true, false, true]);
    assert_eq!(flags.len(), 4);
    assert!(!flags.is_empty());
    assert_eq!(flags.get(1), Some(true));
    assert_eq!(flags.get(9), None);
    assert!(flags[3]);
    assert_eq!(flags.peak_count(), 2);
    assert_eq!(flags.peak_indices().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(flags.iter().filter(|f| !f).count(), 2);
    assert_eq!(flags.into_inner(), vec![false, true, false, true]);
}

#[test]
fn test_summary() {
    let input = points(&[
        (100.0, 1.0, 0.5, 3.0),
        (100.01, 2.0, 0.7, 8.0),
        (300.0, 4.0, 0.2, 6.0),
    ]);
    let signal = SignalArrays::from_points(&input);
    let config = config(0.05, 2.0, 0.5, 0.0);
    let flags = detect_peaks_arrays(&signal, &config).unwrap();
    let summary = DetectionSummary::new(&signal, &flags, &config);

    assert_eq!(summary.total_points, 3);
    assert_eq!(summary.peak_count, 2);
    assert_eq!(summary.mz_range, Some((100.0, 300.0)));
    assert_eq!(summary.rt_range, Some((1.0, 4.0)));
    assert_eq!(summary.dt_range, Some((0.2, 0.7)));
    assert_eq!(summary.max_peak_intensity, Some(8.0));
    assert!((summary.peak_fraction() - 2.0 / 3.0).abs() < 1e-12);

    let text = summary.to_string();
    assert!(text.contains("Points: 3"));
    assert!(text.contains("Peaks: 2"));
    assert!(!summary.format_colored().is_empty());
}
