//! Property tests for the rolling-window signal invariants.
//!
//! Whole-number closes are checked against a naive per-window mean exactly.
//! One-decimal closes with repeated runs are checked against an integer
//! comparison in tenths, which has no rounding at all.

use proptest::prelude::*;
use sigbatch_core::{Dataset, SignalEngine};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u32..1000).prop_map(f64::from), 1..80)
}

/// Prices in tenths, laid out as runs of repeated values.
fn arb_tenths() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec((1u32..1000, 1usize..6), 1..40).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(tenths, len)| std::iter::repeat(tenths).take(len))
            .collect()
    })
}

fn arb_window() -> impl Strategy<Value = usize> {
    1usize..12
}

fn naive_mean(closes: &[f64], i: usize, window: usize) -> f64 {
    let slice = &closes[i + 1 - window..=i];
    slice.iter().sum::<f64>() / window as f64
}

proptest! {
    /// Every input row comes out, in order.
    #[test]
    fn frame_preserves_row_count(closes in arb_closes(), window in arb_window()) {
        let frame = SignalEngine::new(window).compute(&Dataset::from_closes(&closes));
        prop_assert_eq!(frame.len(), closes.len());
        prop_assert_eq!(frame.close(), closes.as_slice());
    }

    /// The warm-up region is always 0, whatever the close.
    #[test]
    fn warmup_signal_is_zero(closes in arb_closes(), window in arb_window()) {
        let frame = SignalEngine::new(window).compute(&Dataset::from_closes(&closes));
        for i in 0..frame.warmup_rows() {
            prop_assert_eq!(frame.signal()[i], 0);
            prop_assert!(frame.rolling_mean_at(i).is_none());
        }
    }

    /// Past the warm-up, signal is 1 exactly when close beats the trailing mean.
    #[test]
    fn signal_matches_trailing_mean(closes in arb_closes(), window in arb_window()) {
        let frame = SignalEngine::new(window).compute(&Dataset::from_closes(&closes));
        for i in (window - 1)..closes.len() {
            let mean = naive_mean(&closes, i, window);
            prop_assert_eq!(frame.rolling_mean_at(i), Some(mean));
            prop_assert_eq!(frame.signal()[i] == 1, closes[i] > mean);
        }
    }

    /// Decimal prices: the signal agrees with exact arithmetic, and a flat
    /// window never signals. Ties between different decimals depend on their
    /// binary rounding and are not asserted.
    #[test]
    fn decimal_signal_matches_exact_comparison(tenths in arb_tenths(), window in arb_window()) {
        let closes: Vec<f64> = tenths.iter().map(|&t| f64::from(t) / 10.0).collect();
        let frame = SignalEngine::new(window).compute(&Dataset::from_closes(&closes));
        let w = window as u64;

        for i in (window - 1)..closes.len() {
            let slice = &tenths[i + 1 - window..=i];
            let total: u64 = slice.iter().map(|&t| u64::from(t)).sum();
            let scaled_close = u64::from(tenths[i]) * w;

            let mean = frame.rolling_mean_at(i).unwrap();
            prop_assert!((mean - naive_mean(&closes, i, window)).abs() < 1e-9);

            if scaled_close != total {
                prop_assert_eq!(frame.signal()[i] == 1, scaled_close > total);
            } else if slice.iter().all(|&t| t == tenths[i]) {
                prop_assert_eq!(mean, closes[i]);
                prop_assert_eq!(frame.signal()[i], 0);
            }
        }
    }

    /// The rate is the plain mean of the signal column and stays in [0, 1].
    #[test]
    fn signal_rate_is_mean_of_signal(closes in arb_closes(), window in arb_window()) {
        let frame = SignalEngine::new(window).compute(&Dataset::from_closes(&closes));
        let rate = frame.signal_rate();
        let ones = frame.signal().iter().filter(|&&s| s == 1).count();
        prop_assert!((0.0..=1.0).contains(&rate));
        prop_assert_eq!(rate, ones as f64 / closes.len() as f64);
    }

    /// Same input, same output.
    #[test]
    fn compute_is_deterministic(closes in arb_closes(), window in arb_window()) {
        let engine = SignalEngine::new(window);
        let dataset = Dataset::from_closes(&closes);
        let a = engine.compute(&dataset);
        let b = engine.compute(&dataset);
        prop_assert_eq!(a.signal(), b.signal());
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(a.rolling_mean()), bits(b.rolling_mean()));
    }
}
