//! Property-based tests for numeric helpers

use super::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_clamp_is_idempotent(
        value in -1e6f64..1e6,
        lo in -1e3f64..1e3,
        width in 0.0f64..1e3,
    ) {
        let hi = lo + width;
        let once = clamp(value, lo, hi);
        prop_assert_eq!(clamp(once, lo, hi), once);
    }

    #[test]
    fn prop_clamp_stays_in_range(
        value in -1e6f64..1e6,
        lo in -1e3f64..1e3,
        width in 0.0f64..1e3,
    ) {
        let hi = lo + width;
        let clamped = clamp(value, lo, hi);
        prop_assert!(clamped >= lo && clamped <= hi);
    }

    #[test]
    fn prop_transition_matrix_is_row_stochastic(
        n_states in 1usize..20,
        rate in 1e-4f64..2.0,
    ) {
        let p = replenishment_transition_matrix(n_states, rate, DEFAULT_TIME_CONSTANT, DEFAULT_DT)
            .unwrap();
        prop_assert_eq!(p.dim(), (n_states, n_states));
        for row in p.rows() {
            prop_assert!((row.sum() - 1.0).abs() < 1e-9);
            prop_assert!(row.iter().all(|&x| x >= -1e-12));
        }
        prop_assert_eq!(p[[n_states - 1, n_states - 1]], 1.0);
    }
}
