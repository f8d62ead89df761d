//! Property tests for stage advancement

use super::tests::{linear_chain, Progress, ADVANCE_SCORE, P_BUMP};
use super::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_below_threshold_never_advances(
        scores in prop::collection::vec(-10.0f64..ADVANCE_SCORE, 1..12),
    ) {
        let curriculum = linear_chain();
        let trainer = Trainer::new(&curriculum);
        let mut state = trainer.create_enrollment().unwrap();

        for score in scores {
            state = trainer.evaluate(&state, &Progress { score, sessions: 0 }).unwrap();
            prop_assert_eq!(state.stage.as_str(), "a");
        }
    }

    #[test]
    fn prop_at_threshold_advances_one_stage_per_call(
        score in ADVANCE_SCORE..100.0f64,
        sessions in 0u32..10,
    ) {
        let curriculum = linear_chain();
        let trainer = Trainer::new(&curriculum);
        let metrics = Progress { score, sessions };

        let state = trainer.create_enrollment().unwrap();
        let first = trainer.evaluate(&state, &metrics).unwrap();
        prop_assert_eq!(first.stage.as_str(), "b");
        let second = trainer.evaluate(&first, &metrics).unwrap();
        prop_assert_eq!(second.stage.as_str(), "c");
        let third = trainer.evaluate(&second, &metrics).unwrap();
        prop_assert_eq!(third.stage.as_str(), "c");
    }

    #[test]
    fn prop_template_is_never_mutated(
        scores in prop::collection::vec(-1.0f64..0.99, 1..8),
    ) {
        let curriculum = linear_chain();
        let trainer = Trainer::new(&curriculum);
        let template = curriculum.stage("a").unwrap().task().clone();
        let mut state = trainer.create_enrollment().unwrap();

        for score in scores {
            state = trainer.evaluate(&state, &Progress { score, sessions: 5 }).unwrap();
        }
        prop_assert_eq!(curriculum.stage("a").unwrap().task(), &template);
    }

    #[test]
    fn prop_policy_noop_when_precondition_fails(score in -10.0f64..=0.5) {
        let input = super::tests::task("a");
        let output = P_BUMP.apply(&Progress { score, sessions: 0 }, input.clone()).unwrap();
        prop_assert_eq!(output, input);
    }
}
