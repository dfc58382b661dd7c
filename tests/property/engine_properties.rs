use bishop::core::combiner::{Combiner, Robinson, RobinsonFisher};
use bishop::{Bayes, Pool};
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e", "f", "g", "h"]).prop_map(String::from)
}

fn tokens(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(token(), 0..max)
}

fn sum(pool: &Pool) -> u64 {
    pool.data().values().sum()
}

#[derive(Debug, Clone)]
enum Op {
    Train(usize, Vec<String>),
    Untrain(usize, Vec<String>),
    Merge(usize, usize),
    Remove(usize),
}

const POOLS: [&str; 3] = ["x", "y", "z"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..3usize, tokens(12)).prop_map(|(p, t)| Op::Train(p, t)),
        2 => (0..3usize, tokens(12)).prop_map(|(p, t)| Op::Untrain(p, t)),
        1 => (0..3usize, 0..3usize).prop_map(|(d, s)| Op::Merge(d, s)),
        1 => (0..3usize).prop_map(Op::Remove),
    ]
}

fn apply(b: &mut Bayes, op: &Op) {
    match op {
        Op::Train(p, t) => b.train(POOLS[*p], t).unwrap(),
        Op::Untrain(p, t) => b.untrain(POOLS[*p], t).unwrap(),
        Op::Merge(d, s) => {
            let _ = b.merge_pools(POOLS[*d], POOLS[*s]);
        }
        Op::Remove(p) => {
            b.remove_pool(POOLS[*p]);
        }
    }
}

proptest! {
    #[test]
    fn pool_total_matches_sum_after_every_op(ops in prop::collection::vec(op(), 0..30)) {
        let mut b = Bayes::new();
        for op in &ops {
            apply(&mut b, op);
            for pool in b.pools() {
                prop_assert_eq!(pool.token_count(), sum(pool));
                prop_assert!(pool.data().values().all(|&c| c > 0));
            }
        }
    }

    #[test]
    fn train_then_untrain_restores_pool(base in tokens(20), extra in tokens(20)) {
        let mut b = Bayes::new();
        b.train("p", &base).unwrap();
        let before = b.pool("p").unwrap().clone();
        b.train("p", &extra).unwrap();
        b.untrain("p", &extra).unwrap();
        let after = b.pool("p").unwrap();
        prop_assert_eq!(after.data(), before.data());
        prop_assert_eq!(after.token_count(), before.token_count());
    }

    #[test]
    fn corpus_is_sum_of_pools(ops in prop::collection::vec(op(), 0..30)) {
        let mut b = Bayes::new();
        for op in &ops {
            apply(&mut b, op);
        }
        let pools: Vec<Pool> = b.pools().cloned().collect();
        let corpus = b.corpus().clone();
        let mut expected_total = 0;
        for pool in &pools {
            expected_total += pool.token_count();
            for token in pool.data().keys() {
                prop_assert!(corpus.contains(token));
            }
        }
        prop_assert_eq!(corpus.token_count(), expected_total);
        for (token, &count) in corpus.data() {
            let expected: u64 = pools.iter().filter_map(|p| p.get(token)).sum();
            prop_assert_eq!(count, expected);
        }
    }

    #[test]
    fn guesses_are_probabilities(ops in prop::collection::vec(op(), 1..30), msg in tokens(10)) {
        let mut b = Bayes::new();
        for op in &ops {
            apply(&mut b, op);
        }
        for (_, p) in b.guess(&msg) {
            prop_assert!((0.0..=1.0).contains(&p), "probability {} out of range", p);
        }
    }

    #[test]
    fn guesses_are_deterministic(ops in prop::collection::vec(op(), 1..30), msg in tokens(10)) {
        let mut a = Bayes::new();
        let mut b = Bayes::new();
        for op in &ops {
            apply(&mut a, op);
            apply(&mut b, op);
        }
        prop_assert_eq!(a.guess(&msg), b.guess(&msg));
    }

    #[test]
    fn combiners_stay_in_unit_interval(scores in prop::collection::vec(0.0001f64..=0.9999, 1..50)) {
        let probs: Vec<(&str, f64)> = scores.iter().map(|&s| ("t", s)).collect();
        for value in [Robinson.combine(&probs, "p"), RobinsonFisher.combine(&probs, "p")] {
            prop_assert!(value.is_finite());
            prop_assert!((-1e-12..=1.0 + 1e-12).contains(&value), "combined {}", value);
        }
    }
}
