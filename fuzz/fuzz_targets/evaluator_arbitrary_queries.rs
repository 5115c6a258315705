#![no_main]

use intmemo::evaluation::EvaluationType;
use intmemo::evaluator::PropertyEvaluator;
use intmemo::property;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary query sequences on PropertyEvaluator
//
// Every answer must match direct computation, and evaluation_type must track
// which queries have been made for each key.
fuzz_target!(|data: &[u8]| {
    let mut evaluator = PropertyEvaluator::new();

    for chunk in data.chunks_exact(5) {
        let n = i32::from_le_bytes([chunk[1], chunk[2], chunk[3], chunk[4]]);
        let before = evaluator.evaluation_type(n);

        match chunk[0] % 3 {
            0 => {
                assert_eq!(evaluator.is_even(n), property::is_even(n));
                if n != i32::MIN {
                    assert!(evaluator.evaluation_type(n).contains(EvaluationType::EVEN_ODD));
                }
            }
            1 => {
                assert_eq!(
                    evaluator.is_divisible_by_2_to_9(n),
                    property::is_divisible_by_2_to_9(n)
                );
                if n != i32::MIN {
                    assert!(evaluator.evaluation_type(n).contains(EvaluationType::DIVISIBILITY));
                }
            }
            _ => {
                assert_eq!(evaluator.evaluation_type(n), before);
            }
        }

        if n == i32::MIN {
            assert_eq!(evaluator.evaluation_type(n), EvaluationType::NEVER_EVALUATED);
        }
    }

    evaluator.store().check_invariants().unwrap();
});
