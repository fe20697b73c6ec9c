#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use owf_wire::{safe_sub, Budget, WireError};

#[derive(Arbitrary, Debug)]
struct Input {
    length: u32,
    debits: Vec<u32>,
}

// Fuzz target: word-aligned subtraction and the budget built on it.
//
// A failed debit must leave the budget untouched, and the budget can
// never report more consumed bytes than it started with.
fuzz_target!(|input: Input| {
    let Ok(mut budget) = Budget::new(input.length) else {
        return;
    };
    for n in input.debits {
        let before = budget.remaining();
        match budget.debit(n) {
            Ok(()) => assert_eq!(budget.remaining(), before - n),
            Err(e) => {
                assert_eq!(budget.remaining(), before);
                assert_eq!(safe_sub(before, n), Err(e.clone()));
                assert!(matches!(
                    e,
                    WireError::Misaligned { .. } | WireError::BudgetUnderflow { .. }
                ));
            }
        }
        assert_eq!(budget.consumed() + budget.remaining(), budget.length());
    }
});
