//! Property checks evaluated by the memoizing evaluator.
//!
//! Both checks use the truncating remainder operator rather than bit tricks,
//! so the result does not depend on the integer's representation. All divisors
//! are positive, so `i32::MIN % d` never overflows.

/// Smallest divisor tested by [`is_divisible_by_2_to_9`].
pub const FIRST_DIVISOR: i32 = 2;

/// Largest divisor tested by [`is_divisible_by_2_to_9`].
pub const LAST_DIVISOR: i32 = 9;

/// Returns `true` if `n` is even. Zero and negative even numbers are even.
///
/// ```
/// use intmemo::property::is_even;
///
/// assert!(is_even(0));
/// assert!(is_even(-52));
/// assert!(!is_even(-51));
/// ```
#[inline]
pub fn is_even(n: i32) -> bool {
    n % 2 == 0
}

/// Returns the first divisor in `2..=9` that does not divide `n`, or `None`
/// if every divisor does.
///
/// Divisors are tried in ascending order and the scan stops at the first
/// failure.
///
/// ```
/// use intmemo::property::first_failing_divisor;
///
/// assert_eq!(first_failing_divisor(52), Some(3));
/// assert_eq!(first_failing_divisor(840), Some(9));
/// assert_eq!(first_failing_divisor(2520), None);
/// ```
pub fn first_failing_divisor(n: i32) -> Option<i32> {
    let mut divisor = FIRST_DIVISOR;
    while divisor <= LAST_DIVISOR {
        if n % divisor != 0 {
            return Some(divisor);
        }
        divisor += 1;
    }
    None
}

/// Returns `true` if `n` is divisible by every integer from 2 through 9.
///
/// The scan must advance past divisor 9; stopping at 9 (multiples of 840 that
/// are not multiples of 2520) is a failure.
///
/// ```
/// use intmemo::property::is_divisible_by_2_to_9;
///
/// assert!(is_divisible_by_2_to_9(2520));
/// assert!(is_divisible_by_2_to_9(0));
/// assert!(!is_divisible_by_2_to_9(2519));
/// assert!(!is_divisible_by_2_to_9(i32::MIN));
/// ```
#[inline]
pub fn is_divisible_by_2_to_9(n: i32) -> bool {
    first_failing_divisor(n).is_none()
}
