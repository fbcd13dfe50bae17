use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::Sub;

/// A fixed-point amount of value, counted in indivisible base units.
///
/// The amount is signed so that a malformed output carrying a negative value can be
/// represented and rejected by validation.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coin(i64);

impl Coin {
    pub const fn new(amount: i64) -> Self {
        Coin(amount)
    }

    pub const fn zero() -> Self {
        Self::new(0)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Sums the amounts, or returns `None` if the total does not fit.
    pub fn checked_sum<I: IntoIterator<Item = Coin>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |total, amount| total.checked_add(amount))
    }
}

impl Sub for Coin {
    type Output = Coin;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_sum_of_amounts() {
        let amounts = vec![Coin::new(4), Coin::new(4), Coin::new(2)];
        assert_eq!(Coin::checked_sum(amounts), Some(Coin::new(10)));
    }

    #[test]
    fn checked_sum_of_nothing_is_zero() {
        assert_eq!(Coin::checked_sum(Vec::new()), Some(Coin::zero()));
    }

    #[test]
    fn checked_sum_detects_overflow() {
        let amounts = vec![Coin::new(i64::MAX), Coin::new(1)];
        assert_eq!(Coin::checked_sum(amounts), None);
    }

    #[test]
    fn negative_amounts() {
        assert!(Coin::new(-1).is_negative());
        assert!(!Coin::zero().is_negative());
    }
}
