//! Сумма платежа в EUR с фиксированной точностью: ровно 2 знака после точки.
//!
//! Внутри `rust_decimal::Decimal`, поэтому сложение точное и контрольная
//! сумма документа всегда совпадает с суммой строк.

use rust_decimal::Decimal;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const SCALE: u32 = 2;

    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Нормализует значение к двум знакам после точки.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    /// Наибольшая сумма одной транзакции, допустимая в SEPA (`InstdAmt`).
    pub fn max_instructed() -> Self {
        Amount(Decimal::new(99_999_999_999, Self::SCALE))
    }

    /// Точный разбор без округления; `None`, если строка не число
    /// или в ней больше двух знаков после точки.
    pub fn from_str_exact(s: &str) -> Option<Self> {
        let d = Decimal::from_str_exact(s).ok()?;
        if d.scale() > Self::SCALE {
            return None;
        }
        Some(Amount::new(d))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
