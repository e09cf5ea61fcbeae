//! Exact decimal helpers for financial amounts.
//!
//! All totals are computed with [`BigDecimal`] so `7.50 * 2 + 3.00` comes out
//! as exactly `18.00`; floating point never touches a price.

use bigdecimal::BigDecimal;

/// Restaurant-wide service fee, charged on every order's subtotal.
pub const SERVICE_FEE_PERCENT: i64 = 10;

pub fn zero() -> BigDecimal {
    BigDecimal::from(0)
}

pub fn one() -> BigDecimal {
    BigDecimal::from(1)
}

/// `p` percent as an exact fraction: `percent(10)` is `0.10`.
pub fn percent(p: i64) -> BigDecimal {
    BigDecimal::from(p) / BigDecimal::from(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_exact() {
        assert_eq!(percent(10), "0.10".parse::<BigDecimal>().unwrap());
        assert_eq!(percent(100), one());
        assert_eq!(percent(0), zero());
    }

    #[test]
    fn percent_multiplication_keeps_exactness() {
        let subtotal = "18.00".parse::<BigDecimal>().unwrap();
        assert_eq!(
            subtotal * percent(SERVICE_FEE_PERCENT),
            "1.80".parse::<BigDecimal>().unwrap()
        );
    }
}
