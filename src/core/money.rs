//! Monetary values as numeric amount plus currency code.
//!
//! Amounts are whole currency units. Formatting (thousands grouping,
//! currency prefix) happens only at the display boundary; arithmetic
//! stays on the numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currency codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum Currency {
    #[default]
    Aed,
    Usd,
    Eur,
    Gbp,
    Sar,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Aed => "AED",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Sar => "SAR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AED" => Ok(Currency::Aed),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "SAR" => Ok(Currency::Sar),
            _ => Err(format!("Unknown currency code: {}", s)),
        }
    }
}

/// An amount of money in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Shorthand for AED amounts, the product's default currency
    pub fn aed(amount: i64) -> Self {
        Self::new(amount, Currency::Aed)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Difference in this money's currency. The CRM keeps each pledge in a
    /// single currency, so mixed-currency subtraction is not a supported case.
    pub fn minus(&self, other: Money) -> Money {
        Money::new(self.amount - other.amount, self.currency)
    }

    pub fn plus(&self, other: Money) -> Money {
        Money::new(self.amount + other.amount, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, group_thousands(self.amount))
    }
}

/// Format an integer with comma thousands separators
fn group_thousands(n: i64) -> String {
    let negative = n < 0;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display_groups_thousands() {
        assert_eq!(Money::aed(2_500_000).to_string(), "AED 2,500,000");
        assert_eq!(Money::aed(999).to_string(), "AED 999");
        assert_eq!(Money::aed(1_000).to_string(), "AED 1,000");
        assert_eq!(Money::new(0, Currency::Usd).to_string(), "USD 0");
    }

    #[test]
    fn test_money_display_negative() {
        assert_eq!(Money::aed(-1_250_500).to_string(), "AED -1,250,500");
    }

    #[test]
    fn test_money_minus() {
        let pending = Money::aed(500_000).minus(Money::aed(150_000));
        assert_eq!(pending, Money::aed(350_000));
    }

    #[test]
    fn test_money_serde_shape() {
        let m = Money::aed(750_000);
        let yaml = serde_yml::to_string(&m).unwrap();
        assert!(yaml.contains("amount: 750000"));
        assert!(yaml.contains("currency: AED"));
        let back: Money = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("aed".parse::<Currency>().unwrap(), Currency::Aed);
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert!("XYZ".parse::<Currency>().is_err());
    }
}
