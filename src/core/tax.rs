//! GST computation for a single net amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::{Jurisdiction, TaxResult, TaxType};

/// Statutory GST rates, in percent.
///
/// Loaded from configuration so a rate change needs no code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Full rate. IGST applies it as is; CGST and SGST each apply half.
    #[serde(default = "default_standard_rate")]
    pub standard_rate: Decimal,
}

fn default_standard_rate() -> Decimal {
    dec!(18)
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            standard_rate: default_standard_rate(),
        }
    }
}

impl TaxRates {
    pub fn new(standard_rate: Decimal) -> Self {
        Self { standard_rate }
    }

    /// Whether the standard rate lies within 0..=100 percent.
    pub fn is_valid(&self) -> bool {
        (Decimal::ZERO..=dec!(100)).contains(&self.standard_rate)
    }

    /// Rate of one of the two intra-state components.
    pub fn component_rate(&self) -> Decimal {
        self.standard_rate / dec!(2)
    }
}

/// Pure tax calculator; holds only the configured rates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCalculator {
    rates: TaxRates,
}

impl TaxCalculator {
    pub fn new(rates: TaxRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> TaxRates {
        self.rates
    }

    /// Compute the tax on `net` for the given jurisdiction.
    ///
    /// Intra-state: `tax_amount` is one 9% component and the total adds it
    /// twice. Inter-state: `tax_amount` is the full 18% IGST. No rounding is
    /// applied and negative amounts pass through.
    pub fn calculate(&self, net: Decimal, jurisdiction: &Jurisdiction) -> TaxResult {
        match jurisdiction.tax_type() {
            TaxType::CgstSgst => {
                let rate = self.rates.component_rate();
                let tax_amount = net * rate / dec!(100);
                TaxResult {
                    tax_type: TaxType::CgstSgst,
                    tax_amount,
                    total_amount: net + dec!(2) * tax_amount,
                    component_rate: rate,
                }
            }
            TaxType::Igst => {
                let rate = self.rates.standard_rate;
                let tax_amount = net * rate / dec!(100);
                TaxResult {
                    tax_type: TaxType::Igst,
                    tax_amount,
                    total_amount: net + tax_amount,
                    component_rate: rate,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same() -> Jurisdiction {
        Jurisdiction::new("MH", "MH")
    }

    fn different() -> Jurisdiction {
        Jurisdiction::new("MH", "DL")
    }

    #[test]
    fn rate_bounds() {
        assert!(TaxRates::default().is_valid());
        assert!(TaxRates::new(Decimal::ZERO).is_valid());
        assert!(TaxRates::new(dec!(100)).is_valid());
        assert!(!TaxRates::new(dec!(-1)).is_valid());
        assert!(!TaxRates::new(dec!(100.01)).is_valid());
    }

    #[test]
    fn intra_state_splits_rate() {
        let result = TaxCalculator::default().calculate(dec!(1000), &same());
        assert_eq!(result.tax_type, TaxType::CgstSgst);
        assert_eq!(result.tax_amount, dec!(90));
        assert_eq!(result.total_amount, dec!(1180));
        assert_eq!(result.component_rate, dec!(9));
    }

    #[test]
    fn inter_state_full_rate() {
        let result = TaxCalculator::default().calculate(dec!(1000), &different());
        assert_eq!(result.tax_type, TaxType::Igst);
        assert_eq!(result.tax_amount, dec!(180));
        assert_eq!(result.total_amount, dec!(1180));
    }

    #[test]
    fn negative_net_propagates() {
        let result = TaxCalculator::default().calculate(dec!(-100), &different());
        assert_eq!(result.tax_amount, dec!(-18));
        assert_eq!(result.total_amount, dec!(-118));
    }

    #[test]
    fn no_rounding_applied() {
        let result = TaxCalculator::default().calculate(dec!(333.33), &same());
        assert_eq!(result.tax_amount, dec!(29.9997));
        assert_eq!(result.total_amount, dec!(393.3294));
    }

    #[test]
    fn configured_rate_is_used() {
        let calc = TaxCalculator::new(TaxRates::new(dec!(12)));
        assert_eq!(calc.calculate(dec!(100), &same()).tax_amount, dec!(6));
        assert_eq!(calc.calculate(dec!(100), &different()).tax_amount, dec!(12));
    }

    #[test]
    fn components_match_regime() {
        let calc = TaxCalculator::default();
        let intra = calc.calculate(dec!(200), &same()).components();
        assert_eq!(intra.len(), 2);
        assert_eq!(intra[0].name, "CGST");
        assert_eq!(intra[1].name, "SGST");
        assert_eq!(intra[1].amount, dec!(18));

        let inter = calc.calculate(dec!(200), &different()).components();
        assert_eq!(inter.len(), 1);
        assert_eq!(inter[0].name, "IGST");
        assert_eq!(inter[0].rate, dec!(18));
    }
}
