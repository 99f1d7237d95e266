//! Consumption tax under the standard, simplified and 2-割 special methods.

use crate::model::{ConsumptionTaxInput, ConsumptionTaxMethod, ConsumptionTaxResult};
use crate::rates::{
    LOCAL_TAX_RATIO, NATIONAL_RATE_REDUCED, NATIONAL_RATE_STANDARD, SIMPLIFIED_DEEMED_RATIOS,
    SIMPLIFIED_DEFAULT_TYPE, SPECIAL_20PCT_PERCENT, TAX_AMOUNT_UNIT, TAXABLE_INCOME_UNIT,
    apply_rate, floor_to,
};

/// Tax-exclusive base of a tax-included amount, truncated to ¥1,000.
#[inline]
pub fn taxable_base(tax_included: i64, rate_percent: i64) -> i64 {
    floor_to(apply_rate(tax_included, 100, 100 + rate_percent), TAXABLE_INCOME_UNIT)
}

/// National tax on the 10% and 8% buckets of tax-included amounts.
fn national_tax(amount_10: i64, amount_8: i64) -> (i64, i64, i64) {
    let base_10 = taxable_base(amount_10, 10);
    let base_8 = taxable_base(amount_8, 8);
    let tax = apply_rate(base_10, NATIONAL_RATE_STANDARD.0, NATIONAL_RATE_STANDARD.1)
        + apply_rate(base_8, NATIONAL_RATE_REDUCED.0, NATIONAL_RATE_REDUCED.1);
    (base_10, base_8, tax)
}

/// Deemed purchase ratio in percent for a simplified business type (1–6).
pub fn deemed_purchase_ratio(business_type: Option<u8>) -> i64 {
    let index = business_type.unwrap_or(SIMPLIFIED_DEFAULT_TYPE);
    SIMPLIFIED_DEEMED_RATIOS
        .get(usize::from(index).wrapping_sub(1))
        .copied()
        .unwrap_or(SIMPLIFIED_DEEMED_RATIOS[usize::from(SIMPLIFIED_DEFAULT_TYPE) - 1])
}

/// Compute national and local consumption tax for the period.
///
/// When purchase tax exceeds sales tax the excess is reported as
/// `refund_shortfall` and `total_due` goes negative.
pub fn calc_consumption_tax(input: &ConsumptionTaxInput) -> ConsumptionTaxResult {
    let (taxable_base_10, taxable_base_8, national_tax_on_sales) =
        national_tax(input.taxable_sales_10, input.taxable_sales_8);

    let tax_on_purchases = match input.method {
        ConsumptionTaxMethod::Standard => {
            national_tax(input.taxable_purchases_10, input.taxable_purchases_8).2
        }
        ConsumptionTaxMethod::Simplified => apply_rate(
            national_tax_on_sales,
            deemed_purchase_ratio(input.simplified_business_type),
            100,
        ),
        ConsumptionTaxMethod::Special20Pct => {
            national_tax_on_sales - apply_rate(national_tax_on_sales, SPECIAL_20PCT_PERCENT, 100)
        }
    };

    let (local_num, local_den) = LOCAL_TAX_RATIO;
    let difference = national_tax_on_sales - tax_on_purchases;
    let (net_tax, local_tax_due, refund_shortfall) = if difference >= 0 {
        let net_tax = floor_to(difference, TAX_AMOUNT_UNIT);
        let local = floor_to(apply_rate(net_tax, local_num, local_den), TAX_AMOUNT_UNIT);
        (net_tax, local, 0)
    } else {
        let shortfall = -difference;
        let local_refund = floor_to(apply_rate(shortfall, local_num, local_den), TAX_AMOUNT_UNIT);
        (0, -local_refund, shortfall)
    };

    let total_due = net_tax - refund_shortfall + local_tax_due;
    tracing::debug!(
        method = ?input.method,
        national_tax_on_sales,
        tax_on_purchases,
        total_due,
        "consumption tax"
    );

    ConsumptionTaxResult {
        fiscal_year: input.fiscal_year,
        method: input.method,
        taxable_sales_total: input.taxable_sales_10 + input.taxable_sales_8,
        taxable_base_10,
        taxable_base_8,
        national_tax_on_sales,
        tax_on_purchases,
        net_tax,
        local_tax_due,
        total_due,
        refund_shortfall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxable_base_truncation() {
        assert_eq!(taxable_base(165_000, 10), 150_000);
        assert_eq!(taxable_base(1_099_999, 10), 999_000);
        assert_eq!(taxable_base(108_000, 8), 100_000);
        assert_eq!(taxable_base(0, 10), 0);
    }

    #[test]
    fn test_deemed_ratio_lookup() {
        assert_eq!(deemed_purchase_ratio(Some(1)), 90);
        assert_eq!(deemed_purchase_ratio(Some(6)), 40);
        assert_eq!(deemed_purchase_ratio(None), 50);
    }

    #[test]
    fn test_reduced_rate_bucket() {
        let input = ConsumptionTaxInput::new(ConsumptionTaxMethod::Standard).sales(0, 1_080_000);
        let result = calc_consumption_tax(&input);
        assert_eq!(result.taxable_base_8, 1_000_000);
        // 6.24% national share
        assert_eq!(result.national_tax_on_sales, 62_400);
        assert_eq!(result.net_tax, 62_400);
        assert_eq!(result.local_tax_due, 17_600);
    }

    #[test]
    fn test_zero_sales_all_zero() {
        let result = calc_consumption_tax(&ConsumptionTaxInput::default());
        assert_eq!(result.net_tax, 0);
        assert_eq!(result.local_tax_due, 0);
        assert_eq!(result.total_due, 0);
        assert_eq!(result.refund_shortfall, 0);
    }
}
