//! Consumption tax value objects

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError, non_negative};

/// Statutory computation method for consumption tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionTaxMethod {
    /// Actual purchase tax is credited (原則課税)
    #[default]
    Standard,
    /// Purchase tax deemed from a business-type ratio (簡易課税)
    Simplified,
    /// Net tax limited to 20% of sales-side tax (2割特例)
    #[serde(rename = "special_20pct")]
    Special20Pct,
}

impl ConsumptionTaxMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsumptionTaxMethod::Standard => "standard",
            ConsumptionTaxMethod::Simplified => "simplified",
            ConsumptionTaxMethod::Special20Pct => "special_20pct",
        }
    }
}

impl FromStr for ConsumptionTaxMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(ConsumptionTaxMethod::Standard),
            "simplified" => Ok(ConsumptionTaxMethod::Simplified),
            "special_20pct" => Ok(ConsumptionTaxMethod::Special20Pct),
            other => Err(ValidationError::UnknownVariant {
                field: "method",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionTaxInput {
    pub fiscal_year: i16,
    pub method: ConsumptionTaxMethod,
    /// Tax-included sales at the 10% standard rate
    pub taxable_sales_10: i64,
    /// Tax-included sales at the 8% reduced rate
    pub taxable_sales_8: i64,
    pub taxable_purchases_10: i64,
    pub taxable_purchases_8: i64,
    /// Business type 1 (wholesale) to 6 (real estate) for the simplified method
    pub simplified_business_type: Option<u8>,
}

impl Default for ConsumptionTaxInput {
    fn default() -> Self {
        Self {
            fiscal_year: super::income::DEFAULT_FISCAL_YEAR,
            method: ConsumptionTaxMethod::Standard,
            taxable_sales_10: 0,
            taxable_sales_8: 0,
            taxable_purchases_10: 0,
            taxable_purchases_8: 0,
            simplified_business_type: None,
        }
    }
}

impl ConsumptionTaxInput {
    pub fn new(method: ConsumptionTaxMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn sales(mut self, sales_10: i64, sales_8: i64) -> Self {
        self.taxable_sales_10 = sales_10;
        self.taxable_sales_8 = sales_8;
        self
    }

    #[must_use]
    pub fn purchases(mut self, purchases_10: i64, purchases_8: i64) -> Self {
        self.taxable_purchases_10 = purchases_10;
        self.taxable_purchases_8 = purchases_8;
        self
    }

    #[must_use]
    pub fn business_type(mut self, business_type: u8) -> Self {
        self.simplified_business_type = Some(business_type);
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("taxable_sales_10", self.taxable_sales_10)?;
        non_negative("taxable_sales_8", self.taxable_sales_8)?;
        non_negative("taxable_purchases_10", self.taxable_purchases_10)?;
        non_negative("taxable_purchases_8", self.taxable_purchases_8)?;
        match self.simplified_business_type {
            Some(business_type) if !(1..=6).contains(&business_type) => {
                Err(ValidationError::OutOfRange {
                    field: "simplified_business_type",
                    value: business_type as i64,
                    min: 1,
                    max: 6,
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionTaxResult {
    pub fiscal_year: i16,
    pub method: ConsumptionTaxMethod,
    pub taxable_sales_total: i64,
    /// Tax-exclusive sales base at 10%, truncated to ¥1,000
    pub taxable_base_10: i64,
    /// Tax-exclusive sales base at 8%, truncated to ¥1,000
    pub taxable_base_8: i64,
    pub national_tax_on_sales: i64,
    /// Deductible (actual or deemed) national tax on purchases
    pub tax_on_purchases: i64,
    /// National consumption tax payable, truncated to ¥100
    pub net_tax: i64,
    /// Local transfer tax; negative when refunding
    pub local_tax_due: i64,
    pub total_due: i64,
    /// Excess of purchase tax over sales tax; zero unless refunding
    pub refund_shortfall: i64,
}
