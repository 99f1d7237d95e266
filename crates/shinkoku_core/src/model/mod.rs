mod consumption;
mod deductions;
mod income;
mod other_income;
mod results;
mod sanity;
mod separate;

pub use consumption::{ConsumptionTaxInput, ConsumptionTaxMethod, ConsumptionTaxResult};
pub use deductions::{
    DeductionItem, DeductionKind, DeductionsInput, DeductionsResult, FurusatoLimitInput,
    FurusatoLimitResult,
};
pub use income::{
    DEFAULT_BLUE_RETURN_DEDUCTION, DEFAULT_FISCAL_YEAR, DependentInfo, DisabilityClass,
    DisabilityStatus, Donation, DonationType, HousingCategory, HousingLoanDetail, IncomeTaxInput,
    LifeInsuranceDetail, WidowStatus,
};
pub use other_income::{
    DepreciationInput, DepreciationMethod, DepreciationResult, PensionDeductionInput,
    PensionDeductionResult, RetirementIncomeInput, RetirementIncomeResult,
};
pub use results::IncomeTaxResult;
pub use sanity::{CheckCode, CheckItem, CheckResult, Severity};
pub use separate::{SeparateTaxInput, SeparateTaxResult};
