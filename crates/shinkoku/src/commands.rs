//! Subcommand dispatch
//!
//! Each subcommand reads one input file (JSON, or YAML for `.yaml`/`.yml`),
//! validates it, runs the matching calculator and returns the result as a
//! JSON value.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shinkoku_core::deductions::calc_deductions;
use shinkoku_core::model::{
    ConsumptionTaxInput, DeductionsInput, DepreciationInput, FurusatoLimitInput, IncomeTaxInput,
    IncomeTaxResult, PensionDeductionInput, RetirementIncomeInput, SeparateTaxInput,
};
use shinkoku_core::{
    calc_consumption_tax, calc_depreciation, calc_furusato_deduction_limit, calc_income_tax,
    calc_income_tax_batch, calc_pension_deduction, calc_retirement_income, calc_separate_tax,
    sanity_check_income_tax,
};

use crate::config::ShinkokuConfig;
use crate::error::CliError;
use crate::util::atomic_write;

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file (JSON, or YAML by extension)
    #[arg(short, long)]
    pub input: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Full income tax return
    Income(InputArgs),
    /// Income deductions and tax credits only
    Deductions(InputArgs),
    /// Consumption tax (standard, simplified or 2-割 special)
    Consumption(InputArgs),
    /// Separately taxed stock and FX income
    Separate(InputArgs),
    /// Depreciation for one asset
    Depreciation(InputArgs),
    /// Public pension deduction
    Pension(InputArgs),
    /// Retirement income and its separately assessed tax
    Retirement(InputArgs),
    /// Furusato nozei limit estimate
    FurusatoLimit(InputArgs),
    /// Check an income tax result against its input
    SanityCheck(InputArgs),
    /// Evaluate and check a list of income tax inputs
    Batch(InputArgs),
}

impl Command {
    pub fn input_path(&self) -> &Path {
        match self {
            Command::Income(args)
            | Command::Deductions(args)
            | Command::Consumption(args)
            | Command::Separate(args)
            | Command::Depreciation(args)
            | Command::Pension(args)
            | Command::Retirement(args)
            | Command::FurusatoLimit(args)
            | Command::SanityCheck(args)
            | Command::Batch(args) => &args.input,
        }
    }
}

/// Body of a `sanity-check` input file.
#[derive(Debug, serde::Deserialize)]
struct SanityCheckRequest {
    input: Value,
    result: IncomeTaxResult,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Read an input file into a JSON value.
pub fn read_input(path: &Path) -> Result<Value, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    if is_yaml(path) {
        serde_saphyr::from_str(&content).map_err(|e| CliError::parse(path, e))
    } else {
        serde_json::from_str(&content).map_err(|e| CliError::parse(path, e))
    }
}

fn decode<T: DeserializeOwned>(path: &Path, value: Value) -> Result<T, CliError> {
    serde_json::from_value(value).map_err(|e| CliError::parse(path, e))
}

fn decode_income(
    path: &Path,
    mut value: Value,
    config: &ShinkokuConfig,
) -> Result<IncomeTaxInput, CliError> {
    config.apply_income_defaults(&mut value)?;
    let input: IncomeTaxInput = decode(path, value)?;
    input.validate()?;
    Ok(input)
}

fn encode<T: Serialize>(value: &T) -> Result<Value, CliError> {
    Ok(serde_json::to_value(value)?)
}

/// Run one subcommand and return its JSON result.
pub fn execute(command: &Command, config: &ShinkokuConfig) -> Result<Value, CliError> {
    let path = command.input_path();
    let raw = read_input(path)?;
    tracing::info!(command = ?command, "running");

    match command {
        Command::Income(_) => {
            let input = decode_income(path, raw, config)?;
            let result = calc_income_tax(&input);
            tracing::info!(
                total_tax = result.total_tax,
                tax_due = result.tax_due,
                "income tax calculated"
            );
            encode(&result)
        }
        Command::Deductions(_) => {
            let input: DeductionsInput = decode(path, raw)?;
            input.validate()?;
            encode(&calc_deductions(&input))
        }
        Command::Consumption(_) => {
            let input: ConsumptionTaxInput = decode(path, raw)?;
            input.validate()?;
            encode(&calc_consumption_tax(&input))
        }
        Command::Separate(_) => {
            let input: SeparateTaxInput = decode(path, raw)?;
            input.validate()?;
            encode(&calc_separate_tax(&input))
        }
        Command::Depreciation(_) => {
            let input: DepreciationInput = decode(path, raw)?;
            input.validate()?;
            encode(&calc_depreciation(&input))
        }
        Command::Pension(_) => {
            let input: PensionDeductionInput = decode(path, raw)?;
            input.validate()?;
            encode(&calc_pension_deduction(&input))
        }
        Command::Retirement(_) => {
            let input: RetirementIncomeInput = decode(path, raw)?;
            input.validate()?;
            encode(&calc_retirement_income(&input))
        }
        Command::FurusatoLimit(_) => {
            let input: FurusatoLimitInput = decode(path, raw)?;
            encode(&calc_furusato_deduction_limit(&input))
        }
        Command::SanityCheck(_) => {
            let request: SanityCheckRequest = decode(path, raw)?;
            let input = decode_income(path, request.input, config)?;
            encode(&sanity_check_income_tax(&input, &request.result))
        }
        Command::Batch(_) => {
            let values: Vec<Value> = decode(path, raw)?;
            let inputs = values
                .into_iter()
                .map(|value| decode_income(path, value, config))
                .collect::<Result<Vec<_>, _>>()?;
            let outcomes = calc_income_tax_batch(&inputs);
            let failed = outcomes.iter().filter(|o| !o.check.passed).count();
            tracing::info!(count = outcomes.len(), failed, "batch evaluated");
            encode(&outcomes)
        }
    }
}

/// Print the result, or write it atomically when an output path is given.
pub fn emit(value: &Value, output: Option<&Path>, config: &ShinkokuConfig) -> Result<(), CliError> {
    let pretty = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            let path = config.resolve_output(path);
            atomic_write(&path, &pretty).map_err(|e| CliError::io(&path, e))?;
            tracing::info!(path = %path.display(), "result written");
            println!("{}", json!({"status": "ok", "output": path.display().to_string()}));
        }
        None => println!("{pretty}"),
    }
    Ok(())
}

/// JSON body printed when a command fails.
pub fn error_json(err: &CliError) -> Value {
    json!({"status": "error", "message": err.to_string()})
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_income_from_json() {
        let dir = tempdir().unwrap();
        let input = write(
            dir.path(),
            "income.json",
            r#"{"salary_income":6000000,"business_revenue":3500000,"business_expenses":400000,
                "furusato_nozei":50000,"withheld_tax":466800}"#,
        );

        let value =
            execute(&Command::Income(InputArgs { input }), &ShinkokuConfig::default()).unwrap();
        assert_eq!(value["fiscal_year"], 2025);
        assert_eq!(value["total_tax"], 825_886);
        assert_eq!(value["tax_due"], 359_000);
    }

    #[test]
    fn test_consumption_from_yaml() {
        let dir = tempdir().unwrap();
        let input = write(
            dir.path(),
            "consumption.yaml",
            "method: special_20pct\ntaxable_sales_10: 165000\n",
        );

        let value = execute(
            &Command::Consumption(InputArgs { input }),
            &ShinkokuConfig::default(),
        )
        .unwrap();
        assert_eq!(value["method"], "special_20pct");
        assert_eq!(value["total_due"], 2_900);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let dir = tempdir().unwrap();
        let input = write(dir.path(), "separate.json", r#"{"stock_gains":-1}"#);

        let err = execute(&Command::Separate(InputArgs { input }), &ShinkokuConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        let body = error_json(&err);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("stock_gains"));
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        let dir = tempdir().unwrap();
        let input = write(dir.path(), "consumption.json", r#"{"method":"kani"}"#);

        let err = execute(&Command::Consumption(InputArgs { input }), &ShinkokuConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.json");
        let err = execute(&Command::Pension(InputArgs { input }), &ShinkokuConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_batch_applies_config_to_each_input() {
        let dir = tempdir().unwrap();
        let input = write(
            dir.path(),
            "batch.json",
            r#"[{"business_revenue":2000000},{"business_revenue":3000000}]"#,
        );
        let config = ShinkokuConfig::from_yaml("filing:\n  return_type: white\n").unwrap();

        let value = execute(&Command::Batch(InputArgs { input }), &config).unwrap();
        let outcomes = value.as_array().unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0]["result"]["effective_blue_return_deduction"], 0);
        assert_eq!(outcomes[1]["result"]["business_income"], 3_000_000);
        assert_eq!(outcomes[0]["check"]["passed"], true);
    }

    #[test]
    fn test_sanity_check_flags_corrupted_result() {
        let dir = tempdir().unwrap();
        let income = IncomeTaxInput {
            salary_income: 5_000_000,
            withheld_tax: 150_000,
            ..Default::default()
        };
        let mut result = calc_income_tax(&income);
        result.reconstruction_tax += 1;
        let body = json!({"input": income, "result": result});
        let input = write(dir.path(), "check.json", &body.to_string());

        let value = execute(
            &Command::SanityCheck(InputArgs { input }),
            &ShinkokuConfig::default(),
        )
        .unwrap();
        assert_eq!(value["passed"], false);
        assert_eq!(value["items"][0]["code"], "RECONSTRUCTION_TAX_MISMATCH");
    }

    #[test]
    fn test_emit_writes_relative_output_under_output_dir() {
        let dir = tempdir().unwrap();
        let config = ShinkokuConfig {
            output_dir: dir.path().join("out"),
            ..Default::default()
        };

        emit(&json!({"tax_due": 1}), Some(Path::new("income.json")), &config).unwrap();

        let written = std::fs::read_to_string(dir.path().join("out").join("income.json")).unwrap();
        let back: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(back["tax_due"], 1);
    }
}
