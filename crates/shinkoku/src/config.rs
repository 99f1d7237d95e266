//! User configuration loaded from `config.yaml`
//!
//! Every section is optional. Values act as defaults for the income tax
//! input fields an input file leaves unset.
//!
//! ```yaml
//! tax_year: 2025
//! output_dir: ./output
//! taxpayer:
//!   widow_status: single_parent
//!   date_of_birth: 1958-04-01
//! filing:
//!   return_type: blue
//!   blue_return_deduction: 650000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use shinkoku_core::date_math::{age_at_year_end, parse_ymd};
use shinkoku_core::model::{
    DEFAULT_BLUE_RETURN_DEDUCTION, DEFAULT_FISCAL_YEAR, DisabilityStatus, WidowStatus,
};

use crate::error::CliError;

/// Age at year end from which the over-65 pension table applies
const PENSION_SENIOR_AGE: i32 = 65;

fn default_tax_year() -> i16 {
    DEFAULT_FISCAL_YEAR
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_blue_return_deduction() -> i64 {
    DEFAULT_BLUE_RETURN_DEDUCTION
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    #[default]
    Blue,
    White,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxpayerConfig {
    pub widow_status: WidowStatus,
    pub disability_status: DisabilityStatus,
    pub working_student: bool,
    /// `YYYY-MM-DD`; used to decide the pension table when an input omits it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilingConfig {
    pub return_type: ReturnType,
    pub blue_return_deduction: i64,
}

impl Default for FilingConfig {
    fn default() -> Self {
        Self {
            return_type: ReturnType::Blue,
            blue_return_deduction: default_blue_return_deduction(),
        }
    }
}

/// Contents of `config.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShinkokuConfig {
    #[serde(default = "default_tax_year")]
    pub tax_year: i16,
    /// Directory that relative `--output` paths are resolved against
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub taxpayer: TaxpayerConfig,
    #[serde(default)]
    pub filing: FilingConfig,
}

impl Default for ShinkokuConfig {
    fn default() -> Self {
        Self {
            tax_year: default_tax_year(),
            output_dir: default_output_dir(),
            taxpayer: TaxpayerConfig::default(),
            filing: FilingConfig::default(),
        }
    }
}

impl ShinkokuConfig {
    /// Load the config file, returning defaults if it doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        Self::from_yaml(&content).map_err(|e| CliError::parse(path, e))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Resolve an output path: relative paths land under `output_dir`.
    pub fn resolve_output(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }

    /// Fill unset income tax input fields from the config.
    ///
    /// A white return always forces the blue-return deduction to zero, even
    /// when the input file names one.
    pub fn apply_income_defaults(&self, input: &mut Value) -> Result<(), CliError> {
        let Some(fields) = input.as_object_mut() else {
            return Ok(());
        };

        insert_missing(fields, "fiscal_year", json!(self.tax_year));
        insert_missing(fields, "widow_status", serde_json::to_value(self.taxpayer.widow_status)?);
        insert_missing(
            fields,
            "disability_status",
            serde_json::to_value(self.taxpayer.disability_status)?,
        );
        insert_missing(fields, "working_student", json!(self.taxpayer.working_student));

        match self.filing.return_type {
            ReturnType::White => {
                fields.insert("blue_return_deduction".to_string(), json!(0));
            }
            ReturnType::Blue => insert_missing(
                fields,
                "blue_return_deduction",
                json!(self.filing.blue_return_deduction),
            ),
        }

        let birth = match &self.taxpayer.date_of_birth {
            Some(birth) if !fields.contains_key("is_over_65") => Some(birth),
            _ => None,
        };
        if let Some(birth) = birth {
            let birth = parse_ymd("taxpayer.date_of_birth", birth)?;
            let fiscal_year = fields
                .get("fiscal_year")
                .and_then(Value::as_i64)
                .and_then(|y| i16::try_from(y).ok())
                .unwrap_or(self.tax_year);
            let over_65 = age_at_year_end(birth, fiscal_year) >= PENSION_SENIOR_AGE;
            fields.insert("is_over_65".to_string(), json!(over_65));
        }

        Ok(())
    }
}

fn insert_missing(fields: &mut Map<String, Value>, key: &str, value: Value) {
    if !fields.contains_key(key) {
        fields.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = ShinkokuConfig::load_or_default(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, ShinkokuConfig::default());
        assert_eq!(config.filing.blue_return_deduction, 650_000);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "tax_year: 2024\ntaxpayer:\n  widow_status: single_parent\nfiling:\n  return_type: white\n",
        )
        .unwrap();

        let config = ShinkokuConfig::load_or_default(&path).unwrap();
        assert_eq!(config.tax_year, 2024);
        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert_eq!(config.taxpayer.widow_status, WidowStatus::SingleParent);
        assert_eq!(config.filing.return_type, ReturnType::White);
        assert_eq!(config.filing.blue_return_deduction, 650_000);
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "filing:\n  return_type: green\n").unwrap();

        let err = ShinkokuConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
    }

    #[test]
    fn test_defaults_only_fill_unset_fields() {
        let config = ShinkokuConfig {
            tax_year: 2024,
            taxpayer: TaxpayerConfig {
                widow_status: WidowStatus::Widow,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut input = json!({"fiscal_year": 2025, "salary_income": 3000000});

        config.apply_income_defaults(&mut input).unwrap();

        assert_eq!(input["fiscal_year"], 2025);
        assert_eq!(input["widow_status"], "widow");
        assert_eq!(input["blue_return_deduction"], 650_000);
    }

    #[test]
    fn test_white_return_forces_zero_blue_deduction() {
        let config = ShinkokuConfig {
            filing: FilingConfig {
                return_type: ReturnType::White,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut input = json!({"blue_return_deduction": 650000});

        config.apply_income_defaults(&mut input).unwrap();
        assert_eq!(input["blue_return_deduction"], 0);
    }

    #[test]
    fn test_date_of_birth_sets_pension_age() {
        let config = ShinkokuConfig {
            taxpayer: TaxpayerConfig {
                date_of_birth: Some("1960-12-31".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let mut input = json!({"fiscal_year": 2025});
        config.apply_income_defaults(&mut input).unwrap();
        assert_eq!(input["is_over_65"], true);

        let mut input = json!({"fiscal_year": 2024});
        config.apply_income_defaults(&mut input).unwrap();
        assert_eq!(input["is_over_65"], false);

        let mut explicit = json!({"fiscal_year": 2025, "is_over_65": false});
        config.apply_income_defaults(&mut explicit).unwrap();
        assert_eq!(explicit["is_over_65"], false);
    }

    #[test]
    fn test_bad_date_of_birth_is_validation_error() {
        let config = ShinkokuConfig {
            taxpayer: TaxpayerConfig {
                date_of_birth: Some("1960/12/31".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.apply_income_defaults(&mut json!({})).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
