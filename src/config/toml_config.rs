use crate::core::page::PageFormat;
use crate::domain::model::Part;
use crate::utils::error::{HarnessError, Result};
use crate::utils::validation::{
    is_url_base, validate_non_empty_string, validate_path, validate_unique_names, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub harness: HarnessSection,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
    #[serde(default)]
    pub days: Vec<DayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessSection {
    pub name: String,
    /// Directory or http(s) URL the part inputs are relative to.
    pub input_base: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<PageFormat>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayConfig {
    pub name: String,
    pub application: String,
    pub enabled: Option<bool>,
    #[serde(default)]
    pub parts: Vec<PartConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartConfig {
    pub part: Part,
    pub input: String,
}

impl DayConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

impl HarnessConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HarnessError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HarnessError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INPUT_BASE})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HarnessError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("harness.name", &self.harness.name)?;

        if is_url_base(&self.harness.input_base) {
            validate_url("harness.input_base", &self.harness.input_base)?;
        } else {
            validate_path("harness.input_base", &self.harness.input_base)?;
        }

        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_deref()) {
            validate_path("output.path", path)?;
        }

        if self.days.is_empty() {
            return Err(HarnessError::MissingConfigError {
                field: "days".to_string(),
            });
        }

        validate_unique_names("days.name", self.days.iter().map(|d| d.name.as_str()))?;

        for day in &self.days {
            validate_non_empty_string("days.name", &day.name)?;
            validate_non_empty_string("days.application", &day.application)?;

            if day.parts.is_empty() {
                return Err(HarnessError::MissingConfigError {
                    field: format!("days.{}.parts", day.name),
                });
            }

            // part 編號不做驗證，只驗證輸入路徑
            for part in &day.parts {
                validate_path(&format!("days.{}.parts.input", day.name), &part.input)?;
            }
        }

        Ok(())
    }

    pub fn input_base(&self) -> &str {
        &self.harness.input_base
    }

    pub fn output_format(&self) -> PageFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn day(&self, name: &str) -> Option<&DayConfig> {
        self.days.iter().find(|d| d.name == name)
    }
}

impl Validate for HarnessConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
