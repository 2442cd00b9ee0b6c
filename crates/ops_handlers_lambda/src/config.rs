//! Environment configuration, read once per cold start.

pub const TABLE_NAME_ENV: &str = "EMPLOYEE_TABLE_NAME";
pub const DEFAULT_TABLE_NAME: &str = "EmployeeTable";
pub const TOPIC_ARN_ENV: &str = "SNS_TOPIC_ARN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStoreConfig {
    pub table_name: String,
}

impl RecordStoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let table_name = non_blank(lookup(TABLE_NAME_ENV))
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        Self { table_name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertConfig {
    pub topic_arn: String,
}

impl AlertConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let topic_arn = non_blank(lookup(TOPIC_ARN_ENV))
            .ok_or_else(|| format!("{TOPIC_ARN_ENV} must be configured"))?;
        Ok(Self { topic_arn })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
