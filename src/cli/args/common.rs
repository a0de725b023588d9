//! Common CLI types shared across commands

use crate::client::models::{CaseStatus, DevicePlatform};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    Pretty,
    /// Table format - one row per entry
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Parse the `preferences.format` config value
    pub fn from_preference(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Case file status as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CaseStatusArg {
    Open,
    InProcess,
    Closed,
}

impl From<CaseStatusArg> for CaseStatus {
    fn from(arg: CaseStatusArg) -> Self {
        match arg {
            CaseStatusArg::Open => CaseStatus::Open,
            CaseStatusArg::InProcess => CaseStatus::InProcess,
            CaseStatusArg::Closed => CaseStatus::Closed,
        }
    }
}

/// Push platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlatformArg {
    Android,
    Ios,
}

impl From<PlatformArg> for DevicePlatform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Android => DevicePlatform::Android,
            PlatformArg::Ios => DevicePlatform::Ios,
        }
    }
}
