use std::fmt::{Debug, Display};

use estore_common::error::{AppCfgError, AppErrorCode};

#[derive(Debug, Clone)]
pub struct AppError {
    pub code: AppErrorCode,
    pub detail: Option<String>,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let default_detail = "none";
        let dp = if let Some(s) = &self.detail {
            s.as_str()
        } else {
            default_detail
        };
        write!(f, "code:{:?}, detail:{}", self.code, dp)
    }
}

impl From<AppCfgError> for AppError {
    fn from(value: AppCfgError) -> Self {
        AppError {
            code: value.code,
            detail: value.detail,
        }
    }
}
impl From<(AppErrorCode, String)> for AppError {
    fn from(value: (AppErrorCode, String)) -> Self {
        AppError {
            code: value.0,
            detail: Some(value.1),
        }
    }
}

impl AppError {
    // keyed lookup miss, the detail carries entity name and the key
    // so the web layer can surface it as a distinct `not found` outcome
    pub fn record_not_found(entity: &str, key: String) -> Self {
        Self {
            code: AppErrorCode::RecordNotFound,
            detail: Some(format!("{} with id: {} not found", entity, key)),
        }
    }

    pub fn invalid_input(detail: &str) -> Self {
        Self {
            code: AppErrorCode::InvalidInput,
            detail: Some(detail.to_string()),
        }
    }
}
