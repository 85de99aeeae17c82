use crate::domain::model::MasonryOptions;
use crate::utils::error::{GridError, Result};
use std::collections::HashSet;
use url::Url;

pub const MAX_RECORD_COUNT: usize = 100_000;
pub const REPORT_FORMATS: [&str; 2] = ["json", "csv"];
pub const MIN_COLUMN_WIDTH: f64 = 1.0;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GridError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GridError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GridError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GridError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GridError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GridError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_positive_length(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GridError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative_length(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GridError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number and not negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(GridError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

pub fn validate_record_count(field_name: &str, count: usize) -> Result<()> {
    validate_range(field_name, count, 1, MAX_RECORD_COUNT)
}

/// 以 `prefix` 作為欄位名稱前綴 (例如 `masonry`)
pub fn validate_masonry(prefix: &str, options: &MasonryOptions) -> Result<()> {
    validate_positive_length(&format!("{}.column_width", prefix), options.column_width)?;
    if options.column_width < MIN_COLUMN_WIDTH {
        return Err(GridError::InvalidConfigValueError {
            field: format!("{}.column_width", prefix),
            value: options.column_width.to_string(),
            reason: format!("Value must be at least {}px", MIN_COLUMN_WIDTH),
        });
    }
    validate_non_negative_length(&format!("{}.column_gutter", prefix), options.column_gutter)?;
    validate_positive_length(&format!("{}.viewport_width", prefix), options.viewport_width)?;
    validate_positive_length(&format!("{}.viewport_height", prefix), options.viewport_height)?;
    validate_positive_length(&format!("{}.item_height", prefix), options.item_height)?;
    validate_non_negative_length(&format!("{}.scroll_offset", prefix), options.scroll_offset)?;

    if !options.overscan_by.is_finite() || options.overscan_by < 1.0 {
        return Err(GridError::InvalidConfigValueError {
            field: format!("{}.overscan_by", prefix),
            value: options.overscan_by.to_string(),
            reason: "Value must be at least 1.0".to_string(),
        });
    }

    Ok(())
}
