//! Environment-driven split settings.

use chrono::FixedOffset;

use splitdate_core::{DomainError, DomainResult};

/// Minutes east of UTC used to decide a line's planned day.
pub const UTC_OFFSET_ENV: &str = "RECEIPT_SPLIT_UTC_OFFSET_MINUTES";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitConfig {
    pub utc_offset_minutes: i32,
}

impl SplitConfig {
    /// Read settings from the process environment; unset keys keep defaults.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup` (key -> value).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(UTC_OFFSET_ENV) {
            config.utc_offset_minutes = raw.trim().parse().map_err(|e| {
                DomainError::validation(format!("{UTC_OFFSET_ENV}='{raw}': {e}"))
            })?;
            config.utc_offset()?;
        }

        Ok(config)
    }

    pub fn utc_offset(&self) -> DomainResult<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "utc offset of {} minutes is out of range",
                    self.utc_offset_minutes
                ))
            })
    }
}
