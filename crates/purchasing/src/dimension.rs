//! Grouping dimensions.
//!
//! A dimension contributes entries to the group key of each line and knows how
//! to carry its entries onto a receipt, both when a receipt is updated in place
//! and when one is copied for a new group. The splitter merges all registered
//! dimensions, in registration order, into one composite key.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde_json::Value as JsonValue;

use splitdate_core::{DomainError, DomainResult};
use splitdate_inventory::{Receipt, ReceiptCopyValues};

use crate::group_key::{GroupKey, GroupKeyEntry};
use crate::order::{OrderLine, PurchaseOrder};

/// Key entry holding the planned delivery day (`YYYY-MM-DD`).
pub const DATE_PLANNED: &str = "date_planned";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One criterion lines are grouped by.
pub trait GroupingDimension: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Entries this dimension adds to the key of `line`.
    ///
    /// `receipt` is the receipt the split started from, when there is one.
    fn key_entries(
        &self,
        order: &PurchaseOrder,
        line: &OrderLine,
        receipt: Option<&Receipt>,
    ) -> DomainResult<Vec<GroupKeyEntry>>;

    /// Record in `values` the overrides a copied receipt needs for `key`.
    fn copy_values(&self, _key: &GroupKey, _values: &mut ReceiptCopyValues) -> DomainResult<()> {
        Ok(())
    }

    /// Write the fields `key` determines onto `receipt`.
    fn update_receipt(&self, _key: &GroupKey, _receipt: &mut Receipt) -> DomainResult<()> {
        Ok(())
    }
}

/// Groups lines by the calendar day of their planned delivery.
///
/// The day is taken in a fixed UTC offset (UTC by default); receipts are dated
/// to midnight of that day in the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedDateDimension {
    offset: FixedOffset,
}

impl Default for PlannedDateDimension {
    fn default() -> Self {
        Self::utc()
    }
}

impl PlannedDateDimension {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Day on which `line` is planned, in this dimension's offset.
    pub fn planned_day(&self, line: &OrderLine) -> NaiveDate {
        line.date_planned.with_timezone(&self.offset).date_naive()
    }

    /// The receipt date encoded by `key`, if the key has a planned day: local
    /// midnight of that day in this dimension's offset.
    ///
    /// When several planned-day entries are present the last one wins.
    pub fn receipt_date(&self, key: &GroupKey) -> DomainResult<Option<DateTime<Utc>>> {
        let mut date = None;
        for value in key.values(DATE_PLANNED) {
            date = Some(self.local_midnight(value)?);
        }
        Ok(date)
    }

    fn local_midnight(&self, value: &JsonValue) -> DomainResult<DateTime<Utc>> {
        let raw = value.as_str().ok_or_else(|| {
            DomainError::validation(format!("{DATE_PLANNED} must be a date string, got {value}"))
        })?;
        let day = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| DomainError::validation(format!("{DATE_PLANNED} '{raw}': {e}")))?;
        day.and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.and_local_timezone(self.offset).single())
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| {
                DomainError::validation(format!("{DATE_PLANNED} '{raw}' has no local midnight"))
            })
    }
}

impl GroupingDimension for PlannedDateDimension {
    fn name(&self) -> &'static str {
        DATE_PLANNED
    }

    fn key_entries(
        &self,
        _order: &PurchaseOrder,
        line: &OrderLine,
        _receipt: Option<&Receipt>,
    ) -> DomainResult<Vec<GroupKeyEntry>> {
        let day = self.planned_day(line).format(DATE_FORMAT).to_string();
        Ok(vec![GroupKeyEntry::new(DATE_PLANNED, day)])
    }

    fn copy_values(&self, key: &GroupKey, values: &mut ReceiptCopyValues) -> DomainResult<()> {
        if let Some(date) = self.receipt_date(key)? {
            values.date = Some(date);
        }
        Ok(())
    }

    fn update_receipt(&self, key: &GroupKey, receipt: &mut Receipt) -> DomainResult<()> {
        if let Some(date) = self.receipt_date(key)? {
            receipt.set_date(date);
        }
        Ok(())
    }
}
