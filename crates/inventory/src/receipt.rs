use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use splitdate_core::{Entity, ValueObject, record_id};

record_id!(
    /// Receipt (incoming picking) identifier.
    ReceiptId
);

/// Receipt lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptState {
    Draft,
    Ready,
    Done,
    Cancelled,
}

/// An incoming delivery document that groups the stock moves of a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    id: ReceiptId,
    name: String,
    origin: Option<String>,
    partner: Option<String>,
    date: DateTime<Utc>,
    state: ReceiptState,
    attributes: BTreeMap<String, JsonValue>,
}

impl Receipt {
    /// Create a draft receipt. An empty `name` lets the store assign the next
    /// reference on insert.
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: ReceiptId::generate(),
            name: name.into(),
            origin: None,
            partner: None,
            date,
            state: ReceiptState::Draft,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    pub fn id_typed(&self) -> ReceiptId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn partner(&self) -> Option<&str> {
        self.partner.as_deref()
    }

    /// Scheduled date of the delivery.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn state(&self) -> ReceiptState {
        self.state
    }

    pub fn attribute(&self, name: &str) -> Option<&JsonValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, JsonValue> {
        &self.attributes
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    pub fn set_state(&mut self, state: ReceiptState) {
        self.state = state;
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: JsonValue) {
        self.attributes.insert(name.into(), value);
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Build the duplicate of this receipt: fresh id, new reference, draft
    /// state, then the overrides from `values`.
    pub(crate) fn duplicate(&self, name: String, values: ReceiptCopyValues) -> Self {
        let mut copy = Self {
            id: ReceiptId::generate(),
            name,
            origin: self.origin.clone(),
            partner: self.partner.clone(),
            date: self.date,
            state: ReceiptState::Draft,
            attributes: self.attributes.clone(),
        };
        if let Some(date) = values.date {
            copy.date = date;
        }
        copy.attributes.extend(values.attributes);
        copy
    }
}

impl Entity for Receipt {
    type Id = ReceiptId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Field overrides applied when a receipt is copied.
///
/// A copy never carries the source's moves; only the fields listed here differ
/// from the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptCopyValues {
    pub date: Option<DateTime<Utc>>,
    pub attributes: BTreeMap<String, JsonValue>,
}

impl ReceiptCopyValues {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.attributes.is_empty()
    }
}

impl ValueObject for ReceiptCopyValues {}
