//! Per-conversation session state
//!
//! `SessionState` is the typed form of the conversation's shared data bag.
//! Tool handlers read it and request changes through a [`StatePatch`]; the
//! session owner merges the patch before the next tool call.
//!
//! Ticket fields live inside `Option<TicketState>`, so notes and escalation
//! can only exist while a ticket does. Once a ticket exists the flat view
//! always carries the escalation keys (`escalated: false` and nulls when not
//! escalated), so a host merging patch keys stays in step with the session.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::customer::CustomerRecord;
use crate::greeting::SessionGreeting;

/// Format a local timestamp as ISO-8601 with microseconds
pub fn iso_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(timestamp_format::FORMAT).to_string()
}

/// Serde adapter for local ISO-8601 timestamps
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<NaiveDateTime>().map_err(serde::de::Error::custom)
    }
}

/// Company contact details seeded into every session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub support_email: String,
    pub support_phone: String,
    /// Human-readable opening hours, e.g. "9 AM to 6 PM EST"
    pub business_hours: String,
}

/// One timestamped note on a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketNote {
    #[serde(with = "timestamp_format")]
    pub time: NaiveDateTime,
    pub content: String,
}

impl TicketNote {
    pub fn new(content: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            time,
            content: content.into(),
        }
    }
}

/// Supervisor escalation of a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escalation {
    pub reason: String,
    #[serde(with = "timestamp_format")]
    pub time: NaiveDateTime,
}

/// The active support ticket of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketState {
    pub id: String,
    pub issue: String,
    /// Append-only within a session
    pub notes: Vec<TicketNote>,
    #[serde(with = "timestamp_format")]
    pub created: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation: Option<Escalation>,
}

impl TicketState {
    /// A fresh ticket with no notes
    pub fn open(id: impl Into<String>, issue: impl Into<String>, created: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            issue: issue.into(),
            notes: Vec::new(),
            created,
            escalation: None,
        }
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_escalated(&self) -> bool {
        self.escalation.is_some()
    }
}

/// Shared data of one conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub company: CompanyInfo,
    pub is_business_hours: bool,
    /// Time-of-day greeting; handlers fall back to "Hello" when unset
    #[serde(default)]
    pub greeting: Option<String>,
    /// Set once the caller has been identified
    #[serde(default)]
    pub customer: Option<CustomerRecord>,
    #[serde(default)]
    pub ticket: Option<TicketState>,
}

impl SessionState {
    /// Seed a session with company details and the greeting computed at start
    pub fn new(company: CompanyInfo, greeting: &SessionGreeting) -> Self {
        Self {
            company,
            is_business_hours: greeting.is_business_hours,
            greeting: Some(greeting.greeting.to_string()),
            customer: None,
            ticket: None,
        }
    }

    pub fn is_identified(&self) -> bool {
        self.customer.is_some()
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer.as_ref().map(|c| c.name.as_str())
    }

    /// Merge a patch, last write wins per field group.
    ///
    /// Notes and escalation are dropped when no ticket exists, after any
    /// ticket carried by the same patch has been installed.
    pub fn apply(&mut self, patch: StatePatch) {
        let StatePatch {
            customer,
            ticket,
            ticket_notes,
            escalation,
        } = patch;

        if let Some(customer) = customer {
            self.customer = Some(customer);
        }
        if let Some(ticket) = ticket {
            self.ticket = Some(ticket);
        }

        match (self.ticket.as_mut(), ticket_notes) {
            (Some(ticket), Some(notes)) => ticket.notes = notes,
            (None, Some(_)) => tracing::warn!("Dropping ticket notes patch: no active ticket"),
            _ => {}
        }

        match (self.ticket.as_mut(), escalation) {
            (Some(ticket), Some(escalation)) => ticket.escalation = Some(escalation),
            (None, Some(_)) => tracing::warn!("Dropping escalation patch: no active ticket"),
            _ => {}
        }
    }

    /// Flat key/value view of the session, as the host framework sees it
    pub fn to_global_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("company_name".into(), json!(self.company.name));
        data.insert("support_email".into(), json!(self.company.support_email));
        data.insert("support_phone".into(), json!(self.company.support_phone));
        data.insert("business_hours".into(), json!(self.company.business_hours));
        data.insert("is_business_hours".into(), json!(self.is_business_hours));
        if let Some(greeting) = &self.greeting {
            data.insert("greeting".into(), json!(greeting));
        }
        if let Some(customer) = &self.customer {
            insert_customer(&mut data, customer);
        }
        if let Some(ticket) = &self.ticket {
            insert_ticket(&mut data, ticket);
        }
        data
    }
}

/// Changes requested by a tool handler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub customer: Option<CustomerRecord>,
    /// Replaces the whole ticket; its flat keys reset any earlier escalation
    pub ticket: Option<TicketState>,
    pub ticket_notes: Option<Vec<TicketNote>>,
    pub escalation: Option<Escalation>,
}

impl StatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identify(customer: CustomerRecord) -> Self {
        Self {
            customer: Some(customer),
            ..Self::default()
        }
    }

    pub fn open_ticket(ticket: TicketState) -> Self {
        Self {
            ticket: Some(ticket),
            ..Self::default()
        }
    }

    pub fn replace_notes(notes: Vec<TicketNote>) -> Self {
        Self {
            ticket_notes: Some(notes),
            ..Self::default()
        }
    }

    pub fn escalate(escalation: Escalation) -> Self {
        Self {
            escalation: Some(escalation),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customer.is_none()
            && self.ticket.is_none()
            && self.ticket_notes.is_none()
            && self.escalation.is_none()
    }

    /// Flat keys this patch overwrites
    pub fn to_global_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        if let Some(customer) = &self.customer {
            insert_customer(&mut data, customer);
        }
        if let Some(ticket) = &self.ticket {
            insert_ticket(&mut data, ticket);
        }
        if let Some(notes) = &self.ticket_notes {
            data.insert("ticket_notes".into(), notes_value(notes));
        }
        if let Some(escalation) = &self.escalation {
            insert_escalation(&mut data, escalation);
        }
        data
    }
}

fn insert_customer(data: &mut Map<String, Value>, customer: &CustomerRecord) {
    data.insert("customer_id".into(), json!(customer.id));
    data.insert("customer_name".into(), json!(customer.name));
    data.insert("customer_tier".into(), json!(customer.tier.as_str()));
    data.insert("identified".into(), json!(true));
}

fn insert_ticket(data: &mut Map<String, Value>, ticket: &TicketState) {
    data.insert("ticket_id".into(), json!(ticket.id));
    data.insert("ticket_issue".into(), json!(ticket.issue));
    data.insert("ticket_notes".into(), notes_value(&ticket.notes));
    data.insert("ticket_created".into(), json!(iso_timestamp(&ticket.created)));
    match &ticket.escalation {
        Some(escalation) => insert_escalation(data, escalation),
        None => {
            data.insert("escalated".into(), json!(false));
            data.insert("escalation_reason".into(), Value::Null);
            data.insert("escalation_time".into(), Value::Null);
        }
    }
}

fn insert_escalation(data: &mut Map<String, Value>, escalation: &Escalation) {
    data.insert("escalated".into(), json!(true));
    data.insert("escalation_reason".into(), json!(escalation.reason));
    data.insert("escalation_time".into(), json!(iso_timestamp(&escalation.time)));
}

fn notes_value(notes: &[TicketNote]) -> Value {
    Value::Array(
        notes
            .iter()
            .map(|note| json!({ "time": iso_timestamp(&note.time), "content": note.content }))
            .collect(),
    )
}
