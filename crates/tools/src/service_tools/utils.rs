//! Ticket helpers

use chrono::NaiveDateTime;

pub const TICKET_ID_PREFIX: &str = "TKT-";

/// Ticket ID for a creation time: `TKT-` + `YYYYMMDDHHMMSS`.
///
/// Two tickets created within the same second share an ID.
pub fn ticket_id_for(now: NaiveDateTime) -> String {
    format!("{}{}", TICKET_ID_PREFIX, now.format("%Y%m%d%H%M%S"))
}
