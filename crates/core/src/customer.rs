//! Customer records and the phone-number directory
//!
//! The directory is a simulated customer database: it is built once at
//! process start and only read afterwards.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Membership tier of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Gold,
    Silver,
    Bronze,
}

impl CustomerTier {
    /// Lowercase tier name as spoken to the customer
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Gold => "gold",
            CustomerTier::Silver => "silver",
            CustomerTier::Bronze => "bronze",
        }
    }
}

impl std::fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CustomerTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(CustomerTier::Gold),
            "silver" => Ok(CustomerTier::Silver),
            "bronze" => Ok(CustomerTier::Bronze),
            other => Err(format!("unknown customer tier: {}", other)),
        }
    }
}

/// A known customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Account ID (e.g. "C001")
    pub id: String,
    /// Full name
    pub name: String,
    /// Membership tier
    pub tier: CustomerTier,
}

impl CustomerRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tier: CustomerTier) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
        }
    }
}

static BUILTIN_CUSTOMERS: Lazy<CustomerDirectory> = Lazy::new(|| {
    CustomerDirectory::from_entries([
        (
            "+15551234567",
            CustomerRecord::new("C001", "John Smith", CustomerTier::Gold),
        ),
        (
            "+15559876543",
            CustomerRecord::new("C002", "Jane Doe", CustomerTier::Silver),
        ),
        (
            "+15551112222",
            CustomerRecord::new("C003", "Bob Wilson", CustomerTier::Bronze),
        ),
    ])
});

/// Immutable customer lookup keyed by phone number
///
/// Lookups are exact string matches; no phone-number normalization is done.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    by_phone: HashMap<String, CustomerRecord>,
}

impl CustomerDirectory {
    /// Build a directory from `(phone, record)` pairs.
    ///
    /// A phone number listed twice keeps the last record.
    pub fn from_entries<P, I>(entries: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = (P, CustomerRecord)>,
    {
        Self {
            by_phone: entries
                .into_iter()
                .map(|(phone, record)| (phone.into(), record))
                .collect(),
        }
    }

    /// The built-in demo directory
    pub fn builtin() -> Self {
        BUILTIN_CUSTOMERS.clone()
    }

    /// Find a customer by exact phone number
    pub fn lookup(&self, phone: &str) -> Option<&CustomerRecord> {
        self.by_phone.get(phone)
    }

    pub fn len(&self) -> usize {
        self.by_phone.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_phone.is_empty()
    }

    /// All phone numbers, sorted
    pub fn phones(&self) -> Vec<&str> {
        let mut phones: Vec<&str> = self.by_phone.keys().map(String::as_str).collect();
        phones.sort_unstable();
        phones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_directory() {
        let directory = CustomerDirectory::builtin();
        assert_eq!(directory.len(), 3);

        let john = directory.lookup("+15551234567").unwrap();
        assert_eq!(john.id, "C001");
        assert_eq!(john.name, "John Smith");
        assert_eq!(john.tier, CustomerTier::Gold);

        assert_eq!(
            directory.lookup("+15559876543").unwrap().tier,
            CustomerTier::Silver
        );
        assert_eq!(
            directory.lookup("+15551112222").unwrap().tier,
            CustomerTier::Bronze
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        let directory = CustomerDirectory::builtin();
        assert!(directory.lookup("15551234567").is_none());
        assert!(directory.lookup("+1 555 123 4567").is_none());
        assert!(directory.lookup("").is_none());
    }

    #[test]
    fn test_tier_parsing_and_display() {
        assert_eq!("Gold".parse::<CustomerTier>().unwrap(), CustomerTier::Gold);
        assert_eq!(" bronze ".parse::<CustomerTier>().unwrap(), CustomerTier::Bronze);
        assert!("platinum".parse::<CustomerTier>().is_err());
        assert_eq!(CustomerTier::Silver.to_string(), "silver");
    }

    #[test]
    fn test_tier_serde() {
        let json = serde_json::to_string(&CustomerTier::Gold).unwrap();
        assert_eq!(json, "\"gold\"");
        let tier: CustomerTier = serde_json::from_str("\"silver\"").unwrap();
        assert_eq!(tier, CustomerTier::Silver);
    }

    #[test]
    fn test_duplicate_phone_keeps_last() {
        let directory = CustomerDirectory::from_entries([
            ("+1", CustomerRecord::new("A", "First", CustomerTier::Bronze)),
            ("+1", CustomerRecord::new("B", "Second", CustomerTier::Gold)),
        ]);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.lookup("+1").unwrap().id, "B");
    }

    #[test]
    fn test_phones_sorted() {
        let directory = CustomerDirectory::builtin();
        assert_eq!(
            directory.phones(),
            vec!["+15551112222", "+15551234567", "+15559876543"]
        );
    }
}
