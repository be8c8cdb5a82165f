//! The record entity inserted by every strategy.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::errors::InputError;

/// Lifecycle status stored with each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
    Pending,
    Completed,
}

impl RecordStatus {
    /// Every status, in declaration order.
    pub const ALL: [RecordStatus; 4] = [
        Self::Active,
        Self::Inactive,
        Self::Pending,
        Self::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InputError::InvalidValue {
                field: "status",
                message: format!("unknown status '{s}'"),
            })
    }
}

/// Exact decimal amount with two fraction digits, held as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Round a float to two decimal places, half-up (away from zero).
    ///
    /// Rounding operates on the shortest decimal representation of `value`,
    /// so `0.125` becomes `0.13` and `2.675` becomes `2.68` even though
    /// neither is exactly representable in binary.
    pub fn from_f64_half_up(value: f64) -> Result<Self, InputError> {
        if !value.is_finite() {
            return Err(InputError::InvalidValue {
                field: "amount",
                message: format!("{value} is not a finite number"),
            });
        }
        // Above this the cents no longer fit comfortably in i64.
        if value.abs() >= 9.0e16 {
            return Err(InputError::InvalidValue {
                field: "amount",
                message: format!("{value} is out of range"),
            });
        }

        let text = format!("{}", value.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let whole: i64 = int_part.parse().map_err(|_| InputError::InvalidValue {
            field: "amount",
            message: format!("cannot parse {text}"),
        })?;

        let mut digits = frac_part.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let carry = i64::from(digits.next().unwrap_or(0) >= 5);

        let cents = whole * 100 + tenths * 10 + hundredths + carry;
        Ok(Self(if value.is_sign_negative() { -cents } else { cents }))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// One row of benchmark payload. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: Option<i64>,
    primary: String,
    secondary: Option<String>,
    amount: Option<Amount>,
    status: RecordStatus,
    created_at: DateTime<Utc>,
}

impl Record {
    /// Build a record with its required fields. Status defaults to ACTIVE.
    pub fn new(primary: impl Into<String>, created_at: DateTime<Utc>) -> Result<Self, InputError> {
        let primary = primary.into();
        if primary.is_empty() {
            return Err(InputError::MissingField { field: "primary" });
        }
        Ok(Self {
            id: None,
            primary,
            secondary: None,
            amount: None,
            status: RecordStatus::default(),
            created_at,
        })
    }

    pub fn with_secondary(mut self, secondary: Option<String>) -> Self {
        self.secondary = secondary;
        self
    }

    pub fn with_amount(mut self, amount: Option<Amount>) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    /// A copy of this record carrying a store-assigned identity.
    pub fn with_id(&self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_123).unwrap()
    }

    #[test]
    fn new_defaults_status_to_active() {
        let r = Record::new("abc", ts()).unwrap();
        assert_eq!(r.status(), RecordStatus::Active);
        assert!(r.id().is_none());
        assert!(r.secondary().is_none());
        assert!(r.amount().is_none());
    }

    #[test]
    fn empty_primary_is_rejected() {
        let err = Record::new("", ts()).unwrap_err();
        assert_eq!(err, InputError::MissingField { field: "primary" });
    }

    #[test]
    fn with_id_leaves_original_untouched() {
        let original = Record::new("abc", ts())
            .unwrap()
            .with_secondary(Some("xyz".to_string()))
            .with_amount(Some(Amount::from_cents(1234)))
            .with_status(RecordStatus::Pending);
        let copy = original.with_id(7);

        assert_eq!(original.id(), None);
        assert_eq!(copy.id(), Some(7));
        assert_eq!(copy.primary(), original.primary());
        assert_eq!(copy.secondary(), Some("xyz"));
        assert_eq!(copy.amount(), Some(Amount::from_cents(1234)));
        assert_eq!(copy.status(), RecordStatus::Pending);
        assert_eq!(copy.created_at(), original.created_at());
    }

    #[test]
    fn status_parses_its_own_display() {
        for status in RecordStatus::ALL {
            assert_eq!(status.to_string().parse::<RecordStatus>().unwrap(), status);
        }
        assert!("active".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn amount_rounds_half_up() {
        assert_eq!(Amount::from_f64_half_up(0.125).unwrap().cents(), 13);
        assert_eq!(Amount::from_f64_half_up(2.675).unwrap().cents(), 268);
        assert_eq!(Amount::from_f64_half_up(1.004).unwrap().cents(), 100);
        assert_eq!(Amount::from_f64_half_up(999_999.999).unwrap().cents(), 100_000_000);
        assert_eq!(Amount::from_f64_half_up(-0.125).unwrap().cents(), -13);
        assert_eq!(Amount::from_f64_half_up(42.0).unwrap().cents(), 4200);
    }

    #[test]
    fn amount_rejects_non_finite() {
        assert!(Amount::from_f64_half_up(f64::NAN).is_err());
        assert!(Amount::from_f64_half_up(f64::INFINITY).is_err());
    }

    #[test]
    fn amount_display_has_two_decimals() {
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        assert_eq!(Amount::from_cents(123_456).to_string(), "1234.56");
        assert_eq!(Amount::from_cents(-250).to_string(), "-2.50");
    }
}
