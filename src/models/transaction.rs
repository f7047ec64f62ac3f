//! Transaction model
//!
//! A transaction is a single income or expense event. The stored amount is
//! always positive; the direction is carried by [`TransactionType`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use super::period::Period;
use crate::error::{FinanceError, FinanceResult};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(FinanceError::Import(format!(
                "unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, immutable once assigned
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Always positive
    pub amount: Money,

    pub category: String,

    pub description: String,

    /// Calendar date, no time zone
    pub date: NaiveDate,

    /// When the transaction was first recorded, immutable
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with a fresh id and creation timestamp
    pub fn new(
        kind: TransactionType,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            date,
            created_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// The period this transaction's date falls in
    pub fn period(&self) -> Period {
        Period::of(self.date)
    }

    /// Amount with the direction applied: negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Check the stored invariants
    pub fn validate(&self) -> FinanceResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(FinanceError::MissingField("id"));
        }
        if !self.amount.is_positive() || !self.amount.within_limit() {
            return Err(FinanceError::InvalidAmount(self.amount.to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(FinanceError::MissingField("category"));
        }
        if self.description.trim().is_empty() {
            return Err(FinanceError::MissingField("description"));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Raw user input for creating or editing a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormData {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
}

/// Validated field values from a [`TransactionFormData`]
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub kind: TransactionType,
    pub amount: Money,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl TransactionFormData {
    pub fn new(
        kind: TransactionType,
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            date: date.into(),
        }
    }

    /// Validate the form, producing typed fields
    ///
    /// Amount errors are reported first, then missing fields in form order.
    pub fn validate(&self) -> FinanceResult<TransactionFields> {
        let amount = parse_positive_amount(&self.amount)?;

        let category = required(&self.category, "category")?;
        let description = required(&self.description, "description")?;
        let date = parse_date(required(&self.date, "date")?)?;

        Ok(TransactionFields {
            kind: self.kind,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
        })
    }
}

/// Parse a user-supplied amount that must be strictly positive
pub fn parse_positive_amount(raw: &str) -> FinanceResult<Money> {
    let amount =
        Money::parse(raw).map_err(|_| FinanceError::InvalidAmount(raw.trim().to_string()))?;
    if !amount.is_positive() || !amount.within_limit() {
        return Err(FinanceError::InvalidAmount(raw.trim().to_string()));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(raw: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| FinanceError::InvalidDate(raw.trim().to_string()))
}

pub(crate) fn required<'a>(value: &'a str, field: &'static str) -> FinanceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FinanceError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(amount: &str, category: &str, description: &str, date: &str) -> TransactionFormData {
        TransactionFormData::new(TransactionType::Expense, amount, category, description, date)
    }

    #[test]
    fn test_new_transaction() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::new(
            TransactionType::Expense,
            Money::from_cents(5000),
            "Food",
            "Groceries",
            date,
        );
        assert!(txn.is_expense());
        assert_eq!(txn.period().to_string(), "2025-01");
        assert_eq!(txn.signed_amount().cents(), -5000);
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_form_validation() {
        let fields = form("12.50", " Food ", "Lunch", "2024-03-05").validate().unwrap();
        assert_eq!(fields.amount.cents(), 1250);
        assert_eq!(fields.category, "Food");
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_form_rejects_bad_amounts() {
        for bad in ["", "abc", "0", "-5", "0.00"] {
            assert!(
                matches!(
                    form(bad, "Food", "Lunch", "2024-03-05").validate(),
                    Err(FinanceError::InvalidAmount(_))
                ),
                "amount {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_amounts_above_limit_are_rejected() {
        assert_eq!(
            parse_positive_amount("92233720368.54").unwrap(),
            Money::MAX_AMOUNT
        );
        assert!(parse_positive_amount("92233720368.55").is_err());
        assert!(matches!(
            parse_positive_amount("90000000000000000"),
            Err(FinanceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_id_and_oversized_amount() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut txn = Transaction::new(
            TransactionType::Income,
            Money::from_cents(100),
            "Salary",
            "Pay",
            date,
        );

        txn.id = TransactionId::from_raw("  ");
        assert!(matches!(txn.validate(), Err(FinanceError::MissingField("id"))));

        txn.id = TransactionId::from_raw("t1");
        txn.amount = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        assert!(matches!(txn.validate(), Err(FinanceError::InvalidAmount(_))));
    }

    #[test]
    fn test_form_rejects_missing_fields() {
        assert!(matches!(
            form("5", "", "Lunch", "2024-03-05").validate(),
            Err(FinanceError::MissingField("category"))
        ));
        assert!(matches!(
            form("5", "Food", "   ", "2024-03-05").validate(),
            Err(FinanceError::MissingField("description"))
        ));
        assert!(matches!(
            form("5", "Food", "Lunch", "").validate(),
            Err(FinanceError::MissingField("date"))
        ));
    }

    #[test]
    fn test_form_rejects_invalid_dates() {
        assert!(matches!(
            form("5", "Food", "Lunch", "2023-02-29").validate(),
            Err(FinanceError::InvalidDate(_))
        ));
        assert!(matches!(
            form("5", "Food", "Lunch", "03/05/2024").validate(),
            Err(FinanceError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_serialization_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut txn = Transaction::new(
            TransactionType::Income,
            Money::from_cents(100_000),
            "Salary",
            "March pay",
            date,
        );
        txn.id = TransactionId::from_raw("t1");

        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["id"], "t1");
        assert_eq!(value["type"], "income");
        assert_eq!(value["amount"], 1000);
        assert_eq!(value["date"], "2024-03-01");
        assert!(value.get("createdAt").is_some());

        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
