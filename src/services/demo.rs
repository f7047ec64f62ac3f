//! Sample data for trying the tracker out

use chrono::{NaiveDate, Utc};

use crate::models::{Money, Period, Transaction, TransactionId, TransactionType};

/// (type, whole units, category, description, day of month)
const DEMO_ENTRIES: &[(TransactionType, i64, &str, &str, u32)] = &[
    (TransactionType::Income, 5500, "Salary", "Monthly salary - Software Developer", 1),
    (TransactionType::Income, 1200, "Freelance", "Web development project", 15),
    (TransactionType::Income, 250, "Investment", "Dividend payment", 10),
    (TransactionType::Expense, 1200, "Bills & Utilities", "Rent payment", 1),
    (TransactionType::Expense, 450, "Food & Dining", "Groceries and dining out", 3),
    (TransactionType::Expense, 280, "Transportation", "Gas and car maintenance", 5),
    (TransactionType::Expense, 150, "Entertainment", "Netflix, Spotify, movies", 7),
    (TransactionType::Expense, 320, "Shopping", "Clothing and electronics", 12),
    (TransactionType::Expense, 180, "Healthcare", "Doctor visit and pharmacy", 14),
    (TransactionType::Expense, 95, "Bills & Utilities", "Internet and phone bill", 16),
    (TransactionType::Expense, 220, "Food & Dining", "Restaurant meals", 18),
    (TransactionType::Expense, 75, "Personal Care", "Haircut and toiletries", 20),
    (TransactionType::Expense, 120, "Education", "Online course subscription", 22),
    (TransactionType::Expense, 200, "Entertainment", "Concert tickets", 25),
    (TransactionType::Expense, 300, "Travel", "Weekend trip", 28),
];

/// A month of sample transactions dated inside `period`
///
/// Ids are `demo-1` through `demo-15`, so loading twice is idempotent.
pub fn generate_demo_data(period: Period) -> Vec<Transaction> {
    let created_at = Utc::now();

    DEMO_ENTRIES
        .iter()
        .enumerate()
        .filter_map(|(i, &(kind, units, category, description, day))| {
            let date = NaiveDate::from_ymd_opt(period.year(), period.month(), day)?;
            Some(Transaction {
                id: TransactionId::from_raw(format!("demo-{}", i + 1)),
                kind,
                amount: Money::from_dollars_cents(units, 0),
                category: category.to_string(),
                description: description.to_string(),
                date,
                created_at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::find_category;
    use crate::services::summary::summarize;

    #[test]
    fn test_demo_data_falls_in_period() {
        let period = Period::parse("2024-02").unwrap();
        let txns = generate_demo_data(period);

        assert_eq!(txns.len(), 15);
        assert!(txns.iter().all(|t| period.contains(t.date)));
        assert_eq!(txns[0].id.as_str(), "demo-1");
        assert_eq!(txns[14].id.as_str(), "demo-15");
    }

    #[test]
    fn test_demo_totals() {
        let period = Period::parse("2024-06").unwrap();
        let data = summarize(&generate_demo_data(period), &[], period);

        assert_eq!(data.total_income.cents(), 695_000);
        assert_eq!(data.total_expenses.cents(), 359_000);
        assert_eq!(data.balance.cents(), 336_000);
    }

    #[test]
    fn test_demo_uses_reference_categories() {
        let txns = generate_demo_data(Period::parse("2024-06").unwrap());
        assert!(txns
            .iter()
            .all(|t| find_category(&t.category, t.kind).is_some()));
        assert!(txns.iter().all(|t| t.validate().is_ok()));
    }
}
