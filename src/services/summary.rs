//! Aggregation engine
//!
//! Turns the flat transaction collection into period-scoped views: monthly
//! totals, expense breakdowns by category, and the authoritative budget
//! "spent" figure. Every function here is pure.

use serde::Serialize;

use crate::models::{Budget, Money, Period, Transaction, TransactionType};

/// Derived summary for one period; recomputed on demand, never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    #[serde(rename = "month")]
    pub period: Period,
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`; may be negative
    pub balance: Money,
    /// Transactions dated within the period, in collection order
    pub transactions: Vec<Transaction>,
    /// Budgets whose month is exactly this period
    pub budgets: Vec<Budget>,
}

impl MonthlyData {
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.budgets.is_empty()
    }
}

/// One row of an expense breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    /// Share of the period's total expenses, rounded to one decimal
    pub percentage_of_total: f64,
}

/// Income, expense and net per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    pub income: Money,
    pub expense: Money,
    pub net: Money,
}

/// Transactions whose date falls within the period, order preserved
pub fn transactions_in_period<'a>(
    transactions: &'a [Transaction],
    period: Period,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |t| period.contains(t.date))
}

/// Sum income and expense amounts over any slice
pub fn totals<'a, I>(transactions: I) -> (Money, Money)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold((Money::zero(), Money::zero()), |(income, expenses), t| match t.kind {
            TransactionType::Income => (income + t.amount, expenses),
            TransactionType::Expense => (income, expenses + t.amount),
        })
}

/// Build the monthly view for a period
pub fn summarize(transactions: &[Transaction], budgets: &[Budget], period: Period) -> MonthlyData {
    let in_period: Vec<Transaction> = transactions_in_period(transactions, period)
        .cloned()
        .collect();
    let (total_income, total_expenses) = totals(&in_period);

    let budgets = budgets
        .iter()
        .filter(|b| b.month == period)
        .cloned()
        .collect();

    MonthlyData {
        period,
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transactions: in_period,
        budgets,
    }
}

/// Expense totals per category for a period, largest first
///
/// Ties keep the order in which categories were first encountered. The full
/// list is returned; use [`top`] to cap it for display.
pub fn category_breakdown(transactions: &[Transaction], period: Period) -> Vec<CategoryShare> {
    let mut sums: Vec<(String, Money)> = Vec::new();

    for txn in transactions_in_period(transactions, period).filter(|t| t.is_expense()) {
        match sums.iter_mut().find(|(category, _)| *category == txn.category) {
            Some((_, amount)) => *amount += txn.amount,
            None => sums.push((txn.category.clone(), txn.amount)),
        }
    }

    let total: Money = sums.iter().map(|(_, amount)| *amount).sum();

    // Vec::sort_by is stable, so equal amounts stay in first-seen order.
    sums.sort_by(|a, b| b.1.cmp(&a.1));

    sums.into_iter()
        .map(|(category, amount)| CategoryShare {
            percentage_of_total: percentage(amount, total),
            category,
            amount,
        })
        .collect()
}

/// The first `n` rows of a breakdown
pub fn top(breakdown: &[CategoryShare], n: usize) -> &[CategoryShare] {
    &breakdown[..n.min(breakdown.len())]
}

/// Income, expense and net per category for a period, in first-seen order
pub fn category_totals(transactions: &[Transaction], period: Period) -> Vec<CategoryTotals> {
    let mut rows: Vec<CategoryTotals> = Vec::new();

    for txn in transactions_in_period(transactions, period) {
        let idx = match rows.iter().position(|r| r.category == txn.category) {
            Some(idx) => idx,
            None => {
                rows.push(CategoryTotals {
                    category: txn.category.clone(),
                    income: Money::zero(),
                    expense: Money::zero(),
                    net: Money::zero(),
                });
                rows.len() - 1
            }
        };
        let row = &mut rows[idx];
        match txn.kind {
            TransactionType::Income => row.income += txn.amount,
            TransactionType::Expense => row.expense += txn.amount,
        }
        row.net = row.income - row.expense;
    }

    rows
}

/// Sum of expenses in `category` (exact, case-sensitive) dated within `month`
///
/// This is the single source of truth for [`Budget`] spent values.
pub fn calculate_budget_spent(transactions: &[Transaction], category: &str, month: Period) -> Money {
    transactions_in_period(transactions, month)
        .filter(|t| t.is_expense() && t.category == category)
        .map(|t| t.amount)
        .sum()
}

/// `part / total * 100` rounded to one decimal; 0 when the total is zero
fn percentage(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    let raw = part.cents() as f64 / total.cents() as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
