//! Ledger: the mutation coordinator
//!
//! The ledger owns the transaction and budget collections and is their only
//! writer. After every successful call, each budget's `spent` equals
//! [`calculate_budget_spent`] over the current transactions. Validation runs
//! before any state changes, so a failed call leaves both collections intact.
//!
//! Persistence is a side effect: an optional [`LedgerObserver`] is notified
//! after each change and may save the new state.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    find_category, Budget, BudgetFormData, BudgetId, Money, Period, Transaction,
    TransactionFields, TransactionFormData, TransactionId, TransactionType,
};
use crate::services::summary::{calculate_budget_spent, summarize, MonthlyData};

/// Receives the new state after a ledger mutation
pub trait LedgerObserver {
    fn transactions_changed(&mut self, transactions: &[Transaction]);
    fn budgets_changed(&mut self, budgets: &[Budget]);
}

/// Outcome of merging an imported batch into the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub added: usize,
    pub replaced: usize,
}

/// Owned store over both collections
pub struct Ledger {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    strict_categories: bool,
    observer: Option<Box<dyn LedgerObserver>>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions.len())
            .field("budgets", &self.budgets.len())
            .field("strict_categories", &self.strict_categories)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl Ledger {
    /// Build a ledger from loaded collections
    ///
    /// Stored `spent` values are not trusted; every budget is recomputed.
    pub fn new(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        let mut ledger = Self {
            transactions,
            budgets,
            strict_categories: false,
            observer: None,
        };
        for budget in &mut ledger.budgets {
            budget.recompute(&ledger.transactions);
        }
        ledger
    }

    /// Attach an observer that is told about every change
    pub fn with_observer(mut self, observer: Box<dyn LedgerObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Require categories to belong to the reference set of the matching type
    pub fn with_strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    pub fn get_budget(&self, id: &BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| &b.id == id)
    }

    /// Resolve a full id or the unique prefix shown in listings
    pub fn resolve_id(&self, input: &str) -> FinanceResult<TransactionId> {
        let input = input.trim();
        let ids = self.transactions.iter().map(|t| &t.id);
        resolve_prefix(ids, input, |id| id.as_str())
            .ok_or_else(|| FinanceError::transaction_not_found(input))
    }

    /// Resolve a full budget id or a unique prefix
    pub fn resolve_budget_id(&self, input: &str) -> FinanceResult<BudgetId> {
        let input = input.trim();
        let ids = self.budgets.iter().map(|b| &b.id);
        resolve_prefix(ids, input, |id| id.as_str())
            .ok_or_else(|| FinanceError::budget_not_found(input))
    }

    /// Monthly view over the current state
    pub fn summarize(&self, period: Period) -> MonthlyData {
        summarize(&self.transactions, &self.budgets, period)
    }

    /// Record a new transaction; it is placed first (most recent first)
    pub fn add(&mut self, form: &TransactionFormData) -> FinanceResult<Transaction> {
        let fields = self.validate_form(form)?;

        let mut txn = Transaction::new(
            fields.kind,
            fields.amount,
            fields.category,
            fields.description,
            fields.date,
        );
        while self.get(&txn.id).is_some() {
            txn.id = TransactionId::new();
        }

        self.transactions.insert(0, txn.clone());
        debug!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "added transaction");

        let budgets_touched = if txn.is_expense() {
            self.recompute_matching(&txn.category, txn.period())
        } else {
            false
        };
        self.notify(true, budgets_touched);

        Ok(txn)
    }

    /// Replace every field except `id` and `created_at`
    pub fn update(
        &mut self,
        id: &TransactionId,
        form: &TransactionFormData,
    ) -> FinanceResult<Transaction> {
        let idx = self
            .position(id)
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;
        let fields = self.validate_form(form)?;

        let before = self.transactions[idx].clone();
        let txn = &mut self.transactions[idx];
        txn.kind = fields.kind;
        txn.amount = fields.amount;
        txn.category = fields.category;
        txn.description = fields.description;
        txn.date = fields.date;
        let after = txn.clone();

        debug!(id = %after.id, "updated transaction");

        // Both the old and the new (category, month) pair may have changed.
        let mut budgets_touched = false;
        if before.is_expense() {
            budgets_touched |= self.recompute_matching(&before.category, before.period());
        }
        if after.is_expense() {
            budgets_touched |= self.recompute_matching(&after.category, after.period());
        }
        self.notify(true, budgets_touched);

        Ok(after)
    }

    /// Remove a transaction; unknown ids are an error
    pub fn delete(&mut self, id: &TransactionId) -> FinanceResult<Transaction> {
        let idx = self
            .position(id)
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;

        let removed = self.transactions.remove(idx);
        debug!(id = %removed.id, "deleted transaction");

        let budgets_touched = if removed.is_expense() {
            self.recompute_matching(&removed.category, removed.period())
        } else {
            false
        };
        self.notify(true, budgets_touched);

        Ok(removed)
    }

    /// Create a budget for `month`; `spent` is always computed
    pub fn add_budget(&mut self, form: &BudgetFormData, month: Period) -> FinanceResult<Budget> {
        let (category, amount) = self.validate_budget_form(form)?;

        let mut budget = Budget::new(category, amount, month, &self.transactions);
        while self.get_budget(&budget.id).is_some() {
            budget.id = BudgetId::new();
        }

        self.budgets.push(budget.clone());
        debug!(id = %budget.id, category = %budget.category, month = %budget.month, "added budget");
        self.notify(false, true);

        Ok(budget)
    }

    /// Change a budget's category and limit; its month is kept
    pub fn update_budget(&mut self, id: &BudgetId, form: &BudgetFormData) -> FinanceResult<Budget> {
        let idx = self
            .budgets
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| FinanceError::budget_not_found(id.to_string()))?;
        let (category, amount) = self.validate_budget_form(form)?;

        let budget = &mut self.budgets[idx];
        budget.category = category;
        budget.amount = amount;
        budget.recompute(&self.transactions);
        let updated = budget.clone();

        debug!(id = %updated.id, "updated budget");
        self.notify(false, true);

        Ok(updated)
    }

    pub fn delete_budget(&mut self, id: &BudgetId) -> FinanceResult<Budget> {
        let idx = self
            .budgets
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| FinanceError::budget_not_found(id.to_string()))?;

        let removed = self.budgets.remove(idx);
        debug!(id = %removed.id, "deleted budget");
        self.notify(false, true);

        Ok(removed)
    }

    /// Merge an already validated batch
    ///
    /// Records whose id already exists replace the stored transaction in
    /// place; the rest are placed first, keeping batch order.
    pub fn import(&mut self, batch: Vec<Transaction>) -> FinanceResult<ImportSummary> {
        let mut seen = HashSet::new();
        for txn in &batch {
            txn.validate()?;
            if !seen.insert(txn.id.clone()) {
                return Err(FinanceError::Import(format!(
                    "duplicate id '{}' in batch",
                    txn.id
                )));
            }
            self.check_category(&txn.category, txn.kind)?;
        }

        let mut summary = ImportSummary::default();
        let mut fresh = Vec::new();
        for txn in batch {
            match self.position(&txn.id) {
                Some(idx) => {
                    self.transactions[idx] = txn;
                    summary.replaced += 1;
                }
                None => {
                    fresh.push(txn);
                    summary.added += 1;
                }
            }
        }
        fresh.append(&mut self.transactions);
        self.transactions = fresh;

        self.recompute_all_budgets();
        info!(added = summary.added, replaced = summary.replaced, "imported transactions");
        self.notify(true, true);

        Ok(summary)
    }

    /// Swap in a whole new transaction collection (e.g. demo data)
    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) -> FinanceResult<()> {
        let mut seen = HashSet::new();
        for txn in &transactions {
            txn.validate()?;
            if !seen.insert(txn.id.clone()) {
                return Err(FinanceError::Import(format!("duplicate id '{}'", txn.id)));
            }
        }

        self.transactions = transactions;
        self.recompute_all_budgets();
        self.notify(true, true);
        Ok(())
    }

    /// Drop every transaction and budget
    pub fn clear_all(&mut self) {
        self.transactions.clear();
        self.budgets.clear();
        self.notify(true, true);
    }

    /// Recompute every budget from scratch
    pub fn recompute_all_budgets(&mut self) {
        for budget in &mut self.budgets {
            budget.recompute(&self.transactions);
        }
    }

    /// True when every budget's cached figure matches a fresh computation
    pub fn budgets_consistent(&self) -> bool {
        self.budgets.iter().all(|b| {
            b.spent() == calculate_budget_spent(&self.transactions, &b.category, b.month)
        })
    }

    /// Total limit and spend over the budgets for one month
    pub fn budget_totals(&self, month: Period) -> (Money, Money) {
        self.budgets
            .iter()
            .filter(|b| b.month == month)
            .fold((Money::zero(), Money::zero()), |(limit, spent), b| {
                (limit + b.amount, spent + b.spent())
            })
    }

    fn position(&self, id: &TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| &t.id == id)
    }

    fn recompute_matching(&mut self, category: &str, month: Period) -> bool {
        let mut touched = false;
        for budget in self.budgets.iter_mut().filter(|b| b.tracks(category, month)) {
            budget.recompute(&self.transactions);
            debug!(budget = %budget.id, spent = %budget.spent(), "recomputed budget");
            touched = true;
        }
        touched
    }

    fn validate_form(&self, form: &TransactionFormData) -> FinanceResult<TransactionFields> {
        let fields = form.validate()?;
        self.check_category(&fields.category, fields.kind)?;
        Ok(fields)
    }

    fn validate_budget_form(&self, form: &BudgetFormData) -> FinanceResult<(String, Money)> {
        let (category, amount) = form.validate()?;
        self.check_category(&category, TransactionType::Expense)?;
        Ok((category, amount))
    }

    fn check_category(&self, name: &str, kind: TransactionType) -> FinanceResult<()> {
        if self.strict_categories && find_category(name, kind).is_none() {
            return Err(FinanceError::UnknownCategory {
                name: name.to_string(),
                kind: kind.to_string(),
            });
        }
        Ok(())
    }

    fn notify(&mut self, transactions: bool, budgets: bool) {
        if let Some(observer) = self.observer.as_mut() {
            if transactions {
                observer.transactions_changed(&self.transactions);
            }
            if budgets {
                observer.budgets_changed(&self.budgets);
            }
        }
    }
}

/// Exact match wins; otherwise the prefix must match exactly one id
fn resolve_prefix<'a, I, T>(ids: I, input: &str, as_str: impl Fn(&T) -> &str) -> Option<T>
where
    I: Iterator<Item = &'a T> + Clone,
    T: Clone + 'a,
{
    if input.is_empty() {
        return None;
    }
    if let Some(id) = ids.clone().find(|id| as_str(id) == input) {
        return Some(id.clone());
    }
    let mut candidates = ids.filter(|id| as_str(id).starts_with(input));
    match (candidates.next(), candidates.next()) {
        (Some(id), None) => Some(id.clone()),
        _ => None,
    }
}
