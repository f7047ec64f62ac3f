//! Category reference data
//!
//! Categories are static: the application never creates or deletes them at
//! runtime. Names are unique within a transaction type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TransactionType;

/// A named classification tag for transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Display colour as a hex string
    pub color: String,

    /// Icon name used by front ends
    pub icon: String,
}

impl Category {
    fn reference(
        id: &str,
        name: &str,
        kind: TransactionType,
        color: &str,
        icon: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Default expense categories
pub fn expense_categories() -> Vec<Category> {
    use TransactionType::Expense;
    vec![
        Category::reference("1", "Food & Dining", Expense, "#ef4444", "UtensilsCrossed"),
        Category::reference("2", "Transportation", Expense, "#3b82f6", "Car"),
        Category::reference("3", "Entertainment", Expense, "#8b5cf6", "Gamepad2"),
        Category::reference("4", "Shopping", Expense, "#f59e0b", "ShoppingBag"),
        Category::reference("5", "Healthcare", Expense, "#10b981", "Heart"),
        Category::reference("6", "Education", Expense, "#6366f1", "GraduationCap"),
        Category::reference("7", "Bills & Utilities", Expense, "#dc2626", "Receipt"),
        Category::reference("8", "Travel", Expense, "#0891b2", "Plane"),
        Category::reference("9", "Personal Care", Expense, "#ec4899", "Sparkles"),
        Category::reference("10", "Other", Expense, "#6b7280", "MoreHorizontal"),
    ]
}

/// Default income categories
pub fn income_categories() -> Vec<Category> {
    use TransactionType::Income;
    vec![
        Category::reference("11", "Salary", Income, "#059669", "Briefcase"),
        Category::reference("12", "Freelance", Income, "#0d9488", "Laptop"),
        Category::reference("13", "Investment", Income, "#7c3aed", "TrendingUp"),
        Category::reference("14", "Business", Income, "#ea580c", "Building2"),
        Category::reference("15", "Other Income", Income, "#6b7280", "Plus"),
    ]
}

/// The complete reference set, expenses first
pub fn all_categories() -> Vec<Category> {
    let mut all = expense_categories();
    all.extend(income_categories());
    all
}

/// Look up a category by exact name within a transaction type
pub fn find_category(name: &str, kind: TransactionType) -> Option<Category> {
    all_categories()
        .into_iter()
        .find(|c| c.kind == kind && c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_set_sizes() {
        assert_eq!(expense_categories().len(), 10);
        assert_eq!(income_categories().len(), 5);
        assert_eq!(all_categories().len(), 15);
    }

    #[test]
    fn test_names_unique_within_type() {
        for kind in [TransactionType::Income, TransactionType::Expense] {
            let names: Vec<_> = all_categories()
                .into_iter()
                .filter(|c| c.kind == kind)
                .map(|c| c.name)
                .collect();
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(names.len(), unique.len());
        }
    }

    #[test]
    fn test_find_category_respects_type() {
        assert!(find_category("Salary", TransactionType::Income).is_some());
        assert!(find_category("Salary", TransactionType::Expense).is_none());
        assert!(find_category("salary", TransactionType::Income).is_none());
    }
}
