//! Display attributes for transaction statuses and types.

use serde::Serialize;

use super::core::{TransactionStatus, TransactionType};

/// The label and color a presentation layer shows for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// Human-readable label, e.g. "Overdue".
    pub label: &'static str,
    /// Color name, one of "green", "yellow" or "red".
    pub color: &'static str,
}

impl TransactionStatus {
    /// The badge for this status.
    pub fn badge(self) -> Badge {
        match self {
            Self::Paid => Badge {
                label: "Paid",
                color: "green",
            },
            Self::Pending => Badge {
                label: "Pending",
                color: "yellow",
            },
            Self::Overdue => Badge {
                label: "Overdue",
                color: "red",
            },
        }
    }
}

impl TransactionType {
    /// The badge for this transaction type.
    pub fn badge(self) -> Badge {
        match self {
            Self::Income => Badge {
                label: "Income",
                color: "green",
            },
            Self::Expense => Badge {
                label: "Expense",
                color: "red",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::transaction::{TransactionStatus, TransactionType};

    #[test]
    fn status_badges() {
        assert_eq!(TransactionStatus::Paid.badge().color, "green");
        assert_eq!(TransactionStatus::Pending.badge().color, "yellow");
        assert_eq!(TransactionStatus::Overdue.badge().label, "Overdue");
        assert_eq!(TransactionStatus::Overdue.badge().color, "red");
    }

    #[test]
    fn type_badges() {
        assert_eq!(TransactionType::Income.badge().label, "Income");
        assert_eq!(TransactionType::Expense.badge().color, "red");
    }
}
