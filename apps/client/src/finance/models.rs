use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub vendor: Option<String>,
    pub expense_date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub ai_categorized: bool,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseSummary {
    pub total: f64,
    #[serde(default)]
    pub by_category: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub vendor: Option<String>,
    pub expense_date: NaiveDate,
    pub organization_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
}

/// Creation response: the stored expense plus what the AI decided.
#[derive(Debug, Deserialize)]
pub struct ExpenseCreated {
    #[serde(default)]
    pub expense: Option<Expense>,
    pub ai_category: String,
    pub confidence: f64,
}
