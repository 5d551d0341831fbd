//! Finance — expense tracking with AI categorization.

pub mod models;
pub mod page;

use serde::Deserialize;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::ui;

use models::{Expense, ExpenseCreated, ExpenseSummary, NewExpense};

#[derive(Debug, Deserialize)]
struct ExpenseList {
    expenses: Vec<Expense>,
}

#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    summary: ExpenseSummary,
}

pub async fn fetch_expenses(
    api: &ApiClient,
    organization_id: Uuid,
) -> Result<Vec<Expense>, ClientError> {
    let list: ExpenseList = api
        .get(
            "/api/expenses",
            &[("organization_id", organization_id.to_string())],
        )
        .await?;
    Ok(list.expenses)
}

pub async fn fetch_summary(
    api: &ApiClient,
    organization_id: Uuid,
) -> Result<ExpenseSummary, ClientError> {
    let envelope: SummaryEnvelope = api
        .get(
            "/api/expenses/summary",
            &[("organization_id", organization_id.to_string())],
        )
        .await?;
    Ok(envelope.summary)
}

/// Creates an expense; the backend categorizes it before storing.
pub async fn create_expense(
    api: &ApiClient,
    expense: &NewExpense,
) -> Result<ExpenseCreated, ClientError> {
    api.post("/api/expense/create", expense).await
}

/// The confirmation line shown after a successful creation, e.g.
/// `Expense added — category Client Meetings, confidence 82%`.
pub fn confirmation(category: &str, confidence: f64) -> String {
    format!(
        "Expense added — category {category}, confidence {}",
        ui::percent(confidence)
    )
}

/// Categories sorted by spend, largest first, bounded to `limit`.
pub fn top_categories(summary: &ExpenseSummary, limit: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = summary
        .by_category
        .iter()
        .map(|(category, amount)| (category.clone(), *amount))
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.truncate(limit);
    entries
}
