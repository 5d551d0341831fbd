//! Finance pages: add an expense, list expenses with the category summary.

use chrono::{Local, NaiveDate};

use crate::errors::ClientError;
use crate::finance::{self, models::NewExpense};
use crate::state::AppContext;
use crate::ui;

pub async fn run_add(
    context: &AppContext,
    description: String,
    amount: f64,
    vendor: Option<String>,
    date: Option<NaiveDate>,
) -> Result<(), ClientError> {
    let expense = NewExpense {
        description,
        amount,
        vendor,
        expense_date: date.unwrap_or_else(|| Local::now().date_naive()),
        organization_id: context.organization_id,
        project_id: None,
    };

    let created = finance::create_expense(&context.api, &expense).await?;
    ui::success_line(&finance::confirmation(&created.ai_category, created.confidence));

    // Land on the expense list, like the form does after a save.
    run_list(context).await
}

pub async fn run_list(context: &AppContext) -> Result<(), ClientError> {
    let expenses = finance::fetch_expenses(&context.api, context.organization_id).await?;
    let summary = finance::fetch_summary(&context.api, context.organization_id).await?;

    let mut table = ui::table(&["Date", "Description", "Vendor", "Category", "Amount"]);
    for expense in &expenses {
        table.add_row(vec![
            expense.expense_date.to_string(),
            expense.description.clone(),
            expense.vendor.clone().unwrap_or_default(),
            expense.category.clone().unwrap_or_default(),
            format!("${:.2}", expense.amount),
        ]);
    }
    println!("{table}");

    ui::section(&format!("Total spending: ${:.2}", summary.total));
    for (category, amount) in finance::top_categories(&summary, 3) {
        println!("  {category:<24} ${amount:.2}");
    }
    Ok(())
}
