//! Magic import page: analyze a CSV, show the inferred mapping, confirm,
//! import.

use std::path::Path;

use crate::errors::ClientError;
use crate::migration::CsvImport;
use crate::state::AppContext;
use crate::ui;

pub async fn run(
    context: &AppContext,
    path: &Path,
    analyze_only: bool,
    assume_yes: bool,
) -> Result<(), ClientError> {
    let mut import = CsvImport::from_path(path)?;
    ui::banner(
        "Magic Import",
        &format!("{} — AI will figure out the rest", import.file_name()),
    );

    let analysis = import.analyze(&context.api).await?;

    ui::section("Detected fields");
    let mut table = ui::table(&["CSV column", "Target field"]);
    for (column, field) in &analysis.mapping.mapping {
        table.add_row(vec![column.clone(), field.clone()]);
    }
    println!("{table}");
    println!(
        "  Confidence: {} over {} rows",
        ui::percent(analysis.mapping.confidence),
        analysis.total_rows
    );

    if !analysis.mapping.warnings.is_empty() {
        ui::section("Warnings");
        for warning in &analysis.mapping.warnings {
            println!("  ! {warning}");
        }
    }

    if !analysis.preview.is_empty() {
        ui::section("Preview (first rows)");
        for row in analysis.preview.iter().take(3) {
            println!("  {row}");
        }
    }

    if analyze_only {
        return Ok(());
    }

    if !assume_yes {
        let mut editor = ui::editor()?;
        if !ui::confirm(&mut editor, "Import these expenses now?") {
            return Ok(());
        }
    }

    let outcome = import.import(&context.api, context.organization_id).await?;
    ui::success_line(&format!(
        "Imported {} of {} expenses",
        outcome.imported, outcome.total
    ));
    Ok(())
}
