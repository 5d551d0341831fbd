//! Magic import: the analyze-before-import gate and the two upload calls.

mod support;

use std::io::Write;

use lightning_client::errors::ClientError;
use lightning_client::migration::CsvImport;
use lightning_client::state::{self, AppContext};

use support::{Stub, StubState};

const CSV: &[u8] = b"Date,Desc,Cost\n2024-01-05,Team lunch,42.00\n2024-01-06,Taxi,18.50\n";

async fn context(stub: &Stub) -> AppContext {
    let config = stub.config();
    let credentials = state::credentials_from(&config).unwrap();
    AppContext::establish(&config, &credentials, false)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_import_unreachable_until_analyze_succeeds() {
    let stub = Stub::spawn(StubState::new()).await;
    let context = context(&stub).await;

    let import = CsvImport::new("expenses.csv", CSV.to_vec());
    assert!(!import.can_import());

    let err = import
        .import(&context.api, context.organization_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AnalyzeRequired));
    assert_eq!(stub.count("/api/migration/import-expenses"), 0);
}

#[tokio::test]
async fn test_analyze_then_import() {
    let stub = Stub::spawn(StubState::new()).await;
    let context = context(&stub).await;

    let mut import = CsvImport::new("expenses.csv", CSV.to_vec());
    let analysis = import.analyze(&context.api).await.unwrap();

    assert_eq!(
        analysis.mapping.mapping.get("Date").map(String::as_str),
        Some("expense_date")
    );
    assert_eq!(analysis.total_rows, 2);
    assert!(!analysis.mapping.warnings.is_empty());

    assert!(import.can_import());
    let outcome = import
        .import(&context.api, context.organization_id)
        .await
        .unwrap();
    assert_eq!(outcome.imported, 2);

    // Analyze strictly precedes import on the wire.
    let hits = stub.hits();
    let analyze_at = hits
        .iter()
        .position(|hit| hit.contains("/api/migration/analyze-csv"))
        .unwrap();
    let import_at = hits
        .iter()
        .position(|hit| hit.contains("/api/migration/import-expenses"))
        .unwrap();
    assert!(analyze_at < import_at);
}

#[tokio::test]
async fn test_from_path_reads_the_file() {
    let stub = Stub::spawn(StubState::new()).await;
    let context = context(&stub).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(CSV).unwrap();

    let mut import = CsvImport::from_path(&path).unwrap();
    assert_eq!(import.file_name(), "expenses.csv");

    let analysis = import.analyze(&context.api).await.unwrap();
    assert_eq!(analysis.total_rows, 2);
}
