//! Read-only document commands: get, list, exists and query.

use docshim::{Firestore, QueryConstraint, where_};
use serde_json::json;
use tracing::debug;

use super::CommandResult;
use crate::cli::{OutputFormat, QueryArgs, RefArgs};
use crate::output::{print_snapshot, print_value};

/// Run the `get` command
pub async fn get(db: &Firestore, args: &RefArgs, format: OutputFormat) -> CommandResult {
    let snapshot = db.get_doc(&db.doc(&args.segments)).await?;
    print_snapshot(&snapshot, format)?;
    Ok(())
}

/// Run the `list` command
pub async fn list(db: &Firestore, args: &RefArgs, format: OutputFormat) -> CommandResult {
    let snapshot = db.get_docs(&db.collection(&args.segments)).await?;
    print_snapshot(&snapshot, format)?;
    Ok(())
}

/// Run the `exists` command
pub async fn exists(db: &Firestore, args: &RefArgs, format: OutputFormat) -> CommandResult {
    let reference = db.doc(&args.segments);
    let exists = db.document_exists(reference.rest_path()).await?;
    print_value(
        &json!({ "path": reference.rest_path(), "exists": exists }),
        format,
    )?;
    Ok(())
}

/// Run the `query` command
pub async fn query(db: &Firestore, args: &QueryArgs, format: OutputFormat) -> CommandResult {
    let constraints = constraints(&args.constraints);
    let query = db.query(&db.collection(&args.segments), &constraints)?;
    debug!(path = query.path(), "Resolved query");
    let snapshot = db.get_docs(&query).await?;
    print_snapshot(&snapshot, format)?;
    Ok(())
}

/// Group flat `--where` values into constraints of three.
fn constraints(values: &[String]) -> Vec<QueryConstraint> {
    values
        .chunks_exact(3)
        .map(|c| where_(c[0].as_str(), c[1].as_str(), c[2].as_str()))
        .collect()
}
