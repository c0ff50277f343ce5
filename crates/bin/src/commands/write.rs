//! Document write commands: set, delete and add.

use docshim::{Firestore, SetOptions};

use super::CommandResult;
use crate::cli::{OutputFormat, RefArgs, WriteArgs};
use crate::output::print_snapshot;

/// Run the `set` command
pub async fn set(db: &Firestore, args: &WriteArgs, format: OutputFormat) -> CommandResult {
    let snapshot = db
        .set_doc(&db.doc(&args.segments), &args.data, SetOptions::default())
        .await?;
    print_snapshot(&snapshot, format)?;
    Ok(())
}

/// Run the `delete` command
pub async fn delete(db: &Firestore, args: &RefArgs, format: OutputFormat) -> CommandResult {
    let snapshot = db.delete_doc(&db.doc(&args.segments)).await?;
    print_snapshot(&snapshot, format)?;
    Ok(())
}

/// Run the `add` command
pub async fn add(db: &Firestore, args: &WriteArgs, format: OutputFormat) -> CommandResult {
    let snapshot = db
        .add_doc(&db.collection(&args.segments), &args.data)
        .await?;
    print_snapshot(&snapshot, format)?;
    Ok(())
}
