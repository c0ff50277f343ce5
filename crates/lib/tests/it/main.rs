/*! Integration tests for docshim.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - reference: REST path derivation and resource kinds
 * - documents: Document operations on the Firestore client
 * - batch: Batched writes and concurrent commit
 * - query: Query construction and collection reads
 * - transport: HttpTransport against a local REST server
 * - config: Client configuration and initialization entry points
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("docshim=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod batch;
mod config;
mod documents;
mod reference;
