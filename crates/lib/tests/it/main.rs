/*! Integration tests for Typed Collections.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - types: Tests for declared types, the TypeRegistry and the TypeValidator
 * - collection: Tests for Map, Sequence, their indexes and functional operations
 * - serialization: Tests for JSON import and export of both collections
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("typed_collections=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}
