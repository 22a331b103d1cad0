
use crate::JsonStore;

use tempfile::TempDir;

/// Fresh store in its own temp directory; keep the `TempDir` alive for the test.
pub(crate) fn temp_store() -> (TempDir, JsonStore) {
    let temp = TempDir::new().unwrap();
    let store = JsonStore::open(temp.path().join("data")).unwrap();
    (temp, store)
}
