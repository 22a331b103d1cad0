
use pr_store::{CredentialStore, JsonStore};

use tempfile::TempDir;

pub(crate) fn temp_credentials() -> (TempDir, CredentialStore) {
    let temp = TempDir::new().unwrap();
    let store = JsonStore::open(temp.path()).unwrap();
    let credentials = CredentialStore::load(store).unwrap();
    (temp, credentials)
}
