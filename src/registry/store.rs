//! Key and value primitives shared by every registry backend.

use std::io::{self, ErrorKind};
use tracing::{debug, warn};

/// Primitive operations on keys below one fixed root hive.
///
/// Paths are backslash separated and relative to the root. A `Key` is an
/// open handle; dropping it releases the handle, so callers hold one only
/// for the statement block that needs it.
pub trait KeyStore {
    /// Open handle to a single key.
    type Key;

    /// Creates `path` (and any missing parents) or opens it if present.
    ///
    /// The flag is `true` when the key already existed. Only permission or
    /// handle errors fail; an existing key never does.
    fn ensure_key(&self, path: &str) -> io::Result<(Self::Key, bool)>;

    /// Writes a string value. An empty `name` addresses the default value.
    fn set_value(&self, key: &Self::Key, name: &str, value: &str) -> io::Result<()>;

    /// Opens an existing key for subkey enumeration and value queries.
    fn open_for_enumeration(&self, path: &str) -> io::Result<Self::Key>;

    /// Names of the immediate subkeys of `key`.
    fn subkey_names(&self, key: &Self::Key) -> io::Result<Vec<String>>;

    /// Opens an existing key for writing.
    fn open_for_write(&self, path: &str) -> io::Result<Self::Key>;

    /// Removes a value from `key`.
    fn delete_value(&self, key: &Self::Key, name: &str) -> io::Result<()>;

    /// Deletes a key that has no subkeys.
    fn delete_key(&self, path: &str) -> io::Result<()>;

    /// Deletes `path` and everything below it, depth first.
    ///
    /// Never fails: a missing key is a no-op and every other failure is only
    /// logged, so a broader teardown always runs to the end.
    fn delete_key_recursively(&self, path: &str) {
        let key = match self.open_for_enumeration(path) {
            Ok(key) => key,
            Err(e) => {
                if e.kind() == ErrorKind::NotFound {
                    debug!(path, "registry entry not found (already removed)");
                } else {
                    debug!(path, error = %e, "unable to open registry entry");
                }
                match self.delete_key(path) {
                    Ok(()) => debug!(path, "registry entry removed"),
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => warn!(path, error = %e, "failed to remove registry entry"),
                }
                return;
            }
        };

        let children = self.subkey_names(&key).unwrap_or_else(|e| {
            debug!(path, error = %e, "unable to read registry subentries");
            Vec::new()
        });

        for child in children {
            self.delete_key_recursively(&format!("{}\\{}", path, child));
        }

        drop(key);
        match self.delete_key(path) {
            Ok(()) => debug!(path, "registry entry removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path, "registry entry already removed")
            }
            Err(e) => warn!(path, error = %e, "failed to remove registry entry"),
        }
    }

    /// Deletes value `name` under `path`, ignoring a missing key or value.
    fn delete_value_silently(&self, path: &str, name: &str) {
        let key = match self.open_for_write(path) {
            Ok(key) => key,
            Err(e) => {
                if e.kind() == ErrorKind::NotFound {
                    debug!(path, "registry entry not found");
                } else {
                    debug!(path, error = %e, "unable to access registry entry");
                }
                return;
            }
        };

        match self.delete_value(&key, name) {
            Ok(()) => debug!(path, value = name, "registry value removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path, value = name, error = %e, "failed to remove registry value"),
        }
    }
}
