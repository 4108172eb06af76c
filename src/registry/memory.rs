//! In-memory registry backend.
//!
//! Mirrors the parts of registry behaviour the installer relies on: key and
//! value names are case-insensitive, creating a key creates its parents, a
//! key with subkeys cannot be deleted directly, and missing keys or values
//! report [`ErrorKind::NotFound`]. Write denial can be injected per subtree.

use super::store::KeyStore;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::{self, Error, ErrorKind};

#[derive(Debug, Default)]
struct Node {
    /// Path as first written, original case.
    path: String,
    /// Lowercased value name -> (original name, data).
    values: BTreeMap<String, (String, String)>,
}

/// Handle to a key in a [`MemoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryKey {
    path: String,
}

impl MemoryKey {
    /// Path this handle was opened with.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Registry tree held in memory.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    keys: RefCell<BTreeMap<String, Node>>,
    denied: RefCell<Vec<String>>,
    operations: Cell<usize>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write at or below `prefix` fail with `PermissionDenied`.
    pub fn deny_writes(&self, prefix: &str) {
        if let Ok(prefix) = normalize(prefix) {
            self.denied.borrow_mut().push(prefix.to_lowercase());
        }
    }

    /// Number of [`KeyStore`] calls made so far, provided methods included.
    pub fn operation_count(&self) -> usize {
        self.operations.get()
    }

    /// Number of keys currently present.
    pub fn key_count(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn key_exists(&self, path: &str) -> bool {
        normalize(path)
            .map(|p| self.keys.borrow().contains_key(&p.to_lowercase()))
            .unwrap_or(false)
    }

    /// Data of value `name` under `path`; `""` names the default value.
    pub fn value(&self, path: &str, name: &str) -> Option<String> {
        let path = normalize(path).ok()?.to_lowercase();
        let keys = self.keys.borrow();
        keys.get(&path)?
            .values
            .get(&name.to_lowercase())
            .map(|(_, data)| data.clone())
    }

    /// Original-case names of every value under `path`.
    pub fn value_names(&self, path: &str) -> Vec<String> {
        let Ok(path) = normalize(path) else {
            return Vec::new();
        };
        self.keys
            .borrow()
            .get(&path.to_lowercase())
            .map(|node| node.values.values().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    fn touch(&self) {
        self.operations.set(self.operations.get() + 1);
    }

    fn check_writable(&self, lower: &str) -> io::Result<()> {
        let denied = self.denied.borrow();
        let blocked = denied
            .iter()
            .any(|prefix| lower == prefix.as_str() || lower.starts_with(&format!("{}\\", prefix)));
        if blocked {
            return Err(Error::new(ErrorKind::PermissionDenied, "access is denied"));
        }
        Ok(())
    }

    fn open(&self, path: &str) -> io::Result<MemoryKey> {
        let path = normalize(path)?;
        if self.keys.borrow().contains_key(&path.to_lowercase()) {
            Ok(MemoryKey { path })
        } else {
            Err(not_found())
        }
    }
}

impl KeyStore for MemoryRegistry {
    type Key = MemoryKey;

    fn ensure_key(&self, path: &str) -> io::Result<(MemoryKey, bool)> {
        self.touch();
        let path = normalize(path)?;
        let lower = path.to_lowercase();
        self.check_writable(&lower)?;

        let mut keys = self.keys.borrow_mut();
        let existed = keys.contains_key(&lower);
        let mut prefix = String::new();
        for component in path.split('\\') {
            if !prefix.is_empty() {
                prefix.push('\\');
            }
            prefix.push_str(component);
            keys.entry(prefix.to_lowercase()).or_insert_with(|| Node {
                path: prefix.clone(),
                values: BTreeMap::new(),
            });
        }
        Ok((MemoryKey { path }, existed))
    }

    fn set_value(&self, key: &MemoryKey, name: &str, value: &str) -> io::Result<()> {
        self.touch();
        let lower = key.path.to_lowercase();
        self.check_writable(&lower)?;
        let mut keys = self.keys.borrow_mut();
        let node = keys.get_mut(&lower).ok_or_else(not_found)?;
        node.values
            .insert(name.to_lowercase(), (name.to_string(), value.to_string()));
        Ok(())
    }

    fn open_for_enumeration(&self, path: &str) -> io::Result<MemoryKey> {
        self.touch();
        self.open(path)
    }

    fn subkey_names(&self, key: &MemoryKey) -> io::Result<Vec<String>> {
        self.touch();
        let keys = self.keys.borrow();
        let parent = key.path.to_lowercase();
        if !keys.contains_key(&parent) {
            return Err(not_found());
        }
        let prefix = format!("{}\\", parent);
        let names = keys
            .iter()
            .filter(|(lower, _)| {
                lower
                    .strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.contains('\\'))
            })
            .filter_map(|(_, node)| node.path.rsplit('\\').next().map(str::to_string))
            .collect();
        Ok(names)
    }

    fn open_for_write(&self, path: &str) -> io::Result<MemoryKey> {
        self.touch();
        let key = self.open(path)?;
        self.check_writable(&key.path.to_lowercase())?;
        Ok(key)
    }

    fn delete_value(&self, key: &MemoryKey, name: &str) -> io::Result<()> {
        self.touch();
        let lower = key.path.to_lowercase();
        self.check_writable(&lower)?;
        let mut keys = self.keys.borrow_mut();
        let node = keys.get_mut(&lower).ok_or_else(not_found)?;
        node.values
            .remove(&name.to_lowercase())
            .map(|_| ())
            .ok_or_else(not_found)
    }

    fn delete_key(&self, path: &str) -> io::Result<()> {
        self.touch();
        let lower = normalize(path)?.to_lowercase();
        let mut keys = self.keys.borrow_mut();
        if !keys.contains_key(&lower) {
            return Err(not_found());
        }
        self.check_writable(&lower)?;
        let prefix = format!("{}\\", lower);
        if keys.keys().any(|k| k.starts_with(&prefix)) {
            return Err(Error::new(ErrorKind::PermissionDenied, "key has subkeys"));
        }
        keys.remove(&lower);
        Ok(())
    }
}

fn not_found() -> Error {
    Error::new(ErrorKind::NotFound, "the system cannot find the file specified")
}

/// Trims surrounding separators and rejects empty components.
fn normalize(path: &str) -> io::Result<String> {
    let trimmed = path.trim_matches('\\');
    if trimmed.is_empty() || trimmed.split('\\').any(str::is_empty) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("invalid registry path: {:?}", path),
        ));
    }
    Ok(trimmed.to_string())
}
