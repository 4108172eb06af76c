// Windows Registry backend
// Every key is opened below HKEY_CURRENT_USER; nothing here touches HKLM.

#![cfg(windows)]

use super::store::KeyStore;
use std::io;
use winreg::enums::*;
use winreg::RegKey;

/// [`KeyStore`] over the real registry, rooted at one predefined hive.
pub struct WinRegistry {
    root: RegKey,
}

impl WinRegistry {
    /// Store rooted at `HKEY_CURRENT_USER`.
    pub fn current_user() -> Self {
        Self {
            root: RegKey::predef(HKEY_CURRENT_USER),
        }
    }
}

impl KeyStore for WinRegistry {
    type Key = RegKey;

    fn ensure_key(&self, path: &str) -> io::Result<(RegKey, bool)> {
        let (key, disposition) = self.root.create_subkey_with_flags(path, KEY_WRITE)?;
        Ok((key, matches!(disposition, REG_OPENED_EXISTING_KEY)))
    }

    fn set_value(&self, key: &RegKey, name: &str, value: &str) -> io::Result<()> {
        key.set_value(name, &value)
    }

    fn open_for_enumeration(&self, path: &str) -> io::Result<RegKey> {
        self.root
            .open_subkey_with_flags(path, KEY_ENUMERATE_SUB_KEYS | KEY_QUERY_VALUE)
    }

    fn subkey_names(&self, key: &RegKey) -> io::Result<Vec<String>> {
        key.enum_keys().collect()
    }

    fn open_for_write(&self, path: &str) -> io::Result<RegKey> {
        self.root.open_subkey_with_flags(path, KEY_WRITE)
    }

    fn delete_value(&self, key: &RegKey, name: &str) -> io::Result<()> {
        key.delete_value(name)
    }

    fn delete_key(&self, path: &str) -> io::Result<()> {
        self.root.delete_subkey(path)
    }
}
