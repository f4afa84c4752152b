// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where the console host keeps `jsbridge.json`.
//
// Mobile hosts never come through here; the embedding app builds its own
// `BridgeConfig`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use jsbridge_core::error::Result;

/// Subdirectory of the user data directory owned by the console.
const APP_DIR: &str = "jsbridge";

/// Resolve the console config directory from the environment and make sure it
/// exists.
pub fn config_dir() -> Result<PathBuf> {
    let dir = resolve(std::env::var_os("XDG_DATA_HOME"), std::env::var_os("HOME"));
    ensure(&dir)?;
    Ok(dir)
}

/// `$XDG_DATA_HOME/jsbridge`, else `$HOME/.local/share/jsbridge`, else a
/// directory under the system temp dir. Empty variables count as unset.
fn resolve(xdg_data_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let base = match (
        xdg_data_home.filter(|v| !v.is_empty()),
        home.filter(|v| !v.is_empty()),
    ) {
        (Some(xdg), _) => PathBuf::from(xdg),
        (None, Some(home)) => PathBuf::from(home).join(".local").join("share"),
        (None, None) => std::env::temp_dir(),
    };
    base.join(APP_DIR)
}

fn ensure(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use jsbridge_core::BridgeError;

    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = resolve(Some("/data".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/data/jsbridge"));
    }

    #[test]
    fn home_fallback_uses_local_share() {
        let dir = resolve(None, Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/jsbridge"));
    }

    #[test]
    fn empty_xdg_counts_as_unset() {
        let dir = resolve(Some(OsString::new()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/jsbridge"));
    }

    #[test]
    fn no_env_lands_in_temp() {
        assert_eq!(resolve(None, None), std::env::temp_dir().join(APP_DIR));
    }

    #[test]
    fn ensure_creates_nested_dirs() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a").join(APP_DIR);
        ensure(&dir).expect("create");
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_reports_failure() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("occupied");
        std::fs::write(&file, "x").unwrap();

        let err = ensure(&file.join(APP_DIR)).unwrap_err();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
