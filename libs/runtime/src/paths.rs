//! Filesystem path helpers shared by configuration loading.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the application home directory.
///
/// - `requested`: value from configuration; `None` means "use the platform
///   default" (`$HOME/<default_subdir>` on Unix, `%APPDATA%\<default_subdir>`
///   on Windows).
/// - A leading `~` is expanded against the user's home directory.
/// - The resulting path is absolutized against the current directory and
///   created when `create` is set.
pub fn resolve_home_dir(
    requested: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let raw = match requested {
        Some(p) if !p.trim().is_empty() => expand_tilde(p.trim())?,
        _ => platform_home()?.join(default_subdir),
    };

    let absolute = if raw.is_absolute() {
        raw
    } else {
        std::env::current_dir()
            .context("cannot determine current directory")?
            .join(raw)
    };

    if create {
        std::fs::create_dir_all(&absolute)
            .with_context(|| format!("failed to create home dir {}", absolute.display()))?;
    }

    Ok(absolute)
}

fn platform_home() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var)
        .map(PathBuf::from)
        .with_context(|| format!("environment variable {var} is not set"))
}

fn expand_tilde(path: &str) -> Result<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        return Ok(platform_home()?.join(rest));
    }
    if path == "~" {
        return platform_home();
    }
    Ok(Path::new(path).to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn set_home(dir: &Path) {
        #[cfg(target_os = "windows")]
        std::env::set_var("APPDATA", dir);
        #[cfg(not(target_os = "windows"))]
        std::env::set_var("HOME", dir);
    }

    #[test]
    fn resolves_platform_default_when_unset() {
        let tmp = tempdir().unwrap();
        set_home(tmp.path());

        let resolved = resolve_home_dir(None, ".contacts", true).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with(".contacts"));
        assert!(resolved.exists());
    }

    #[test]
    fn expands_tilde_prefix() {
        let tmp = tempdir().unwrap();
        set_home(tmp.path());

        let resolved = resolve_home_dir(Some("~/custom".into()), ".contacts", false).unwrap();
        assert!(resolved.starts_with(tmp.path()));
        assert!(resolved.ends_with("custom"));
    }

    #[test]
    fn keeps_absolute_paths() {
        let tmp = tempdir().unwrap();
        let wanted = tmp.path().join("explicit");

        let resolved =
            resolve_home_dir(Some(wanted.to_string_lossy().into()), ".contacts", true).unwrap();
        assert_eq!(resolved, wanted);
        assert!(wanted.exists());
    }
}
