use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::Path;

static PROFILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9_.-]*$").unwrap());
static LEGACY_CONTEXT_DIR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+-\d+$").unwrap());

/// Check that a profile name is safe to use as a directory name.
///
/// Letters, digits, `_`, `-` and `.`; must not start with a dot.
pub fn is_valid_profile_name(name: &str) -> bool {
    name.len() <= 64 && PROFILE_NAME_RE.is_match(name)
}

/// Whether a directory name looks like a per-project state dir (`<dev>-<inode>`)
/// left behind by the pre-profiles layout.
pub fn is_legacy_context_dir(name: &str) -> bool {
    LEGACY_CONTEXT_DIR_RE.is_match(name)
}

/// Write `data` to `path` atomically, readable only by the owner on Unix.
///
/// The parent directory must exist.
pub fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
