//! Atomic file write operations.
//!
//! Output is streamed into a hidden temporary file next to the target,
//! synced, and then renamed over the target. A failed run never leaves a
//! truncated file behind.

use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, File, OpenOptions};

use crate::error::OutputError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Streams contents into `path` atomically using a temp file and rename.
///
/// `write` receives a buffered writer over the temporary file. The file is
/// flushed, synced and closed before the rename. On any failure the
/// temporary file is removed and an existing target is left as it was.
///
/// # Errors
///
/// Returns [`OutputError`] if the path has no file name, the parent
/// directory cannot be opened, or writing, syncing or renaming fails.
pub(crate) fn write_atomic<F>(path: &Utf8Path, write: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let Some(file_name) = path.file_name() else {
        return Err(OutputError::InvalidPath {
            path: path.to_path_buf(),
        });
    };
    let dir = open_parent_dir(path)?;

    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        suffix,
        counter
    );

    write_to_temp_file(&dir, &tmp_name, path, write)?;
    rename_temp_to_target(&dir, &tmp_name, file_name, path)?;
    sync_parent_directory(&dir);

    Ok(())
}

fn open_parent_dir(path: &Utf8Path) -> Result<Dir, OutputError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
        OutputError::OpenDirectory {
            path: parent.to_path_buf(),
            message: err.to_string(),
        }
    })
}

fn write_to_temp_file<F>(
    dir: &Dir,
    tmp_name: &str,
    target_path: &Utf8Path,
    write: F,
) -> Result<(), OutputError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let tmp_path = target_path.with_file_name(tmp_name);
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| OutputError::Write {
            path: tmp_path.clone(),
            message: err.to_string(),
        })?;

    if let Err(err) = fill_and_sync(file, write) {
        // Best-effort cleanup; the original error is what matters.
        if dir.remove_file(tmp_name).is_err() {
            // Ignore cleanup failures.
        }
        return Err(OutputError::Write {
            path: tmp_path,
            message: err.to_string(),
        });
    }

    Ok(())
}

/// Runs `write`, then flushes and syncs. The file is closed on return.
fn fill_and_sync<F>(file: File, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    let synced = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    synced.sync_all()
}

fn rename_temp_to_target(
    dir: &Dir,
    tmp_name: &str,
    target_name: &str,
    target_path: &Utf8Path,
) -> Result<(), OutputError> {
    if let Err(err) = rename_temp_to_target_impl(dir, tmp_name, target_name) {
        // Best-effort cleanup of temp file on rename failure.
        if dir.remove_file(tmp_name).is_err() {
            // Ignore cleanup failures.
        }
        return Err(OutputError::Write {
            path: target_path.to_path_buf(),
            message: err.to_string(),
        });
    }
    Ok(())
}

#[cfg(windows)]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_parent_directory(parent: &Dir) {
    // Best-effort directory sync; ignore failures.
    if parent.open(".").and_then(|dir| dir.sync_all()).is_err() {
        // Ignore sync failures.
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;

    fn scratch_dir(name: &str) -> Utf8PathBuf {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = Utf8PathBuf::from("target")
            .join("ldif-forge-tests")
            .join(format!("atomic-{name}-{}-{counter}", std::process::id()));
        let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open cwd");
        root.create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn read(path: &Utf8Path) -> String {
        let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open cwd");
        root.read_to_string(path).expect("read file")
    }

    fn leftover_temp_files(dir: &Utf8Path) -> usize {
        let root = Dir::open_ambient_dir(dir, ambient_authority()).expect("open dir");
        root.entries()
            .expect("list dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
            .count()
    }

    #[test]
    fn writes_new_file() {
        let dir = scratch_dir("new");
        let path = dir.join("out.ldif");

        write_atomic(&path, |writer| writer.write_all(b"dn: dc=test\n\n")).expect("write");

        assert_eq!(read(&path), "dn: dc=test\n\n");
        assert_eq!(leftover_temp_files(&dir), 0);
    }

    #[test]
    fn replaces_existing_file() {
        let dir = scratch_dir("replace");
        let path = dir.join("out.ldif");
        write_atomic(&path, |writer| writer.write_all(b"old contents that are longer"))
            .expect("first write");

        write_atomic(&path, |writer| writer.write_all(b"new")).expect("second write");

        assert_eq!(read(&path), "new");
    }

    #[test]
    fn failed_write_keeps_existing_file() {
        let dir = scratch_dir("failure");
        let path = dir.join("out.ldif");
        write_atomic(&path, |writer| writer.write_all(b"keep me")).expect("first write");

        let result = write_atomic(&path, |writer| {
            writer.write_all(b"partial")?;
            Err(io::Error::other("generator failed"))
        });

        let Err(OutputError::Write { message, .. }) = result else {
            panic!("expected write error");
        };
        assert_eq!(message, "generator failed");
        assert_eq!(read(&path), "keep me");
        assert_eq!(leftover_temp_files(&dir), 0);
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = scratch_dir("missing");
        let path = dir.join("absent").join("out.ldif");

        let result = write_atomic(&path, |writer| writer.write_all(b"x"));

        assert!(matches!(result, Err(OutputError::OpenDirectory { .. })));
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let result = write_atomic(Utf8Path::new("/"), |writer| writer.write_all(b"x"));

        assert!(matches!(result, Err(OutputError::InvalidPath { .. })));
    }
}
