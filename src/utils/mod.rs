use std::{fs, io, path::Path};

use crate::error::{HuffmanError, Result};

pub mod timer;

/// Writes `contents` to a temporary sibling of `path` and renames it into place, so a failed
/// write never leaves a truncated file behind.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    fs::write(&tmp, contents)
        .and_then(|()| fs::rename(&tmp, path))
        .map_err(|e| discard(Path::new(&tmp), e))
}

/// Removes a leftover temporary file after `err`. The returned error mentions the file if it
/// could not be removed.
fn discard(tmp: &Path, err: io::Error) -> HuffmanError {
    match fs::remove_file(tmp) {
        Ok(()) => err.into(),
        Err(cleanup) if cleanup.kind() == io::ErrorKind::NotFound => err.into(),
        Err(cleanup) => HuffmanError::Io(io::Error::new(
            err.kind(),
            format!("{} (leaving {} behind: {})", err, tmp.display(), cleanup),
        )),
    }
}

#[test]
fn test_write_atomic_replaces_file() {
    let path = std::env::temp_dir().join(format!("text_huffman_atomic_{}", std::process::id()));

    write_atomic(&path, b"first").unwrap();
    write_atomic(&path, b"second").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"second");

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    assert!(!Path::new(&tmp).exists());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_write_atomic_cleans_up_when_rename_fails() {
    let dir = std::env::temp_dir().join(format!("text_huffman_atomic_dir_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("keep"), b"x").unwrap();

    // A file cannot replace a non-empty directory.
    assert!(write_atomic(&dir, b"data").is_err());

    let mut tmp = dir.as_os_str().to_owned();
    tmp.push(".tmp");
    assert!(!Path::new(&tmp).exists());
    assert!(dir.is_dir());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_write_atomic_into_missing_directory_fails_cleanly() {
    let path = std::env::temp_dir().join("text_huffman_missing_dir").join("out.huff");

    assert!(write_atomic(&path, b"data").is_err());
    assert!(!path.exists());
}
