#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Path to a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Write `contents` to `dir/name`, returning the path as a string the way
/// it arrives on the command line.
pub fn write(dir: &Path, name: &str, contents: &[u8]) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

/// Copy a fixture into `dir`.
pub fn copy_fixture(dir: &Path, name: &str) -> String {
    write(dir, name, &std::fs::read(fixture(name)).unwrap())
}
