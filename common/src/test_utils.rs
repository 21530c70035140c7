use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const TEST_OUTPUT_DIR: &str = "test_output";

/// `test_output/` under the workspace root, created on first use.
///
/// Member crates sit one level below the root, so the parent of this crate's
/// manifest directory is the root.
pub fn test_output_dir() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let root = manifest_dir.parent().unwrap_or(manifest_dir);
        let dir = root.join(TEST_OUTPUT_DIR);
        std::fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", dir.display(), e));
        dir
    })
}

/// Path of a file inside the test output directory.
pub fn test_output_path(name: &str) -> PathBuf {
    test_output_dir().join(name)
}

/// Writes raw `bytes` to a test output file and returns its path.
pub fn write_test_file(name: &str, bytes: &[u8]) -> PathBuf {
    let path = test_output_path(name);
    std::fs::write(&path, bytes)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    path
}
