use std::path;

/// Check for the gzip magic bytes at the start of `header`
pub fn is_gzipped(header: &[u8]) -> bool {
    header.starts_with(b"\x1f\x8b")
}

/// Check whether `path` ends in `.gz`, returning the path with that
/// extension removed when it does
pub fn is_gzipped_extension(path: &path::Path) -> (bool, path::PathBuf) {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("gz") => (true, path.with_extension("")),
        _ => (false, path.to_path_buf()),
    }
}
