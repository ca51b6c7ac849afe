//! POSIX: tools come from the process search path.

/// Whether tools are looked up on `PATH` rather than shipped with the worker.
pub const TOOLS_ON_SEARCH_PATH: bool = true;

/// File name of an executable with the given stem.
pub fn executable_name(stem: &str) -> String {
    stem.to_string()
}
