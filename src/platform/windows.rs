//! Windows: tools are bundled next to the worker executable.

/// Whether tools are looked up on `PATH` rather than shipped with the worker.
pub const TOOLS_ON_SEARCH_PATH: bool = false;

/// File name of an executable with the given stem.
pub fn executable_name(stem: &str) -> String {
    format!("{}.exe", stem)
}
