mod search;

pub use search::{is_executable, PathError, SearchPath, DEFAULT_SEARCH_PATH, MAX_PATH_LENGTH};
