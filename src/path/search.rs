use std::ffi::CString;
use std::fmt;

pub const DEFAULT_SEARCH_PATH: &str = "/bin/:/usr/bin/";
/// Buffer size of the stored path, terminator included.
pub const MAX_PATH_LENGTH: usize = 512;

const LIST_SEPARATOR: char = ':';
const ROOT: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("PATH string too long")]
    TooLong { len: usize },
}

/// Ordered directory prefixes tried when resolving a bare program name.
///
/// Prefixes are joined to names by plain concatenation, so `/bin/` resolves
/// `ls` to `/bin/ls` while `/bin` would try `/binls`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    raw: String,
}

impl Default for SearchPath {
    fn default() -> Self {
        Self {
            raw: DEFAULT_SEARCH_PATH.to_string(),
        }
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl SearchPath {
    pub fn new(raw: &str) -> Result<Self, PathError> {
        check_length(raw)?;
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.raw.split(LIST_SEPARATOR).filter(|p| !p.is_empty())
    }

    /// Replace the whole path. An empty value leaves it untouched.
    ///
    /// On error the previous value is kept.
    pub fn update(&mut self, raw: &str) -> Result<(), PathError> {
        check_length(raw)?;
        if !raw.is_empty() {
            self.raw = raw.to_string();
            tracing::debug!(path = %self.raw, "search path updated");
        }
        Ok(())
    }

    /// Resolve `program` to the path that should be executed.
    ///
    /// Absolute names pass through. Otherwise the first prefix giving an
    /// executable file wins, and with no match the name comes back as-is.
    pub fn resolve(&self, program: &str) -> String {
        self.resolve_with(program, is_executable)
    }

    fn resolve_with(&self, program: &str, executable: impl Fn(&str) -> bool) -> String {
        if program.starts_with(ROOT) {
            return program.to_string();
        }

        for prefix in self.prefixes() {
            let candidate = format!("{prefix}{program}");
            if executable(&candidate) {
                tracing::trace!(%program, %candidate, "resolved");
                return candidate;
            }
        }

        tracing::trace!(%program, path = %self.raw, "no executable match");
        program.to_string()
    }
}

fn check_length(raw: &str) -> Result<(), PathError> {
    if raw.len() >= MAX_PATH_LENGTH {
        return Err(PathError::TooLong { len: raw.len() });
    }
    Ok(())
}

/// `access(2)` with `X_OK` for the calling user.
pub fn is_executable(path: &str) -> bool {
    let Ok(c_path) = CString::new(path) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string for the whole call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}
