use std::fmt;

use crate::error::{PanywhereError, Result};

/// Absolute server-side path: the base directory followed by a relative
/// path supplied on the command line, kept as separate components so the
/// URL builder can escape each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    components: Vec<String>,
    relative_len: usize,
}

impl RemotePath {
    /// Join `relative` onto `base_dir`.
    ///
    /// Empty and `.` components are dropped. The relative part must name at
    /// least one component and may not contain `..`.
    pub fn new(base_dir: &str, relative: &str) -> Result<Self> {
        let mut components: Vec<String> = split_components(base_dir)
            .map(str::to_string)
            .collect();

        let mut relative_len = 0;
        for part in split_components(relative) {
            if part == ".." {
                return Err(PanywhereError::InvalidPath(format!(
                    "'{relative}' escapes the site directory"
                )));
            }
            components.push(part.to_string());
            relative_len += 1;
        }

        if relative_len == 0 {
            return Err(PanywhereError::InvalidPath(format!(
                "'{relative}' does not name a file"
            )));
        }

        Ok(Self {
            components,
            relative_len,
        })
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }

    /// Components contributed by the relative path, without the base directory.
    pub fn relative_components(&self) -> impl Iterator<Item = &str> {
        self.components[self.components.len() - self.relative_len..]
            .iter()
            .map(String::as_str)
    }

    /// Last component, used as the multipart file name on upload.
    pub fn file_name(&self) -> &str {
        // `new` guarantees at least one relative component.
        self.components.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            write!(f, "/{component}")?;
        }
        Ok(())
    }
}

fn split_components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|part| !part.is_empty() && *part != ".")
}
