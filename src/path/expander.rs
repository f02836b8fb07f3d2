use crate::error::ShellError;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.len() == 1 {
            return self.get_home_dir();
        }
        match path[1..].strip_prefix('/') {
            Some(rest) => {
                let mut home = self.get_home_dir()?;
                home.push(rest);
                Ok(home)
            }
            // "~user/..." is not supported; pass it through untouched
            None => Ok(Path::new(path).to_path_buf()),
        }
    }

    pub fn get_home_dir(&self) -> Result<PathBuf, ShellError> {
        dirs::home_dir().ok_or(ShellError::HomeDirNotFound)
    }
}
