// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::path::PathBuf;

/// Resolves the default active log file of an application.
pub trait PathResolver: fmt::Debug + Send + Sync + 'static {
    /// Returns the path of the active log file for `app_name`, or `None` if there is no usable
    /// location.
    fn resolve(&self, app_name: &str) -> Option<PathBuf>;
}

impl<T: PathResolver> From<T> for Box<dyn PathResolver> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Resolves `log.log` under a per-user, per-application directory.
///
/// | Platform | Path                                          |
/// |----------|-----------------------------------------------|
/// | Linux    | `$XDG_CONFIG_HOME/<app>/log.log` or `~/.config/<app>/log.log` |
/// | macOS    | `~/Library/Logs/<app>/log.log`                |
/// | Windows  | `%APPDATA%\<app>\log.log`                     |
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultPathResolver {}

impl PathResolver for DefaultPathResolver {
    fn resolve(&self, app_name: &str) -> Option<PathBuf> {
        if app_name.is_empty() {
            return None;
        }

        let dir = if cfg!(target_os = "macos") {
            dirs::home_dir()?.join("Library").join("Logs")
        } else {
            dirs::config_dir()?
        };
        Some(dir.join(app_name).join("log.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_app_name_is_unresolved() {
        assert_eq!(DefaultPathResolver::default().resolve(""), None);
    }

    #[test]
    fn test_default_path_ends_with_app_log() {
        if let Some(path) = DefaultPathResolver::default().resolve("my-app") {
            assert!(path.ends_with("my-app/log.log"));
            assert!(path.is_absolute());
        }
    }
}
