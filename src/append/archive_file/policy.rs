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

/// The default size threshold of the active file, 1 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 1024 * 1024;

/// The default number of archives to keep.
pub const DEFAULT_MAX_ARCHIVE_COUNT: usize = 5;

/// What to do when the archive name for this second is already taken.
///
/// Two rotations within the same UTC second produce the same archive name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CollisionStrategy {
    /// Append `-n` before `.log`, one past the highest sequence archived in the same second.
    #[default]
    Disambiguate,
    /// Report the collision and keep writing to the unrotated active file.
    ///
    /// The rotation is attempted again on the next write.
    Abandon,
}

/// When to archive the active file, and how many archives to keep.
///
/// # Examples
///
/// ```
/// use logforth_append_archive::append::archive_file::RotationPolicy;
///
/// let policy = RotationPolicy {
///     max_size_bytes: 64 * 1024,
///     max_archive_count: 3,
///     ..RotationPolicy::default()
/// };
/// assert!(policy.rotation_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RotationPolicy {
    /// Archive the active file once it holds at least this many bytes. `0` disables rotation.
    pub max_size_bytes: u64,
    /// Number of archives to keep; older ones are deleted after each rotation.
    pub max_archive_count: usize,
    /// Behavior on a same-second archive name collision.
    pub on_collision: CollisionStrategy,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_archive_count: DEFAULT_MAX_ARCHIVE_COUNT,
            on_collision: CollisionStrategy::default(),
        }
    }
}

impl RotationPolicy {
    /// Whether size-triggered rotation is on at all.
    pub fn rotation_enabled(&self) -> bool {
        self.max_size_bytes > 0
    }

    /// Whether a file of `size` bytes must be archived before the next write.
    pub fn should_rotate(&self, size: u64) -> bool {
        self.rotation_enabled() && size >= self.max_size_bytes
    }
}
