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

//! This case ensures that the appender works as the global logger of the `log` crate, and that
//! archives are pruned while records keep flowing through the facade.

use std::fs;

use logforth_append_archive::append::archive_file::ArchiveFileBuilder;
use logforth_append_archive::bridge::setup_log_crate;

fn main() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    let file = ArchiveFileBuilder::new(dir.join("app.log"))
        .max_size(512)
        .max_archive_count(3)
        .build()
        .unwrap();
    setup_log_crate(file).unwrap();

    for i in 0..500 {
        log::info!("hello archive file {i}");
    }
    log::logger().flush();

    let mut names = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    names.sort();

    assert_eq!(names.len(), 4, "unexpected files: {names:?}");
    assert_eq!(names[0], "app.log");
    assert!(names[1..].iter().all(|name| name.starts_with("app__")));

    let active = fs::read_to_string(dir.join("app.log")).unwrap();
    assert!(active.lines().all(|line| line.contains("] [info] hello archive file ")));
    assert!(active.trim_end().ends_with("hello archive file 499"));

    // a second logger cannot be installed
    let other = ArchiveFileBuilder::new(dir.join("other.log")).build().unwrap();
    assert!(setup_log_crate(other).is_err());
}
