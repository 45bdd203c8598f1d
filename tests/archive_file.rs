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

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use logforth_append_archive::Error;
use logforth_append_archive::ErrorKind;
use logforth_append_archive::Trap;
use logforth_append_archive::append::archive_file::ArchiveFileBuilder;
use logforth_append_archive::append::archive_file::CollisionStrategy;
use logforth_append_archive::append::archive_file::list_archives;
use tempfile::TempDir;

#[derive(Debug, Default)]
struct CollectTrap {
    kinds: Mutex<Vec<ErrorKind>>,
}

impl Trap for CollectTrap {
    fn trap(&self, err: &Error) {
        self.kinds.lock().unwrap().push(err.kind());
    }
}

fn archive_names(dir: &Path) -> Vec<String> {
    let mut names = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| {
            let filename = entry.ok()?.file_name().into_string().ok()?;
            filename.starts_with("app__").then_some(filename)
        })
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn test_archive_count_limit() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let max_archives = 5;
    let trap = Arc::new(CollectTrap::default());

    let file = ArchiveFileBuilder::new(temp_dir.path().join("app.log"))
        .max_size(100)
        .max_archive_count(max_archives)
        .trap(trap.clone())
        .build()
        .unwrap();

    for i in 0..200 {
        file.write(format!("Log entry {}: {}\n", i, "A".repeat(50)));
    }

    let archives = archive_names(temp_dir.path());
    assert_eq!(
        archives.len(),
        max_archives,
        "expected exactly {max_archives} archives, found {archives:?}"
    );
    assert!(trap.kinds.lock().unwrap().is_empty());

    let records = list_archives(&temp_dir.path().join("app.log")).unwrap();
    assert_eq!(records.len(), max_archives);
    assert!(records.iter().all(|r| r.timestamp.is_some()));
}

#[test]
fn test_no_line_is_lost_across_rotations() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let dir = temp_dir.path();

    let file = ArchiveFileBuilder::new(dir.join("app.log"))
        .max_size(256)
        .max_archive_count(usize::MAX)
        .build()
        .unwrap();

    let total = 100;
    for i in 0..total {
        file.write(format!("line {i:03}\n"));
    }
    drop(file);

    let mut lines = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let content = fs::read_to_string(entry.unwrap().path()).unwrap();
        lines.extend(content.lines().map(str::to_string));
    }
    lines.sort();

    let expected = (0..total).map(|i| format!("line {i:03}")).collect::<Vec<_>>();
    assert_eq!(lines, expected);
}

#[test]
fn test_abandoned_collision_keeps_the_active_file_writable() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let dir = temp_dir.path();
    let trap = Arc::new(CollectTrap::default());

    let file = ArchiveFileBuilder::new(dir.join("app.log"))
        .max_size(1)
        .max_archive_count(10)
        .on_collision(CollisionStrategy::Abandon)
        .trap(trap.clone())
        .build()
        .unwrap();

    // every write after the first one rotates; rotations within one second collide
    for i in 0..20 {
        file.write(format!("line {i}\n"));
    }
    drop(file);

    let kinds = trap.kinds.lock().unwrap().clone();
    assert!(kinds.iter().all(|kind| *kind == ErrorKind::Rotation));

    let mut lines = 0;
    for entry in fs::read_dir(dir).unwrap() {
        lines += fs::read_to_string(entry.unwrap().path()).unwrap().lines().count();
    }
    assert_eq!(lines, 20);
}

#[test]
fn test_rotation_disabled_with_zero_size() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");

    let file = ArchiveFileBuilder::new(temp_dir.path().join("app.log"))
        .max_size(0)
        .build()
        .unwrap();

    for i in 0..1000 {
        file.write(format!("Log entry {}: {}\n", i, "B".repeat(50)));
    }

    assert!(archive_names(temp_dir.path()).is_empty());
}

#[test]
fn test_foreign_files_are_never_pruned() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let dir = temp_dir.path();
    let foreign = [
        "app__bad_data.log",
        "other__20170802_093306.log",
        "app__20170802_093306.log.bak",
        "notes.txt",
    ];
    for name in foreign {
        fs::write(dir.join(name), b"keep me").unwrap();
    }

    let file = ArchiveFileBuilder::new(dir.join("app.log"))
        .max_size(10)
        .max_archive_count(0)
        .build()
        .unwrap();
    for i in 0..50 {
        file.write(format!("entry {i}\n"));
    }
    drop(file);

    for name in foreign {
        assert_eq!(fs::read(dir.join(name)).unwrap(), b"keep me", "{name}");
    }
    assert!(
        archive_names(dir)
            .iter()
            .all(|name| name == "app__bad_data.log" || name == "app__20170802_093306.log.bak")
    );
}
