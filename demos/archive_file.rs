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

//! An example of logging to a size-limited file with timestamped archives.

use logforth_append_archive::append::archive_file::ArchiveFileBuilder;
use logforth_append_archive::bridge::setup_log_crate;

fn main() {
    let file = ArchiveFileBuilder::new("logs/my_app.log")
        .max_size(4 * 1024)
        .max_archive_count(3)
        .build()
        .unwrap();
    setup_log_crate(file).unwrap();

    for i in 0..1000 {
        log::error!("Hello error! {i}");
        log::warn!("Hello warn! {i}");
        log::info!("Hello info! {i}");
    }
}
