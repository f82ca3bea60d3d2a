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
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::Context;
use flate2::Compression;
use flate2::write::GzEncoder;
use jiff::Zoned;

use crate::config::FileConfig;
use crate::config::LimitationMode;
use crate::trap::Trap;

const DATE_PLACEHOLDER: &str = "{date}";
const SESSION_DATE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// How session files are named, compressed and retained.
#[derive(Debug, Clone)]
pub(crate) struct SessionPolicy {
    directory: PathBuf,
    name_pattern: String,
    limitation: LimitationMode,
    limit: u32,
    compress: bool,
}

impl SessionPolicy {
    pub(crate) fn new(config: &FileConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            name_pattern: config.name_pattern.clone(),
            limitation: config.limitation,
            limit: config.limit,
            compress: config.compress,
        }
    }

    /// Compresses and evicts old files, then opens a fresh session file.
    ///
    /// Problems with individual old files are reported to `trap` and do not prevent the session
    /// from starting.
    pub(crate) fn start(&self, now: &Zoned, trap: &dyn Trap) -> anyhow::Result<(PathBuf, File)> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!("failed to create log directory {}", self.directory.display())
        })?;

        if self.compress {
            self.compress_logs(trap);
        }

        let path = self.session_path(now);

        if self.limitation == LimitationMode::Files {
            self.enforce_file_limit(trap);
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        trap.notice(&format!("created new log file: {}", file_name(&path)));
        Ok((path, file))
    }

    /// The path of a session started at `now`.
    ///
    /// With a `{date}` pattern, a name that is already taken by a `.log` or `.log.gz` file gets a
    /// `_1`, `_2`, ... suffix. Patterns without `{date}` always map to the same file.
    pub(crate) fn session_path(&self, now: &Zoned) -> PathBuf {
        let date = now.strftime(SESSION_DATE_FORMAT).to_string();
        let base = self.name_pattern.replace(DATE_PLACEHOLDER, &date);
        let candidate = self.directory.join(format!("{base}.log"));
        if !self.name_pattern.contains(DATE_PLACEHOLDER) {
            return candidate;
        }

        let taken = |name: &str| {
            self.directory.join(format!("{name}.log")).exists()
                || self.directory.join(format!("{name}.log.gz")).exists()
        };
        if !taken(&base) {
            return candidate;
        }
        let mut n = 1u32;
        loop {
            let name = format!("{base}_{n}");
            if !taken(&name) {
                return self.directory.join(format!("{name}.log"));
            }
            n += 1;
        }
    }

    fn compress_logs(&self, trap: &dyn Trap) {
        let files = match self.log_files() {
            Ok(files) => files,
            Err(err) => {
                trap.trap(&err);
                return;
            }
        };

        for (path, _) in files.iter().filter(|(path, _)| is_plain_log(path)) {
            let archive = match compress_file(path) {
                Ok(archive) => archive,
                Err(err) => {
                    trap.trap(&err);
                    continue;
                }
            };

            if self.limitation == LimitationMode::Size {
                let max = u64::from(self.limit) * 1024;
                match fs::metadata(&archive) {
                    Ok(metadata) if metadata.len() > max => match fs::remove_file(&archive) {
                        Ok(()) => trap.notice(&format!(
                            "deleted compressed log file {} because it exceeds the size limit",
                            file_name(&archive)
                        )),
                        Err(err) => trap.trap(&anyhow::Error::from(err).context(format!(
                            "failed to delete compressed log file {}",
                            archive.display()
                        ))),
                    },
                    Ok(_) => {}
                    Err(err) => trap.trap(&anyhow::Error::from(err)),
                }
            }
        }
    }

    /// Deletes the oldest files while at least `limit` remain, making room for the new session.
    fn enforce_file_limit(&self, trap: &dyn Trap) {
        let mut files = match self.log_files() {
            Ok(files) => files,
            Err(err) => {
                trap.trap(&err);
                return;
            }
        };
        files.sort_by(|(a_path, a_time), (b_path, b_time)| {
            a_time.cmp(b_time).then_with(|| a_path.cmp(b_path))
        });

        let limit = self.limit as usize;
        let mut files = files.into_iter();
        let mut remaining = files.len();
        while remaining >= limit {
            let Some((path, _)) = files.next() else {
                break;
            };
            remaining -= 1;
            match fs::remove_file(&path) {
                Ok(()) => trap.notice(&format!("deleted log file: {}", file_name(&path))),
                Err(err) => trap.trap(
                    &anyhow::Error::from(err)
                        .context(format!("failed to delete log file {}", path.display())),
                ),
            }
        }
    }

    /// Lists `*.log` and `*.log.gz` files with their modification time.
    fn log_files(&self) -> anyhow::Result<Vec<(PathBuf, SystemTime)>> {
        let read_dir = fs::read_dir(&self.directory).with_context(|| {
            format!("failed to read log dir: {}", self.directory.display())
        })?;

        let files = read_dir
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let metadata = entry.metadata().ok()?;
                if !metadata.is_file() {
                    return None;
                }
                let path = entry.path();
                let name = path.file_name()?.to_str()?;
                if !name.ends_with(".log") && !name.ends_with(".log.gz") {
                    return None;
                }
                let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                Some((path, modified))
            })
            .collect();
        Ok(files)
    }
}

fn is_plain_log(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Streams `path` into `path.gz` and removes the original.
///
/// The archive keeps the modification time of the original so that retention still orders
/// sessions by when they were written.
fn compress_file(path: &Path) -> anyhow::Result<PathBuf> {
    let mut archive = path.as_os_str().to_owned();
    archive.push(".gz");
    let archive = PathBuf::from(archive);

    let mut input =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let modified = input
        .metadata()
        .and_then(|metadata| metadata.modified())
        .with_context(|| format!("failed to read modification time of {}", path.display()))?;
    let output = File::create(&archive)
        .with_context(|| format!("failed to create {}", archive.display()))?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)
        .and_then(|_| encoder.finish())
        .and_then(|output| output.set_modified(modified))
        .with_context(|| format!("failed to compress log file {}", path.display()))?;

    fs::remove_file(path).with_context(|| {
        format!(
            "failed to delete original file {} after compressing",
            path.display()
        )
    })?;
    Ok(archive)
}
