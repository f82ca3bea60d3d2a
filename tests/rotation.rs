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
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use arealog::Manager;
use arealog::Value;
use arealog::append::Testing;
use arealog::config::FileConfig;
use arealog::config::LimitationMode;
use flate2::read::GzDecoder;
use rand::Rng;
use rand::distr::Alphanumeric;
use tempfile::TempDir;

fn file_config(dir: &Path, limitation: LimitationMode, limit: u32, compress: bool) -> FileConfig {
    FileConfig {
        enabled: true,
        limitation,
        limit,
        compress,
        directory: dir.to_path_buf(),
        name_pattern: "session_{date}".to_string(),
        shutdown_timeout: Duration::from_secs(3),
    }
}

fn manager(config: FileConfig) -> Arc<Manager> {
    Manager::builder()
        .console(Testing::default())
        .layout("{levelColor}[{level}] {areaColor}{area}{reset}: {message}")
        .file(config)
        .build()
        .unwrap()
}

fn entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    entries.sort();
    entries
}

fn plain_logs(dir: &Path) -> Vec<PathBuf> {
    entries(dir)
        .into_iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "log"))
        .collect()
}

#[test]
fn session_file_holds_uncolored_lines_in_order() {
    let dir = TempDir::new().unwrap();
    let manager = manager(file_config(dir.path(), LimitationMode::Files, 5, true));
    assert!(manager.is_file_logging_enabled());

    let logger = manager.logger("app").with_default_area("net");
    for i in 0..50 {
        logger.info("request {}", &[Value::from(i)]);
    }
    logger.warn("two\nlines", &[]);
    manager.shutdown();
    assert!(!manager.is_file_logging_enabled());

    let logs = plain_logs(dir.path());
    assert_eq!(logs.len(), 1, "{logs:?}");
    let content = fs::read_to_string(&logs[0]).unwrap();
    assert!(!content.contains('\x1b'));

    let mut expected = (0..50)
        .map(|i| format!("[INFO] net: request {i}\n"))
        .collect::<String>();
    expected.push_str("[WARN] net: two\n[WARN] net: lines\n");
    assert_eq!(content, expected);
}

#[test]
fn concurrent_producers_keep_their_order_and_lose_nothing() {
    const THREADS: usize = 8;
    const LINES: usize = 500;

    let dir = TempDir::new().unwrap();
    let manager = manager(file_config(dir.path(), LimitationMode::Files, 5, false));

    std::thread::scope(|scope| {
        for id in 0..THREADS {
            let logger = manager.logger("app").with_default_area(format!("t{id}"));
            scope.spawn(move || {
                for seq in 0..LINES {
                    logger.info("{} {}", &[Value::from(id), Value::from(seq)]);
                }
            });
        }
    });
    manager.shutdown();

    let logs = plain_logs(dir.path());
    assert_eq!(logs.len(), 1, "{logs:?}");
    let content = fs::read_to_string(&logs[0]).unwrap();
    assert_eq!(content.lines().count(), THREADS * LINES);

    let mut next = [0usize; THREADS];
    for line in content.lines() {
        let message = line.rsplit(": ").next().unwrap();
        let (id, seq) = message.split_once(' ').unwrap();
        let id = id.parse::<usize>().unwrap();
        let seq = seq.parse::<usize>().unwrap();
        assert!(line.starts_with(&format!("[INFO] t{id}: ")), "{line}");
        assert_eq!(seq, next[id], "thread {id} out of order");
        next[id] += 1;
    }
    assert_eq!(next, [LINES; THREADS]);
}

#[test]
fn shutdown_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let manager = manager(file_config(dir.path(), LimitationMode::Files, 5, false));
    manager.default_logger().info("once", &[]);
    manager.shutdown();
    manager.shutdown();
    manager.enable_file_logging(false).unwrap();

    // lines logged after shutdown only reach the console
    manager.default_logger().info("console only", &[]);
    manager.shutdown();

    let logs = plain_logs(dir.path());
    assert_eq!(logs.len(), 1);
    let content = fs::read_to_string(&logs[0]).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.ends_with("once\n"));
}

#[test]
fn retention_keeps_the_newest_sessions() {
    let dir = TempDir::new().unwrap();
    let manager = manager(file_config(dir.path(), LimitationMode::Files, 3, true));
    manager.default_logger().info("session 0", &[]);

    for i in 1..6 {
        manager.enable_file_logging(false).unwrap();
        manager.enable_file_logging(true).unwrap();
        manager
            .default_logger()
            .info("session {}", &[Value::from(i)]);
    }
    manager.shutdown();

    let files = entries(dir.path());
    assert_eq!(files.len(), 3, "{files:?}");
    assert_eq!(plain_logs(dir.path()).len(), 1);

    let mut sessions = vec![];
    for path in files {
        let mut content = String::new();
        if path.extension().is_some_and(|ext| ext == "gz") {
            GzDecoder::new(fs::File::open(&path).unwrap())
                .read_to_string(&mut content)
                .unwrap();
        } else {
            content = fs::read_to_string(&path).unwrap();
        }
        sessions.push(content.trim_end().rsplit(' ').next().unwrap().to_string());
    }
    sessions.sort();
    assert_eq!(sessions, vec!["3", "4", "5"]);
}

#[test]
fn size_limit_discards_large_archives() {
    let dir = TempDir::new().unwrap();
    let manager = manager(file_config(dir.path(), LimitationMode::Size, 1, true));

    let noise = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(4096)
        .map(char::from)
        .collect::<String>();
    manager.default_logger().info("{}", &[Value::from(noise)]);
    manager.enable_file_logging(false).unwrap();

    // the next session compresses the previous one, which is too large to keep
    manager.enable_file_logging(true).unwrap();
    manager.default_logger().info("small", &[]);
    manager.shutdown();

    let files = entries(dir.path());
    assert_eq!(files.len(), 1, "{files:?}");
    assert!(fs::read_to_string(&files[0]).unwrap().ends_with("small\n"));
}

#[test]
fn file_directory_enables_file_logging() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("nested").join("logs");
    let manager = Manager::builder()
        .console(Testing::default())
        .layout("{message}")
        .file_directory(&logs)
        .build()
        .unwrap();
    assert!(manager.is_file_logging_enabled());
    assert_eq!(manager.config().file.directory, logs);

    manager.default_logger().info("hello", &[]);
    manager.shutdown();

    let files = plain_logs(&logs);
    assert_eq!(files.len(), 1, "{files:?}");
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), "hello\n");
}

#[test]
fn invalid_file_settings_are_rejected() {
    let dir = TempDir::new().unwrap();
    let err = Manager::builder()
        .file(file_config(dir.path(), LimitationMode::Files, 0, false))
        .build()
        .unwrap_err();
    assert!(matches!(err, arealog::Error::InvalidConfig(_)));
    assert!(entries(dir.path()).is_empty());
}
