use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum LogFile {
    Error,
    Game,
}

struct FileLogger {
    level: LevelFilter,
    files: Mutex<BTreeMap<LogFile, File>>,
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

const HEADER_LINE: &str =
    "-------------------------------------------------------------------------------";
const HEADER_TITLE: &str = "quickstack - shared container log";

/// Installs the file logger as the `log` backend. Records go to `<root>/log/game.log`;
/// warnings and errors are also copied to `error.log`. Calling it again is a no-op.
pub fn init(root: &Path, level: LevelFilter) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let log_dir = root.join("log");
    std::fs::create_dir_all(&log_dir)
        .map_err(|err| format!("log directory create failed: {}", err))?;

    let mut files = BTreeMap::new();
    for (log_file, name, header) in [
        (LogFile::Error, "error.log", false),
        (LogFile::Game, "game.log", true),
    ] {
        let path = log_dir.join(name);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| format!("open log {} failed: {}", name, err))?;
        if header && file.metadata().map(|m| m.len()).unwrap_or(0) == 0 {
            write_header(&mut file, name)?;
        }
        files.insert(log_file, file);
    }

    let logger = LOGGER.get_or_init(|| FileLogger {
        level,
        files: Mutex::new(files),
    });
    // Another facade backend may already be installed (test harnesses do this).
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
    Ok(())
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        let _ = write_line(self, LogFile::Game, &line);
        if record.level() <= Level::Warn {
            let _ = write_line(self, LogFile::Error, &line);
        }
    }

    fn flush(&self) {
        if let Ok(mut files) = self.files.lock() {
            for file in files.values_mut() {
                let _ = file.flush();
            }
        }
    }
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    let timestamp = format_timestamp(unix_timestamp());
    format!("{timestamp} [{level}] {target}: {message}\n")
}

fn write_line(logger: &FileLogger, log_file: LogFile, line: &str) -> std::io::Result<()> {
    let mut files = logger
        .files
        .lock()
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "log lock poisoned"))?;
    if let Some(file) = files.get_mut(&log_file) {
        file.write_all(line.as_bytes())?;
        file.flush()?;
    }
    Ok(())
}

fn write_header(file: &mut File, name: &str) -> Result<(), String> {
    let timestamp = format_timestamp(unix_timestamp());
    writeln!(file, "{HEADER_LINE}")
        .map_err(|err| format!("header write failed: {}", err))?;
    writeln!(file, "{HEADER_TITLE}")
        .map_err(|err| format!("header write failed: {}", err))?;
    writeln!(file, "{name} - started {timestamp}")
        .map_err(|err| format!("header write failed: {}", err))?;
    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    let datetime = breakdown_timestamp(ts);
    format!(
        "{:02}.{:02}.{} {:02}:{:02}:{:02}",
        datetime.day, datetime.month, datetime.year, datetime.hour, datetime.minute, datetime.second
    )
}

fn unix_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

struct DateTimeParts {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

fn breakdown_timestamp(ts: i64) -> DateTimeParts {
    let secs = ts.max(0);
    let days = secs / 86_400;
    let seconds_of_day = (secs % 86_400) as u32;
    let (year, month, day) = civil_from_days(days);
    DateTimeParts {
        year,
        month,
        day,
        hour: seconds_of_day / 3_600,
        minute: (seconds_of_day % 3_600) / 60,
        second: seconds_of_day % 60,
    }
}

// Days since 1970-01-01 to a proleptic Gregorian date.
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = mp + if mp < 10 { 3 } else { -9 };
    let year = (y + if m <= 2 { 1 } else { 0 }) as i32;
    (year, m as u32, d as u32)
}
