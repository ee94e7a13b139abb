use super::DayStorage;
use crate::errors::{AppError, AppResult};
use crate::models::{DayKey, Label, Period, Record};
use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Legacy pause cell: `暂停原因: <reason> (持续 <minutes> 分钟)`.
static LEGACY_PAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*暂停原因[:：]\s*(.*?)\s*\(持续\s*(\d+(?:\.\d+)?)\s*分钟\)\s*$").unwrap()
});

/// Splits a legacy pause cell into its reason and recorded length. Cells
/// without the suffix keep their text and take the length of the period.
fn legacy_pause(cell: String, period: &Period) -> Label {
    if let Some(caps) = LEGACY_PAUSE_RE.captures(&cell)
        && let Ok(minutes) = caps[2].parse::<f64>()
    {
        return Label::Pause {
            reason: caps[1].to_string(),
            minutes,
        };
    }
    Label::Pause {
        reason: cell,
        minutes: period.minutes(),
    }
}

/// One CSV row. Headers from the earlier Chinese-language tool are accepted
/// as aliases so old day files still load.
#[derive(Debug, Serialize, Deserialize)]
struct RecordRow {
    #[serde(alias = "时间段")]
    period: String,
    #[serde(default, alias = "完成的事项")]
    activity: Option<String>,
    #[serde(default, alias = "暂停原因")]
    pause_reason: Option<String>,
    #[serde(default)]
    pause_minutes: Option<f64>,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        let (activity, pause_reason, pause_minutes) = match &record.label {
            Label::Activity(text) => (Some(text.clone()), None, None),
            Label::Pause { reason, minutes } => (None, Some(reason.clone()), Some(*minutes)),
        };
        Self {
            period: record.period.to_string(),
            activity,
            pause_reason,
            pause_minutes,
        }
    }
}

impl RecordRow {
    fn into_record(self) -> AppResult<Record> {
        let period = Period::parse(&self.period)?;
        let label = match (self.pause_minutes, self.pause_reason) {
            (Some(minutes), reason) => Label::Pause {
                reason: reason.unwrap_or_default(),
                minutes,
            },
            // legacy pause rows carry no duration column
            (None, Some(reason)) if self.activity.is_none() => legacy_pause(reason, &period),
            (None, _) => Label::Activity(self.activity.unwrap_or_default()),
        };
        Ok(Record::new(period, label))
    }
}

/// Stores each day as `<dir>/YYYYMMDD-worklog.csv`.
#[derive(Debug, Clone)]
pub struct CsvDayStorage {
    dir: PathBuf,
}

impl CsvDayStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, day: &DayKey) -> PathBuf {
        self.dir.join(day.file_name())
    }

    fn corrupt(path: &Path, reason: impl ToString) -> AppError {
        AppError::CorruptFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl DayStorage for CsvDayStorage {
    fn load(&self, day: &DayKey) -> AppResult<Vec<Record>> {
        let path = self.path_for(day);

        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no day file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if meta.len() == 0 {
            debug!(path = %path.display(), "day file is empty");
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&path).map_err(|e| Self::corrupt(&path, e))?;
        let mut records = Vec::new();
        for row in rdr.deserialize::<RecordRow>() {
            let row = row.map_err(|e| Self::corrupt(&path, e))?;
            let record = row.into_record().map_err(|e| Self::corrupt(&path, e))?;
            records.push(record);
        }

        info!(path = %path.display(), count = records.len(), "day log loaded");
        Ok(records)
    }

    fn save(&self, day: &DayKey, records: &[Record]) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(day);
        let tmp = path.with_extension("csv.tmp");

        {
            let mut wtr = csv::Writer::from_path(&tmp)?;
            if records.is_empty() {
                wtr.write_record(["period", "activity", "pause_reason", "pause_minutes"])?;
            }
            for record in records {
                wtr.serialize(RecordRow::from(record))?;
            }
            wtr.flush()?;
        }
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), count = records.len(), "day log saved");
        Ok(())
    }

    fn quarantine(&self, day: &DayKey) -> AppResult<Option<PathBuf>> {
        let path = self.path_for(day);
        if !path.exists() {
            return Ok(None);
        }

        let mut target = path.clone().into_os_string();
        target.push(format!(".corrupt-{}", Local::now().format("%H%M%S")));
        let target = PathBuf::from(target);

        fs::rename(&path, &target)?;
        warn!(from = %path.display(), to = %target.display(), "corrupt day file moved aside");
        Ok(Some(target))
    }
}
