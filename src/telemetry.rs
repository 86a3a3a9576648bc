// src/telemetry.rs
//
// Per-step telemetry sinks.
// - EpisodeSink: trait used by the episode runner
// - NoopSink:    discards all records
// - JsonlSink:   writes one JSON record per step for offline analysis

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::env::{StepResult, TerminationReason};

/// One logged transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Episode this record belongs to.
    pub episode_id: u64,
    /// 1-based step index within the episode.
    pub step: u64,
    /// Action taken at this step.
    pub action: u8,
    /// Cursor position after the step.
    pub cursor: usize,
    /// Reward of the resulting construction.
    pub reward: f64,
    /// Whether the episode terminated at this step.
    pub done: bool,
    /// Termination reason if the episode ended.
    pub termination: Option<TerminationReason>,
}

impl StepRecord {
    pub fn from_result(episode_id: u64, step: u64, action: u8, result: &StepResult) -> Self {
        Self {
            episode_id,
            step,
            action,
            cursor: result.info.cursor,
            reward: result.reward,
            done: result.done,
            termination: result.info.termination,
        }
    }
}

/// Abstract sink for per-step telemetry.
pub trait EpisodeSink {
    fn log_step(&mut self, record: &StepRecord);
}

/// Sink that discards all records.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EpisodeSink for NoopSink {
    fn log_step(&mut self, _record: &StepRecord) {
        // intentionally no-op
    }
}

/// JSONL file sink.
///
/// Each step is written as a single JSON object on its own line. Records are
/// buffered; call [`JsonlSink::flush`] before dropping if the file is read
/// back in the same process.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink writing to `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl EpisodeSink for JsonlSink {
    fn log_step(&mut self, record: &StepRecord) {
        if let Ok(line) = serde_json::to_string(record) {
            let _ = writeln!(self.writer, "{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GraphEnv;
    use std::io::BufRead;

    #[test]
    fn test_jsonl_sink_writes_one_record_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.jsonl");

        let mut env = GraphEnv::new(3).unwrap();
        let mut sink = JsonlSink::create(&path).unwrap();
        for (step, action) in [1u8, 0, 0].iter().enumerate() {
            let result = env.step(*action).unwrap();
            sink.log_step(&StepRecord::from_result(7, step as u64 + 1, *action, &result));
        }
        sink.flush().unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let lines: Vec<String> = io::BufReader::new(file)
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 3);

        let records: Vec<StepRecord> = lines
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records[0].episode_id, 7);
        assert_eq!(records[0].cursor, 1);
        assert!(!records[1].done);
        assert!(records[2].done);
        assert_eq!(
            records[2].termination,
            Some(TerminationReason::DecisionsExhausted)
        );
    }

    #[test]
    fn test_noop_sink_accepts_records() {
        let mut env = GraphEnv::new(2).unwrap();
        let result = env.step(1).unwrap();
        NoopSink.log_step(&StepRecord::from_result(0, 1, 1, &result));
    }
}
