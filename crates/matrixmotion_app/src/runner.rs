// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless playback driver.
//!
//! Simulates the per-frame scheduler: starts playback, ticks at a fixed rate
//! until the engine goes idle, and writes one record per frame.

use crate::error::AppError;
use crate::mesh::describe_bounds;
use matrixmotion_timeline::{
    Channel, EditOutcome, MatrixEngine, MatrixSnapshot, RotationLabel, TickOutput,
};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// How frames are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text columns
    #[default]
    Table,
    /// One JSON object per line
    Json,
}

/// A manual edit given on the command line as `FIELD=TEXT`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    /// Edited field
    pub channel: Channel,
    /// Raw text, may be empty
    pub text: String,
}

impl FromStr for FieldEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, text) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=TEXT, got {s:?}"))?;
        let channel = Channel::from_name(name.trim())
            .filter(Channel::is_matrix)
            .ok_or_else(|| format!("unknown field {name:?}, expected x0, x1, y0 or y1"))?;
        Ok(Self {
            channel,
            text: text.to_string(),
        })
    }
}

/// JSON record of one frame
#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    time: f32,
    label: RotationLabel,
    values: [f32; 5],
    texts: &'a [String; 5],
    matrix: MatrixSnapshot,
}

/// Drives a [`MatrixEngine`] and writes its output
pub struct Runner<W: Write> {
    engine: MatrixEngine,
    points: Vec<[f32; 3]>,
    tick_interval: f32,
    format: OutputFormat,
    out: W,
}

impl<W: Write> Runner<W> {
    /// Create a runner
    pub fn new(
        engine: MatrixEngine,
        points: Vec<[f32; 3]>,
        tick_interval: f32,
        format: OutputFormat,
        out: W,
    ) -> Self {
        Self {
            engine,
            points,
            tick_interval,
            format,
            out,
        }
    }

    /// Play the whole timeline once. Returns the number of frames written.
    pub fn play(&mut self) -> Result<u64, AppError> {
        if !(self.tick_interval.is_finite() && self.tick_interval > 0.0) {
            return Err(AppError::Config(format!(
                "tick interval must be positive, got {}",
                self.tick_interval
            )));
        }

        self.engine.start_playback();
        if self.format == OutputFormat::Table {
            self.write_header()?;
        }

        let mut frames = 0;
        while let Some(output) = self.engine.tick(self.tick_interval) {
            frames += 1;
            self.write_frame(frames, &output)?;
            tracing::debug!(
                time = output.frame.time,
                bounds = %describe_bounds(&self.engine.transform(&self.points)),
                "mesh transformed"
            );
        }

        self.out.flush()?;
        tracing::info!(frames, "playback complete");
        Ok(frames)
    }

    /// Apply manual edits in order, reporting each outcome
    pub fn apply_edits(&mut self, edits: &[FieldEdit]) -> Result<(), AppError> {
        for edit in edits {
            let outcome = self.engine.field_edited(edit.channel, &edit.text);
            let transformed = self.engine.transform(&self.points);
            match outcome {
                EditOutcome::Applied(m) => writeln!(
                    self.out,
                    "edit {}={:?}: applied [[{}, {}], [{}, {}]] -> {}",
                    edit.channel,
                    edit.text,
                    m.x0,
                    m.y0,
                    m.x1,
                    m.y1,
                    describe_bounds(&transformed)
                )?,
                EditOutcome::Pending => writeln!(
                    self.out,
                    "edit {}={:?}: pending, another field is invalid",
                    edit.channel, edit.text
                )?,
                EditOutcome::Rejected => writeln!(
                    self.out,
                    "edit {}={:?}: rejected",
                    edit.channel, edit.text
                )?,
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Write every curve and the interval list as RON
    pub fn dump(&mut self) -> Result<(), AppError> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self.engine.timeline(), pretty)?;
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    /// The driven engine
    pub fn engine(&self) -> &MatrixEngine {
        &self.engine
    }

    /// Consume the runner, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> Result<(), AppError> {
        write!(self.out, "{:>8}  {:<5}", "time", "label")?;
        for channel in Channel::ALL {
            write!(self.out, "  {:>12}", channel.name())?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn write_frame(&mut self, index: u64, output: &TickOutput) -> Result<(), AppError> {
        let texts = output.display.texts();
        match self.format {
            OutputFormat::Table => {
                write!(
                    self.out,
                    "{:>8.3}  {:<5}",
                    output.frame.time,
                    format!("{:?}", output.frame.label)
                )?;
                for text in &texts {
                    write!(self.out, "  {text:>12}")?;
                }
                writeln!(self.out)?;
            }
            OutputFormat::Json => {
                let record = FrameRecord {
                    frame: index,
                    time: output.frame.time,
                    label: output.frame.label,
                    values: output.display.entries.map(|e| e.value),
                    texts: &texts,
                    matrix: output.matrix,
                };
                serde_json::to_writer(&mut self.out, &record)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::unit_cube;
    use approx::assert_abs_diff_eq;
    use matrixmotion_timeline::{Axis, IntervalConsumption, TimelineBuilder};

    fn runner(format: OutputFormat) -> Runner<Vec<u8>> {
        let mut builder = TimelineBuilder::identity();
        builder.scale(Axis::Horizontal, 1.0, 2.0, 1.0, 0.0).unwrap();
        builder.sine(0.0, 1.0, 1.0, 0.0).unwrap();
        let engine = MatrixEngine::new(builder.build(), IntervalConsumption::Drain);
        Runner::new(engine, unit_cube(), 0.5, format, Vec::new())
    }

    #[test]
    fn test_parse_field_edit() {
        let edit: FieldEdit = "y0=-0.5".parse().unwrap();
        assert_eq!(edit.channel, Channel::Y0);
        assert_eq!(edit.text, "-0.5");

        let empty: FieldEdit = "x1=".parse().unwrap();
        assert_eq!(empty.text, "");

        assert!("angle=1".parse::<FieldEdit>().is_err());
        assert!("x0".parse::<FieldEdit>().is_err());
    }

    #[test]
    fn test_table_output() {
        let mut runner = runner(OutputFormat::Table);
        let frames = runner.play().unwrap();
        assert_eq!(frames, 4);

        let text = String::from_utf8(runner.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("angle"));
        assert!(lines[1].trim_start().starts_with("0.500"));
        assert!(lines[4].contains("Sin"));
        assert!(lines[4].contains("-sin(0.3π)"));
    }

    #[test]
    fn test_json_output() {
        let mut runner = runner(OutputFormat::Json);
        runner.play().unwrap();

        let text = String::from_utf8(runner.into_inner()).unwrap();
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["frame"], 1);
        assert_eq!(first["label"], "None");
        assert_eq!(first["values"][0], 1.5);
        assert_abs_diff_eq!(first["matrix"]["x0"].as_f64().unwrap(), 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_edits_after_playback() {
        let mut runner = runner(OutputFormat::Table);
        runner.play().unwrap();
        let edits: Vec<FieldEdit> = ["x0=", "x0=2", "y1=-"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        runner.apply_edits(&edits).unwrap();

        let text = String::from_utf8(runner.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().rev().take(3).collect();
        assert!(lines[2].ends_with("rejected"));
        assert!(lines[1].contains("applied"));
        assert!(lines[0].ends_with("rejected"));
    }

    #[test]
    fn test_dump_contains_every_curve() {
        let mut runner = runner(OutputFormat::Table);
        runner.dump().unwrap();
        let text = String::from_utf8(runner.into_inner()).unwrap();
        for channel in ["X0", "X1", "Y0", "Y1", "Angle"] {
            assert!(text.contains(channel), "{channel} missing");
        }
        assert!(text.contains("Sin"));
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let mut runner = runner(OutputFormat::Table);
        runner.tick_interval = 0.0;
        assert!(matches!(runner.play(), Err(AppError::Config(_))));
        assert!(!runner.engine().is_playing());
    }
}
