//! Working chart: the parts of a `.osu` file the calculator needs.

use std::fs;

use super::error::{CalculationError, ChartError};
use super::ruleset::RulesetKind;

const FORMAT_HEADER: &str = "osu file format v";

/// Difficulty settings from the `[Difficulty]` section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDifficulty {
    pub drain_rate: f64,
    pub circle_size: f64,
    pub overall_difficulty: f64,
    pub approach_rate: f64,
}

impl Default for ChartDifficulty {
    fn default() -> Self {
        Self {
            drain_rate: 5.0,
            circle_size: 5.0,
            overall_difficulty: 5.0,
            approach_rate: 5.0,
        }
    }
}

/// In-memory chart bound to the ruleset it will be rated under.
#[derive(Debug, Clone)]
pub struct WorkingChart {
    pub format_version: u32,
    /// Mode the chart was authored for.
    pub mode: i32,
    pub ruleset: RulesetKind,
    pub difficulty: ChartDifficulty,
    /// Hit object start times in milliseconds, ascending.
    pub hit_times: Vec<f64>,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    General,
    Difficulty,
    HitObjects,
    Other,
}

impl WorkingChart {
    /// Parse `.osu` text and bind it to `ruleset`.
    ///
    /// Charts authored for the primary mode convert to any ruleset; charts
    /// authored for another mode only load under that mode.
    pub fn parse(text: &str, ruleset: RulesetKind) -> Result<Self, ChartError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_start_matches('\u{feff}').trim()));

        let format_version = loop {
            match lines.next() {
                Some((_, "")) => continue,
                Some((line, l)) => {
                    let v = l.strip_prefix(FORMAT_HEADER).ok_or(ChartError::MissingHeader)?;
                    break v.parse::<u32>().map_err(|e| ChartError::InvalidLine {
                        line,
                        reason: format!("format version: {e}"),
                    })?;
                }
                None => return Err(ChartError::MissingHeader),
            }
        };

        let mut mode = 0;
        let mut difficulty = ChartDifficulty::default();
        let mut approach_rate = None;
        let mut hit_times = Vec::new();
        let mut section = Section::None;

        for (line, l) in lines {
            if l.is_empty() || l.starts_with("//") {
                continue;
            }
            if l.starts_with('[') && l.ends_with(']') {
                section = match &l[1..l.len() - 1] {
                    "General" => Section::General,
                    "Difficulty" => Section::Difficulty,
                    "HitObjects" => Section::HitObjects,
                    _ => Section::Other,
                };
                continue;
            }

            match section {
                Section::General => {
                    if let Some(("Mode", v)) = split_key_value(l) {
                        mode = parse_num(v, line)?;
                    }
                }
                Section::Difficulty => {
                    if let Some((key, v)) = split_key_value(l) {
                        match key {
                            "HPDrainRate" => difficulty.drain_rate = parse_num(v, line)?,
                            "CircleSize" => difficulty.circle_size = parse_num(v, line)?,
                            "OverallDifficulty" => difficulty.overall_difficulty = parse_num(v, line)?,
                            "ApproachRate" => approach_rate = Some(parse_num(v, line)?),
                            _ => {}
                        }
                    }
                }
                Section::HitObjects => {
                    let time = l.split(',').nth(2).ok_or_else(|| ChartError::InvalidLine {
                        line,
                        reason: "hit object needs at least x,y,time".into(),
                    })?;
                    hit_times.push(parse_num::<f64>(time, line)?);
                }
                Section::None | Section::Other => {}
            }
        }

        // Old formats have no ApproachRate; it follows OverallDifficulty.
        difficulty.approach_rate = approach_rate.unwrap_or(difficulty.overall_difficulty);

        if RulesetKind::from_id(mode).is_none() {
            return Err(ChartError::UnknownMode(mode));
        }
        if mode != 0 && mode != ruleset.id() {
            return Err(ChartError::Unconvertible {
                chart: mode,
                ruleset: ruleset.id(),
            });
        }

        hit_times.sort_by(f64::total_cmp);

        Ok(Self {
            format_version,
            mode,
            ruleset,
            difficulty,
            hit_times,
        })
    }
}

fn split_key_value(l: &str) -> Option<(&str, &str)> {
    l.split_once(':').map(|(k, v)| (k.trim(), v.trim()))
}

fn parse_num<T>(v: &str, line: usize) -> Result<T, ChartError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    v.parse().map_err(|e: T::Err| ChartError::InvalidLine {
        line,
        reason: format!("{v:?}: {e}"),
    })
}

/// Loads chart data by path.
pub trait ChartLoader: Send + Sync {
    fn load(&self, path: &str, ruleset: RulesetKind) -> Result<WorkingChart, CalculationError>;
}

/// Reads `.osu` files straight from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatFileChartLoader;

impl ChartLoader for FlatFileChartLoader {
    fn load(&self, path: &str, ruleset: RulesetKind) -> Result<WorkingChart, CalculationError> {
        let wrap = |source| CalculationError::ChartLoad {
            path: path.to_owned(),
            source,
        };

        if path.trim().is_empty() {
            return Err(wrap(ChartError::EmptyPath));
        }
        let text = fs::read_to_string(path).map_err(|e| wrap(ChartError::Io(e)))?;
        WorkingChart::parse(&text, ruleset).map_err(wrap)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const CHART: &str = "\u{feff}osu file format v14

[General]
AudioFilename: audio.mp3
Mode: 0

[Difficulty]
HPDrainRate:6
CircleSize:4
OverallDifficulty:8.5

[HitObjects]
256,192,1500,1,0,0:0:0:0:
100,100,1000,1,0,0:0:0:0:
";

    #[test]
    fn parses_header_difficulty_and_objects() {
        let chart = WorkingChart::parse(CHART, RulesetKind::Osu).unwrap();
        assert_eq!(chart.format_version, 14);
        assert_eq!(chart.mode, 0);
        assert_eq!(chart.difficulty.drain_rate, 6.0);
        assert_eq!(chart.difficulty.overall_difficulty, 8.5);
        // no ApproachRate line
        assert_eq!(chart.difficulty.approach_rate, 8.5);
        assert_eq!(chart.hit_times, vec![1000.0, 1500.0]);
    }

    #[test]
    fn primary_mode_converts_to_other_rulesets() {
        let chart = WorkingChart::parse(CHART, RulesetKind::Mania).unwrap();
        assert_eq!(chart.ruleset, RulesetKind::Mania);
    }

    #[test]
    fn other_modes_do_not_convert() {
        let taiko = CHART.replace("Mode: 0", "Mode: 1");
        assert!(WorkingChart::parse(&taiko, RulesetKind::Taiko).is_ok());
        assert!(matches!(
            WorkingChart::parse(&taiko, RulesetKind::Catch),
            Err(ChartError::Unconvertible { chart: 1, ruleset: 2 })
        ));

        let bad = CHART.replace("Mode: 0", "Mode: 7");
        assert!(matches!(
            WorkingChart::parse(&bad, RulesetKind::Osu),
            Err(ChartError::UnknownMode(7))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            WorkingChart::parse("not a chart", RulesetKind::Osu),
            Err(ChartError::MissingHeader)
        ));
        assert!(matches!(WorkingChart::parse("", RulesetKind::Osu), Err(ChartError::MissingHeader)));

        let broken = CHART.replace("256,192,1500", "256,192,soon");
        assert!(matches!(
            WorkingChart::parse(&broken, RulesetKind::Osu),
            Err(ChartError::InvalidLine { line: 13, .. })
        ));
    }

    #[test]
    fn loader_rejects_empty_and_missing_paths() {
        let err = FlatFileChartLoader.load("", RulesetKind::Osu).unwrap_err();
        assert!(matches!(err, CalculationError::ChartLoad { source: ChartError::EmptyPath, .. }));

        let err = FlatFileChartLoader
            .load("/definitely/not/here.osu", RulesetKind::Osu)
            .unwrap_err();
        assert!(matches!(err, CalculationError::ChartLoad { source: ChartError::Io(_), .. }));
    }
}
