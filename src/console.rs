//! Line-oriented operator console.
//!
//! Input arrives through an [`InputSource`], which is passed in explicitly so
//! tests can script it. Malformed lines are reported and the prompt repeats;
//! any other error ends the session.

use crate::codec::{self, POSITION_EXAMPLE};
use crate::error::{Result, RoverError};
use crate::mission::{Mission, MoveReport};
use crate::vehicle::{Vehicle, VehicleKind};
use log::{debug, warn};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Something that hands out input lines one at a time
pub trait InputSource {
    /// Next line without its line ending, or `None` once input is exhausted
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Reads from any buffered reader, typically a locked stdin or a file
pub struct ReaderSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource { reader }
    }
}

impl<R: BufRead> InputSource for ReaderSource<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Replays a fixed list of lines
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedSource {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Reads lines until `parse` accepts one. Format errors are written to `out`
/// and the prompt repeats; other errors are returned. `Ok(None)` means the
/// input ran out first.
pub fn prompt_until_valid<T, F>(
    source: &mut dyn InputSource,
    out: &mut dyn Write,
    prompt: Option<&str>,
    skip_blank: bool,
    mut parse: F,
) -> Result<Option<T>>
where
    F: FnMut(&str) -> Result<T>,
{
    loop {
        if let Some(prompt) = prompt {
            write!(out, "{}", prompt)?;
            out.flush()?;
        }
        let Some(line) = source.read_line()? else {
            return Ok(None);
        };
        if skip_blank && line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(RoverError::Format(message)) => {
                debug!("Rejected input line '{}': {}", line, message);
                writeln!(out, "{}, please try again", message)?;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Knobs for [`run_session`]
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub kind: VehicleKind,
    /// Print prompts before each read, for a human at a terminal
    pub show_prompts: bool,
}

/// Everything a finished session produced
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub reports: Vec<MoveReport>,
    pub rejected_placements: usize,
}

/// Drives a mission from `source`: a position line deploys a new vehicle,
/// the following line is the instruction it runs. Vehicles stay on the
/// plateau afterwards, so later ones have to steer around them.
pub fn run_session(
    source: &mut dyn InputSource,
    out: &mut dyn Write,
    mission: &mut Mission,
    options: SessionOptions,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    let position_prompt = format!("Vehicle position (e.g. {}): ", POSITION_EXAMPLE);

    loop {
        let prompt = options.show_prompts.then_some(position_prompt.as_str());
        let Some(position) = prompt_until_valid(source, out, prompt, true, codec::to_position)? else {
            break;
        };

        let number = mission.plateau()?.vehicle_count() + 1;
        let vehicle = Vehicle::new(options.kind, position)
            .with_name(format!("{} {}", options.kind.label(), number));
        let id = match mission.deploy_vehicle(vehicle) {
            Ok(id) => id,
            Err(RoverError::InvalidArgument(message)) => {
                warn!("{}", message);
                writeln!(out, "{}", message)?;
                summary.rejected_placements += 1;
                // The instruction paired with the rejected position goes unused
                match source.read_line()? {
                    Some(skipped) => debug!("Skipped instruction '{}' of rejected placement", skipped),
                    None => break,
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        let prompt = options.show_prompts.then_some("Instruction: ");
        let parser = mission.parser();
        let Some(text) = prompt_until_valid(source, out, prompt, false, |line| {
            parser.parse(line).map(|_| line.to_string())
        })?
        else {
            debug!("Input ended before vehicle {} received an instruction", id);
            break;
        };

        let report = mission.send_instruction(Some(&text))?;
        writeln!(out, "{}", report)?;
        summary.reports.push(report);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::Dialect;
    use crate::mission::MoveStatus;
    use crate::plateau::Plateau;
    use crate::types::{Coordinates, Direction, Position};
    use std::io::Cursor;

    const SCRIPTED: SessionOptions = SessionOptions {
        kind: VehicleKind::Rover,
        show_prompts: false,
    };

    fn mission_5x5() -> Mission {
        let mut mission = Mission::new(Dialect::Simple);
        mission.connect_plateau(Plateau::rectangular(Coordinates::new(5, 5)).unwrap());
        mission
    }

    #[test]
    fn test_reader_source_strips_line_endings() {
        let mut source = ReaderSource::new(Cursor::new("1 2 N\r\nLMR\n\nlast"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("1 2 N"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("LMR"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(source.read_line().unwrap(), None);
    }

    #[test]
    fn test_prompt_retries_on_format_error() {
        let mut source = ScriptedSource::new(["bogus", "1 2", "3 4 E"]);
        let mut out = Vec::new();
        let position = prompt_until_valid(&mut source, &mut out, Some("> "), false, codec::to_position)
            .unwrap()
            .unwrap();
        assert_eq!(position, Position::at(3, 4, Direction::East));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("> ").count(), 3);
        assert_eq!(text.matches("please try again").count(), 2);
    }

    #[test]
    fn test_prompt_returns_none_when_input_runs_out() {
        let mut source = ScriptedSource::new(["nope"]);
        let mut out = Vec::new();
        let result = prompt_until_valid(&mut source, &mut out, None, false, codec::to_coordinates).unwrap();
        assert!(result.is_none());
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_prompt_propagates_other_errors() {
        let mut source = ScriptedSource::new(["anything"]);
        let mut out = Vec::new();
        let result: Result<Option<()>> = prompt_until_valid(&mut source, &mut out, None, false, |_| {
            Err(RoverError::state("no plateau connected"))
        });
        assert!(result.unwrap_err().is_state());
    }

    #[test]
    fn test_session_classic_two_rovers() {
        let mut mission = mission_5x5();
        let mut source = ScriptedSource::new(["1 2 N", "LMLMLMLMM", "", "3 3 E", "MMRMMRMRRM"]);
        let mut out = Vec::new();
        let summary = run_session(&mut source, &mut out, &mut mission, SCRIPTED).unwrap();

        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.reports[0].final_position(), Position::at(1, 3, Direction::North));
        assert_eq!(summary.reports[1].final_position(), Position::at(5, 1, Direction::East));

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "reached Position 1 3 N after fully applying instruction LMLMLMLMM",
                "reached Position 5 1 E after fully applying instruction MMRMMRMRRM",
            ]
        );
        assert_eq!(mission.plateau().unwrap().vehicle_count(), 2);
    }

    #[test]
    fn test_session_retries_malformed_lines() {
        let mut mission = mission_5x5();
        let mut source = ScriptedSource::new(["1 2 north", "1 2 N", "MXM", "MRM"]);
        let mut out = Vec::new();
        let summary = run_session(&mut source, &mut out, &mut mission, SCRIPTED).unwrap();

        assert_eq!(summary.reports.len(), 1);
        assert_eq!(summary.reports[0].instruction_text, "MRM");
        assert_eq!(summary.reports[0].final_position(), Position::at(2, 3, Direction::East));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("please try again").count(), 2);
    }

    #[test]
    fn test_session_rejects_occupied_start() {
        let mut mission = mission_5x5();
        let mut source = ScriptedSource::new([
            "0 0 N", "M", "0 1 E", "MM", "7 7 N", "L", "2 2 S", "MMMM",
        ]);
        let mut out = Vec::new();
        let summary = run_session(&mut source, &mut out, &mut mission, SCRIPTED).unwrap();

        // "0 1 E" is taken by the first rover and "7 7 N" is off the plateau.
        // Their instruction lines are dropped along with them.
        assert_eq!(summary.rejected_placements, 2);
        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.reports[1].status(), MoveStatus::EmergencyStopped);
        assert_eq!(summary.reports[1].final_position(), Position::at(2, 0, Direction::South));

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("please try again"));
        assert_eq!(text.lines().count(), 4);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_session_ends_after_rejected_last_placement() {
        let mut mission = mission_5x5();
        let mut source = ScriptedSource::new(["9 9 N"]);
        let mut out = Vec::new();
        let summary = run_session(&mut source, &mut out, &mut mission, SCRIPTED).unwrap();
        assert_eq!(summary.rejected_placements, 1);
        assert!(summary.reports.is_empty());
    }

    #[test]
    fn test_session_shows_prompts() {
        let mut mission = mission_5x5();
        let mut source = ScriptedSource::new(["1 1 W", ""]);
        let mut out = Vec::new();
        let options = SessionOptions {
            kind: VehicleKind::WallE,
            show_prompts: true,
        };
        let summary = run_session(&mut source, &mut out, &mut mission, options).unwrap();

        assert_eq!(summary.reports[0].status(), MoveStatus::Empty);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Vehicle position (e.g. 1 2 N): Instruction: "));
        assert!(text.contains("Instruction is empty, vehicle is in the same Position 1 1 W"));
        assert_eq!(mission.active_vehicle().unwrap().name(), "WALL-E 1");
    }
}
