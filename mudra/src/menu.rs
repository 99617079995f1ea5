//! Text menu
//!
//! Numbered menu for the therapist (record and name a gesture) and the
//! patient (perform reps of a saved gesture). Generic over its reader and
//! writer so it can be driven from tests.

use mudra_core::{
    Error, Gesture, GestureLibrary, MatchOutcome, MatchSession, MatchStep, RecordSession, Result,
    SensorSource, SessionConfig,
};
use std::io::{BufRead, Write};
use std::ops::{ControlFlow, RangeInclusive};
use std::str::FromStr;

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Record,
    Reps,
    Show,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(MenuChoice::Record),
            "2" => Ok(MenuChoice::Reps),
            "3" => Ok(MenuChoice::Show),
            "q" | "Q" => Ok(MenuChoice::Quit),
            other => Err(Error::InvalidInput(format!("menu choice '{}'", other))),
        }
    }
}

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive shell over a sensor source and an in-memory gesture library.
pub struct Console<R, W, S> {
    input: R,
    output: W,
    source: S,
    config: SessionConfig,
    library: GestureLibrary,
}

impl<R: BufRead, W: Write, S: SensorSource> Console<R, W, S> {
    pub fn new(input: R, output: W, source: S, config: SessionConfig) -> Self {
        Self {
            input,
            output,
            source,
            config,
            library: GestureLibrary::new(),
        }
    }

    /// Gestures saved so far.
    pub fn library(&self) -> &GestureLibrary {
        &self.library
    }

    /// Mutable access to the library, e.g. to preload gestures.
    pub fn library_mut(&mut self) -> &mut GestureLibrary {
        &mut self.library
    }

    /// Give back the writer and the source.
    pub fn into_parts(self) -> (W, S) {
        (self.output, self.source)
    }

    /// Run the menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(
                self.output,
                "\n1. Therapist - Record a gesture \n2. Patient - Perform reps of a gesture\n3. Show a saved gesture\nq. Quit"
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let flow = match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Record) => self.record_gesture()?,
                Ok(MenuChoice::Reps) => self.perform_reps()?,
                Ok(MenuChoice::Show) => self.show_gesture()?,
                Ok(MenuChoice::Quit) => Flow::Quit,
                Err(e) => {
                    log::debug!("{}", e);
                    writeln!(self.output, "Incorrect input!")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                log::info!("Quitting with {} saved gestures", self.library.len());
                return Ok(());
            }
        }
    }

    fn record_gesture(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nRecording... double tap or Ctrl-C to stop.")?;

        let mut session = RecordSession::new(&mut self.source, &self.config);
        while let ControlFlow::Continue(appended) = session.step() {
            if let Some(w) = appended {
                write!(self.output, "\r{}", w)?;
                self.output.flush()?;
            }
        }
        let gesture = session.finish();

        if !gesture.is_empty() {
            writeln!(self.output, "\n{}", gesture)?;
        }
        loop {
            let Some(answer) = self.prompt("Do you want to save (Y/N)? ")? else {
                return Ok(Flow::Quit);
            };
            match answer.as_str() {
                "Y" | "y" => return self.save_gesture(gesture),
                "N" | "n" => {
                    writeln!(self.output, "\nGesture discarded!")?;
                    return Ok(Flow::Continue);
                }
                _ => writeln!(self.output, "Invalid!")?,
            }
        }
    }

    fn save_gesture(&mut self, gesture: Gesture) -> Result<Flow> {
        writeln!(self.output, "\nGesture recorded! Enter a name for the gesture: ")?;
        loop {
            let Some(name) = self.read_line()? else {
                return Ok(Flow::Quit);
            };
            match self.library.save(&name, gesture.clone()) {
                Ok(()) => {
                    writeln!(self.output, "\nGesture {} saved!", name)?;
                    return Ok(Flow::Continue);
                }
                Err(Error::InvalidInput(_)) => writeln!(self.output, "Invalid!")?,
                Err(e) => return Err(e),
            }
        }
    }

    fn perform_reps(&mut self) -> Result<Flow> {
        if self.library.is_empty() {
            writeln!(self.output, "\nNo gestures saved yet. Record one first.")?;
            return Ok(Flow::Continue);
        }
        let Some(index) = self.select_gesture()? else {
            return Ok(Flow::Quit);
        };
        let (name, gesture) = self.library.get_index(index)?;
        let (name, gesture) = (name.to_string(), gesture.clone());

        let Some(total) = self.prompt_number(
            "How many reps would you like to perform? ",
            1..=usize::MAX,
        )?
        else {
            return Ok(Flow::Quit);
        };

        log::info!("Performing {} reps of '{}'", total, name);
        for done in 0..total {
            writeln!(self.output, "Reps: {} / {}", done, total)?;
            if let MatchOutcome::Aborted(reason) = self.attempt(&gesture)? {
                writeln!(self.output, "\nReps stopped at {} / {} ({}).", done, total, reason)?;
                return Ok(Flow::Continue);
            }
        }
        writeln!(self.output, "Reps: {} / {}", total, total)?;
        Ok(Flow::Continue)
    }

    fn attempt(&mut self, gesture: &Gesture) -> Result<MatchOutcome> {
        let mut session = MatchSession::new(&mut self.source, gesture, &self.config);
        loop {
            match session.step() {
                ControlFlow::Continue(Some(MatchStep::Advanced { progress })) => {
                    write!(self.output, "\rStep {} / {}", progress, gesture.len())?;
                    self.output.flush()?;
                }
                ControlFlow::Continue(Some(MatchStep::Strike { .. })) => {
                    writeln!(self.output, "\nstrike")?
                }
                ControlFlow::Continue(Some(MatchStep::Reset)) => writeln!(self.output, "\nRESET")?,
                ControlFlow::Continue(Some(MatchStep::Completed) | None) => {}
                ControlFlow::Break(outcome) => {
                    if outcome.is_completed() {
                        writeln!(self.output, "\nGesture completed!")?;
                    }
                    return Ok(outcome);
                }
            }
        }
    }

    fn show_gesture(&mut self) -> Result<Flow> {
        if self.library.is_empty() {
            writeln!(self.output, "\nNo gestures saved yet. Record one first.")?;
            return Ok(Flow::Continue);
        }
        let Some(index) = self.select_gesture()? else {
            return Ok(Flow::Quit);
        };
        let (name, gesture) = self.library.get_index(index)?;
        let json = gesture.to_json()?;
        writeln!(self.output, "\n{} ({} steps):\n{}", name, gesture.len(), json)?;
        Ok(Flow::Continue)
    }

    /// List the library and read a 1-based selection; 0-based index out.
    fn select_gesture(&mut self) -> Result<Option<usize>> {
        for (i, name) in self.library.names().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, name)?;
        }
        let count = self.library.len();
        Ok(self.prompt_number("", 1..=count)?.map(|n| n - 1))
    }

    /// Prompt until a number within `range` is entered; `None` at end of input.
    fn prompt_number(&mut self, text: &str, range: RangeInclusive<usize>) -> Result<Option<usize>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(n) if range.contains(&n) => return Ok(Some(n)),
                _ => writeln!(self.output, "Incorrect input!")?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next trimmed input line, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
