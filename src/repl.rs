//! Line-oriented interactive mode.
//!
//! Each line is one command. Edits to the point table or the parameter fields
//! take effect immediately; the steps (`r`, `phi`, `table`, `plot`) are refused
//! until the previous one has run.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

use crate::config::Config;
use crate::dataset::Point;
use crate::error::{RbfError, Result};
use crate::input::{Field, InputStatus};
use crate::parse::{parse, parse_scalar};
use crate::plot::render_plots;
use crate::session::{Session, State};

const HELP: &str = "\
Points:
  add <category> <x1> <x2>   append a row (category 1 = Light, 0 = Dark)
  remove <row>               delete a row by its index in the table
  clear                      delete every row
  load <file.csv>            replace the rows with a category,x1,x2 CSV file
Parameters:
  c1 <x,y>                   first centroid
  c2 <x,y>                   second centroid
  sigma <value>              variance of the Gaussian
Steps:
  r                          calculate r1 ^2 and r2 ^2
  phi                        calculate φ1 and φ2
  table                      show the augmented table
  export <file.csv>          write the augmented table as CSV
  plot                       write the original and transformed scatter plots
Other:
  status                     show the current step and parameters
  help                       show this message
  quit                       leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Point),
    Remove(usize),
    Clear,
    Load(PathBuf),
    Set(Field, String),
    CalculateR,
    CalculatePhi,
    Table,
    Export(PathBuf),
    Plot,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = RbfError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let invalid = || RbfError::InvalidCommand(line.to_string());
        let path = || {
            if rest.is_empty() {
                Err(invalid())
            } else {
                Ok(PathBuf::from(rest))
            }
        };

        let command = match word.to_lowercase().as_str() {
            "add" => {
                let values: Vec<&str> = rest.split_whitespace().collect();
                let [category, x1, x2] = values.as_slice() else {
                    return Err(invalid());
                };
                Command::Add(Point::new(
                    parse_scalar("category", category)?,
                    parse_scalar("x1", x1)?,
                    parse_scalar("x2", x2)?,
                ))
            }
            "remove" | "rm" => Command::Remove(rest.parse().map_err(|_| invalid())?),
            "clear" => Command::Clear,
            "load" => Command::Load(path()?),
            "c1" => Command::Set(Field::C1, rest.to_string()),
            "c2" => Command::Set(Field::C2, rest.to_string()),
            "sigma" | "sigma_sq" => Command::Set(Field::SigmaSq, rest.to_string()),
            "r" => Command::CalculateR,
            "phi" => Command::CalculatePhi,
            "table" => Command::Table,
            "export" => Command::Export(path()?),
            "plot" => Command::Plot,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(invalid()),
        };

        Ok(command)
    }
}

pub struct Repl<R, W> {
    input: R,
    output: W,
    session: Session,
    config: Config,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            input,
            output,
            session: Session::default(),
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads commands until `quit` or end of input. Command failures are
    /// reported and the loop goes on.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Radial Basis Function (RBF) Calculator")?;
        writeln!(self.output, "Type 'help' for available commands, 'quit' to leave")?;

        let mut line = String::new();
        loop {
            write!(self.output, "{}", self.config.session.prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            debug!(command = line.trim(), "read command");
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if let Err(err) = self.execute(command) {
                        self.report(&err)?;
                    }
                }
                Err(err) => self.report(&err)?,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add(point) => {
                self.session.add_point(point)?;
                let row = self.session.dataset().len() - 1;
                self.success(&format!("added row {row}"))?;
            }
            Command::Remove(index) => {
                self.session.remove_point(index)?;
                self.success(&format!("removed row {index}"))?;
            }
            Command::Clear => {
                self.session.clear_points();
                self.success("cleared all rows")?;
            }
            Command::Load(path) => {
                let dataset = parse(&path)?;
                let rows = dataset.len();
                self.session.replace_points(dataset);
                self.success(&format!("loaded {rows} rows from {}", path.display()))?;
            }
            Command::Set(field, text) => {
                self.session.set_field(field, &text);
                self.show_input_status()?;
            }
            Command::CalculateR => {
                self.session.calculate_r()?;
                self.success(&format!(
                    "calculated r1 ^2 and r2 ^2 for {} rows, use 'phi' next",
                    self.session.dataset().len()
                ))?;
            }
            Command::CalculatePhi => {
                self.session.calculate_phi()?;
                self.success(&format!(
                    "calculated φ1 and φ2 for {} rows, use 'table' or 'plot' next",
                    self.session.dataset().len()
                ))?;
            }
            Command::Table => {
                let table = self.session.table()?;
                writeln!(self.output, "Original + Transformation Table:")?;
                write!(self.output, "{table}")?;
            }
            Command::Export(path) => {
                self.session.table()?.export(&path)?;
                self.success(&format!("wrote {}", path.display()))?;
            }
            Command::Plot => {
                let paths = render_plots(&self.session, &self.config.plot)?;
                for path in paths {
                    self.success(&format!("wrote {}", path.display()))?;
                }
                let excluded = self.session.dataset().unlabelled_rows();
                if excluded > 0 {
                    self.warning(&format!(
                        "{excluded} rows have a category other than 0 or 1 and were not plotted"
                    ))?;
                }
            }
            Command::Status => self.show_status()?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {}
        }

        Ok(())
    }

    fn show_status(&mut self) -> Result<()> {
        let state = self.session.state();
        let rows = self.session.dataset().len();
        writeln!(self.output, "step: {state}, rows: {rows}")?;
        self.show_input_status()?;

        let next = match state {
            State::AwaitingInput => "r",
            State::DistancesComputed => "phi",
            State::TransformComputed => "table, export or plot",
        };
        writeln!(self.output, "next: {next}")?;
        Ok(())
    }

    fn show_input_status(&mut self) -> Result<()> {
        let status = self.session.input_status();
        match status {
            InputStatus::Missing(_) => self.info(&status.message()),
            InputStatus::Invalid(_) => self.warning(&status.message()),
            InputStatus::Ready(_) => self.success(&status.message()),
        }
    }

    fn report(&mut self, err: &RbfError) -> Result<()> {
        match err {
            RbfError::MissingInput(prompt) => self.info(prompt),
            _ => self.warning(&err.to_string()),
        }
    }

    fn success(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "✓ {message}")?;
        Ok(())
    }

    fn info(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "ℹ {message}")?;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "✗ {message}")?;
        Ok(())
    }
}
