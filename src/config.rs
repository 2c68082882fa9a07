use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::ScreenSize;
use crate::seeding::DEFAULT_DENSITY_WEIGHT;
use crate::world;

pub const USAGE: &str = "\
Brian's Brain

Usage: briansbrain [OPTIONS]

Options:
      --width <N>            Grid width in cells [default: 300]
      --height <N>           Grid height in cells [default: 300]
      --cell-size <N>        Terminal cells per automaton cell [default: 2]
      --line-width <N>       Gap between cells, smaller than the cell size [default: 1]
      --density-weight <N>   A cell starts firing when a random digit 0-9 exceeds this weight,
                             so it fires with probability (9 - N) / 10 [default: 7]
      --step-delay-ms <MS>   Delay between generations [default: 100]
      --seed <N>             Seed for the initial population [default: random]
      --blank                Start with every cell ready
      --generations <N>      Stop after N generations
      --log-file <PATH>      Write logs to PATH. Filter with RUST_LOG
  -h, --help                 Print help

Press any key to quit.
";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown option \"{0}\"")]
    UnknownOption(String),

    #[error("Option \"--{0}\" requires a value")]
    MissingValue(&'static str),

    #[error("Invalid value \"{value}\" for \"--{option}\"")]
    InvalidValue { option: &'static str, value: String },

    #[error("{0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub cell_size: ScreenSize,
    pub line_width: ScreenSize,
    pub density_weight: i32,
    pub step_delay: Duration,

    /// `None` picks a random seed
    pub seed: Option<u64>,

    /// Seed the world randomly, instead of all `Ready`
    pub randomize: bool,

    pub max_generations: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            cell_size: 2,
            line_width: 1,
            density_weight: DEFAULT_DENSITY_WEIGHT,
            step_delay: Duration::from_millis(100),
            seed: None,
            randomize: true,
            max_generations: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("The grid must be at least 1x1"));
        }

        if world::cell_count(self.width, self.height).is_err() {
            return Err(ConfigError::Invalid("The grid is too large"));
        }

        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("The cell size must be at least 1"));
        }

        if self.line_width >= self.cell_size {
            return Err(ConfigError::Invalid(
                "The line width must be smaller than the cell size",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
}

impl Command {
    /// Parse command line arguments, not including the program name. Options take their value
    /// either as the next argument or after an `=`.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let (name, inline) = match arg.split_once('=') {
                Some((name, value)) => (name.to_owned(), Some(value.to_owned())),
                None => (arg, None),
            };

            match name.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--blank" => {
                    config.randomize = false;
                    continue;
                }
                _ => {}
            }

            let option = match name.as_str() {
                "--width" => "width",
                "--height" => "height",
                "--cell-size" => "cell-size",
                "--line-width" => "line-width",
                "--density-weight" => "density-weight",
                "--step-delay-ms" => "step-delay-ms",
                "--seed" => "seed",
                "--generations" => "generations",
                "--log-file" => "log-file",
                _ => return Err(ConfigError::UnknownOption(name)),
            };

            let value = match inline {
                Some(value) => value,
                None => args.next().ok_or(ConfigError::MissingValue(option))?,
            };

            match option {
                "width" => config.width = parse(option, &value)?,
                "height" => config.height = parse(option, &value)?,
                "cell-size" => config.cell_size = parse(option, &value)?,
                "line-width" => config.line_width = parse(option, &value)?,
                "density-weight" => config.density_weight = parse(option, &value)?,
                "step-delay-ms" => {
                    config.step_delay = Duration::from_millis(parse(option, &value)?);
                }
                "seed" => config.seed = Some(parse(option, &value)?),
                "generations" => config.max_generations = Some(parse(option, &value)?),
                "log-file" => config.log_file = Some(PathBuf::from(value)),
                _ => unreachable!("every option name was matched above"),
            }
        }

        config.validate()?;

        Ok(Command::Run(config))
    }
}

fn parse<T: FromStr>(option: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        option,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::Command;
    use super::Config;
    use super::ConfigError;

    fn parse(args: &[&str]) -> Result<Command, ConfigError> {
        Command::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]), Ok(Command::Run(Config::default())));

        let config = Config::default();
        assert_eq!((config.width, config.height), (300, 300));
        assert_eq!(config.density_weight, 7);
        assert_eq!(config.step_delay, Duration::from_millis(100));
        assert!(config.randomize);
    }

    #[test]
    fn every_option() {
        let cmd = parse(&[
            "--width",
            "80",
            "--height=40",
            "--cell-size",
            "1",
            "--line-width=0",
            "--density-weight",
            "-1",
            "--step-delay-ms",
            "16",
            "--seed=42",
            "--blank",
            "--generations",
            "500",
            "--log-file",
            "brain.log",
        ])
        .unwrap();

        let expected = Config {
            width: 80,
            height: 40,
            cell_size: 1,
            line_width: 0,
            density_weight: -1,
            step_delay: Duration::from_millis(16),
            seed: Some(42),
            randomize: false,
            max_generations: Some(500),
            log_file: Some(PathBuf::from("brain.log")),
        };

        assert_eq!(cmd, Command::Run(expected));
    }

    #[test]
    fn help() {
        assert_eq!(parse(&["--width", "5", "-h"]), Ok(Command::Help));
        assert_eq!(parse(&["--help"]), Ok(Command::Help));
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse(&["--depth", "3"]),
            Err(ConfigError::UnknownOption("--depth".to_owned()))
        );
        assert_eq!(
            parse(&["--width"]),
            Err(ConfigError::MissingValue("width"))
        );
        assert_eq!(
            parse(&["--seed", "abc"]),
            Err(ConfigError::InvalidValue {
                option: "seed",
                value: "abc".to_owned()
            })
        );
        assert_eq!(
            parse(&["--cell-size=-2"]).unwrap_err().to_string(),
            "Invalid value \"-2\" for \"--cell-size\""
        );
    }

    #[test]
    fn validation() {
        assert!(matches!(
            parse(&["--width", "0"]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse(&["--cell-size", "1"]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse(&["--cell-size", "0", "--line-width", "0"]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(parse(&["--cell-size", "3", "--line-width", "2"]).is_ok());
    }

    #[test]
    fn oversized_grid() {
        let too_large = Err(ConfigError::Invalid("The grid is too large"));

        assert_eq!(
            parse(&["--width", "4294967296", "--height", "4294967296"]),
            too_large
        );
        assert_eq!(
            parse(&["--width", &usize::MAX.to_string(), "--height", "2"]),
            too_large
        );
        assert_eq!(parse(&["--width", "100000", "--height", "100000"]), too_large);
        assert!(parse(&["--width", "10000", "--height", "10000"]).is_ok());
    }
}
