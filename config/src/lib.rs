//! Settings for skip list instances, read from redis-style configuration files.
//!
//! ```text
//! # lanes maintained by every list built from this file
//! max-level 16
//! seed 42
//! loglevel verbose
//! logfile "/tmp/skiplist.log"
//! ```

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Error as IOError;
use std::path::Path;
use std::str::FromStr;

use logger::{Level, Logger};

/// Ceiling used when neither the caller nor a configuration file picks one.
pub const DEFAULT_MAX_LEVEL: usize = 24;

/// How deep `include` directives may nest.  Anything deeper is taken to be a cycle.
const MAX_INCLUDE_DEPTH: usize = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub max_level: usize,
    pub seed: Option<u64>,
    pub loglevel: Level,
    pub logfile: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat,
    InvalidParameter,
    IOError(IOError),
}

/// Splits a configuration line into arguments. Double and single quotes group
/// words; inside double quotes `\n`, `\r`, `\t`, `\\` and `\"` are unescaped.
fn splitargs(line: &str) -> Result<Vec<String>, ConfigError> {
    let mut result = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.peek().map_or(false, |c| c.is_whitespace()) {
            chars.next();
        }
        let quote = match chars.peek() {
            None => break,
            Some(&q) if q == '"' || q == '\'' => {
                chars.next();
                Some(q)
            }
            Some(_) => None,
        };

        let mut current = String::new();
        match quote {
            None => {
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    current.push(c);
                    chars.next();
                }
            }
            Some(q) => {
                let mut closed = false;
                while let Some(c) = chars.next() {
                    if c == q {
                        closed = true;
                        break;
                    }
                    if c == '\\' && q == '"' {
                        current.push(match chars.next() {
                            Some('n') => '\n',
                            Some('r') => '\r',
                            Some('t') => '\t',
                            Some(other) => other,
                            None => return Err(ConfigError::InvalidFormat),
                        });
                    } else {
                        current.push(c);
                    }
                }
                // closing quote must be followed by a space or nothing at all
                if !closed || chars.peek().map_or(false, |c| !c.is_whitespace()) {
                    return Err(ConfigError::InvalidFormat);
                }
            }
        }
        result.push(current);
    }
    Ok(result)
}

fn read_string(args: &[String]) -> Result<&str, ConfigError> {
    if args.len() != 2 {
        Err(ConfigError::InvalidFormat)
    } else {
        Ok(args[1].as_str())
    }
}

fn read_parse<T>(args: &[String]) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match read_string(args)?.parse() {
        Ok(f) => Ok(f),
        Err(_) => Err(ConfigError::InvalidParameter),
    }
}

impl Config {
    pub fn new() -> Config {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
            loglevel: Level::Notice,
            logfile: None,
        }
    }

    /// Applies every directive in `fname` on top of the current settings.
    pub fn parsefile(&mut self, fname: &str) -> Result<(), ConfigError> {
        self.parsefile_nested(fname, 0)
    }

    fn parsefile_nested(&mut self, fname: &str, depth: usize) -> Result<(), ConfigError> {
        if depth > MAX_INCLUDE_DEPTH {
            return Err(ConfigError::InvalidParameter);
        }
        let path = Path::new(fname);
        let file = BufReader::new(File::open(&path)?);
        for line in file.lines() {
            self.parseline(&line?, depth)?;
        }
        Ok(())
    }

    /// Applies every directive in `text` on top of the current settings.
    pub fn parse(&mut self, text: &str) -> Result<(), ConfigError> {
        for line in text.lines() {
            self.parseline(line, 0)?;
        }
        Ok(())
    }

    fn parseline(&mut self, line: &str, depth: usize) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let args = splitargs(line)?;
        match &*args[0].to_ascii_lowercase() {
            "max-level" => {
                let level: usize = read_parse(&args)?;
                if level == 0 {
                    return Err(ConfigError::InvalidParameter);
                }
                self.max_level = level;
            }
            "seed" => self.seed = Some(read_parse(&args)?),
            "loglevel" => {
                self.loglevel = match Level::from_name(read_string(&args)?) {
                    Some(level) => level,
                    None => return Err(ConfigError::InvalidParameter),
                }
            }
            "logfile" => {
                let path = read_string(&args)?;
                self.logfile = if path.is_empty() {
                    None
                } else {
                    Some(path.to_owned())
                };
            }
            "include" => {
                let path = read_string(&args)?.to_owned();
                self.parsefile_nested(&path, depth + 1)?;
            }
            _ => return Err(ConfigError::InvalidFormat),
        }
        Ok(())
    }

    /// Builds a logger honoring `loglevel` and `logfile`.
    pub fn logger(&self) -> io::Result<Logger> {
        match self.logfile {
            Some(ref path) => Logger::file(self.loglevel, path),
            None => Ok(Logger::new(self.loglevel)),
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

impl From<IOError> for ConfigError {
    fn from(e: IOError) -> ConfigError {
        ConfigError::IOError(e)
    }
}
