#[macro_use]
extern crate logger;

use std::env::args;
use std::io::{stdin, stdout, BufRead, Write};
use std::process::exit;

use config::Config;
use logger::{Level, Logger};
use skiplist::{compare, SkipList};

type Order = fn(&String, &String) -> bool;
type Strings = SkipList<String, String, Order>;

/// Runs one command line against `list`, returning the reply.
fn execute(list: &mut Strings, logger: &Logger, args: &[&str]) -> String {
    match args {
        ["set", key, value] => {
            list.set(key.to_string(), value.to_string());
            "OK".to_owned()
        }
        ["get", key] => match list.get_value(&key.to_string()) {
            Some(value) => value.clone(),
            None => "(nil)".to_owned(),
        },
        ["del", key] => match list.remove(&key.to_string()) {
            Some(_) => "1".to_owned(),
            None => "0".to_owned(),
        },
        ["len"] => list.len().to_string(),
        ["front"] => match list.front() {
            Some(element) => format!("{} {}", element.key(), element.value),
            None => "(nil)".to_owned(),
        },
        ["keys"] => list.keys().cloned().collect::<Vec<_>>().join(" "),
        ["lanes"] => list.debug_structure(),
        ["maxlevel"] => list.max_level().to_string(),
        ["maxlevel", level] => match level.parse::<usize>() {
            Ok(level) if level > 0 => list.set_max_level(level).to_string(),
            _ => "ERR max level must be a positive integer".to_owned(),
        },
        ["init"] => {
            list.init();
            "OK".to_owned()
        }
        _ => {
            log!(logger, Verbose, "unknown command {:?}", args);
            "ERR unknown command".to_owned()
        }
    }
}

fn main() {
    let mut config = Config::new();
    if let Some(f) = args().nth(1) {
        if let Err(e) = config.parsefile(&f) {
            let logger = Logger::new_err(Level::Warning);
            log!(logger, Warning, "Failed to read {}: {:?}", f, e);
            exit(1);
        }
    }

    let logger = match config.logger() {
        Ok(logger) => logger,
        Err(e) => {
            let logger = Logger::new_err(Level::Warning);
            log!(logger, Warning, "Failed to open log file: {}", e);
            exit(1);
        }
    };

    let mut list: Strings = SkipList::with_config(compare::string as Order, &config);
    list.set_logger(logger.clone());
    log!(logger, Notice, "skiplist ready, {} lanes", list.max_level());

    let stdin = stdin();
    let stdout = stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log!(logger, Warning, "Failed to read command: {}", e);
                break;
            }
        };
        let args: Vec<&str> = line.split_whitespace().collect();
        if args.is_empty() {
            continue;
        }
        let reply = execute(&mut list, &logger, &args);
        if writeln!(out, "{}", reply).is_err() {
            break;
        }
    }
}
