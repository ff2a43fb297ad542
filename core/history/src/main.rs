mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;

use cli::{parse_args, print_completion, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::movie::format_added_at;
use domain::{Command, MovieRecord};
use ports::inbound::UseCaseRunner;
use wiring::{wire_app, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&mut self, command: Command) -> Result<i32, Error> {
        let store = &mut self.app.store;
        // clear は既存の内容を読まずに上書きする（壊れた保存値からも復旧できる）
        if !matches!(command, Command::Help | Command::Clear) {
            store.load()?;
        }
        match command {
            Command::Help => print_help(),
            Command::List => print_records(store.records()),
            Command::Add(movie) => store.add(movie)?,
            Command::Remove { id } => store.remove(&id)?,
            Command::Prune { days } => {
                store.prune_older_than(days.unwrap_or(self.app.retention_days))?
            }
            Command::Clear => store.clear()?,
        }
        Ok(0)
    }
}

fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(config) => config,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
        ParseOutcome::Display(text) => {
            println!("{}", text.trim_end());
            return Ok(0);
        }
    };

    let app = wire_app(config.home_dir.as_deref())?;
    let logger = std::sync::Arc::clone(&app.logger);
    let command_name = config.command.name();
    let _ = logger.log(
        &LogRecord::new(LogLevel::Info, "command started", "cli", "lifecycle")
            .field("command", command_name)
            .field("home_dir", app.home_dir.display().to_string()),
    );

    let mut runner = Runner { app };
    let result = runner.run(config.command);
    let record = match &result {
        Ok(code) => LogRecord::new(LogLevel::Info, "command finished", "cli", "lifecycle")
            .field("command", command_name)
            .field("exit_code", *code),
        Err(e) => LogRecord::new(LogLevel::Error, e.to_string(), "cli", "error")
            .field("command", command_name)
            .field("exit_code", e.exit_code()),
    };
    let _ = logger.log(&record);
    result
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", error_report(&e));
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_records(records: &[MovieRecord]) {
    if records.is_empty() {
        println!("No movies in history.");
        return;
    }
    for r in records {
        let year = if r.year.is_empty() { "-" } else { r.year.as_str() };
        println!("{}\t{}\t{}\t{}", r.id, year, r.title, format_added_at(&r.added_at));
    }
}

/// stderr に出すエラー表示。clap 由来の usage エラーは本文に Usage 行を含む。
fn error_report(e: &Error) -> String {
    format!("movie-history: {}", e)
}

fn print_help() {
    println!("Usage: movie-history [-h] [-d|--home-dir directory] [<command> [args...]]");
    println!("  -h, --help            Display this help message.");
    println!("  -d, --home-dir        Directory holding storage.json and logs (overrides MOVIE_HISTORY_HOME).");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!("  <command>             Command to execute. Omit to list the history.");
    println!();
    println!("Environment:");
    println!("  MOVIE_HISTORY_HOME             Home directory. Default: $XDG_CONFIG_HOME/movie-history or ~/.config/movie-history.");
    println!("  MOVIE_HISTORY_RETENTION_DAYS   Default window for prune, in days. Default: 30.");
    println!();
    println!("Commands:");
    println!("  list                           List the history, oldest first.");
    println!("  add <id> [--title T] [--year Y] [--poster P] [--cover C]");
    println!("                                 Add a movie. Ignored if the id is already present.");
    println!("  remove <id>                    Remove a movie.");
    println!("  prune [--days N]               Remove movies added N or more days ago.");
    println!("  clear                          Remove every movie.");
}
