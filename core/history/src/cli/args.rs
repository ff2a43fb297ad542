use crate::domain::{Command, NewMovie};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::ffi::OsString;

pub const BIN_NAME: &str = "movie-history";

/// CLI から受け取った設定
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// -d/--home-dir（指定時は環境変数より優先）
    pub home_dir: Option<String>,
    pub command: Command,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_dir: None,
            command: Command::List,
        }
    }
}

/// 解析結果: 通常の Config・補完スクリプト生成・サブコマンドのヘルプ文
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
    /// `add -h` など（そのまま標準出力へ）
    Display(String),
}

/// disable_help_flag はサブコマンドにも伝播するため、-h/--help は global の自前フラグで受ける
fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("home-dir")
                .short('d')
                .long("home-dir")
                .value_name("directory")
                .help("Directory holding storage.json and logs (overrides MOVIE_HISTORY_HOME)")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn text_arg(name: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(name)
        .long(name)
        .value_name(name)
        .help(help)
        .num_args(1)
}

fn build_add_subcommand() -> clap::Command {
    clap::Command::new("add")
        .about("Add a movie to the history (no-op if the id is already present)")
        .arg(clap::Arg::new("id").required_unless_present("help").value_name("id"))
        .arg(text_arg("title", "Movie title"))
        .arg(text_arg("year", "Release year"))
        .arg(text_arg("poster", "Poster image path or URL"))
        .arg(text_arg("cover", "Cover image, used when no poster is given"))
}

pub(crate) fn build_clap_command() -> clap::Command {
    global_args(
        clap::Command::new(BIN_NAME)
            .bin_name(BIN_NAME)
            .about("Recently viewed movies, kept in a local key-value store")
            .subcommand_required(false)
            .disable_help_subcommand(true)
            .subcommand(clap::Command::new("list").about("List the history (default)"))
            .subcommand(clap::Command::new("help").about("Display this help message"))
            .subcommand(build_add_subcommand())
            .subcommand(
                clap::Command::new("remove")
                    .about("Remove a movie from the history")
                    .arg(clap::Arg::new("id").required_unless_present("help").value_name("id")),
            )
            .subcommand(
                clap::Command::new("prune")
                    .about("Remove movies older than the retention window")
                    .arg(
                        clap::Arg::new("days")
                            .long("days")
                            .value_name("days")
                            .help("Retention window in days (default: MOVIE_HISTORY_RETENTION_DAYS or 30)")
                            .value_parser(value_parser!(u32).range(1..))
                            .num_args(1),
                    ),
            )
            .subcommand(clap::Command::new("clear").about("Remove every movie from the history")),
    )
}

fn string_arg(m: &clap::ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name).cloned()
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    let help = matches.get_flag("help") || matches.subcommand_matches("help").is_some();
    let home_dir = string_arg(matches, "home-dir");

    let command = match matches.subcommand() {
        _ if help => Command::Help,
        None | Some(("list", _)) => Command::List,
        Some(("add", m)) => Command::Add(NewMovie {
            id: string_arg(m, "id").unwrap_or_default(),
            title: string_arg(m, "title"),
            year: string_arg(m, "year"),
            poster: string_arg(m, "poster"),
            cover: string_arg(m, "cover"),
        }),
        Some(("remove", m)) => Command::Remove {
            id: string_arg(m, "id").unwrap_or_default(),
        },
        Some(("prune", m)) => Command::Prune {
            days: m.get_one::<u32>("days").copied(),
        },
        Some(("clear", _)) => Command::Clear,
        Some((name, _)) => {
            return Err(Error::invalid_argument(format!(
                "Command '{}' is not implemented.",
                name
            )))
        }
    };

    Ok(Config {
        home_dir,
        command,
    })
}

/// 引数列を解析する（先頭はプログラム名）。
pub fn parse_args_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| {
            let msg = e.to_string();
            Error::invalid_argument(msg.trim_start_matches("error: ").trim_end())
        })?;

    if let Some((name, sub)) = matches.subcommand() {
        if name != "help" && sub.get_flag("help") {
            return Ok(ParseOutcome::Display(render_subcommand_help(name)));
        }
    }

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)?))
}

/// 組み立て済みのコマンドからサブコマンドのヘルプ文を作る（global 引数と usage の親名を反映）
fn render_subcommand_help(name: &str) -> String {
    let mut cmd = build_clap_command();
    cmd.build();
    match cmd.find_subcommand_mut(name) {
        Some(sub) => sub.render_help().to_string(),
        None => cmd.render_help().to_string(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args_os())
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec![BIN_NAME];
        argv.extend_from_slice(args);
        match parse_args_from(argv).unwrap() {
            ParseOutcome::Config(c) => c,
            other => panic!("expected config, got {:?}", other),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.home_dir, None);
        assert_eq!(config.command, Command::List);
    }

    #[test]
    fn test_no_command_is_list() {
        assert_eq!(config(&[]).command, Command::List);
        assert_eq!(config(&["list"]).command, Command::List);
    }

    #[test]
    fn test_help_flag_and_subcommand() {
        assert_eq!(config(&["-h"]).command, Command::Help);
        assert_eq!(config(&["help"]).command, Command::Help);
    }

    #[test]
    fn test_parse_add_with_options() {
        let c = config(&["add", "301", "--title", "The Matrix", "--year", "1999", "--cover", "m.jpg"]);
        assert_eq!(
            c.command,
            Command::Add(NewMovie::new("301").title("The Matrix").year("1999").cover("m.jpg"))
        );
    }

    #[test]
    fn test_parse_remove_and_clear() {
        assert_eq!(
            config(&["remove", "301"]).command,
            Command::Remove { id: "301".to_string() }
        );
        assert_eq!(config(&["clear"]).command, Command::Clear);
    }

    #[test]
    fn test_parse_prune_days() {
        assert_eq!(config(&["prune"]).command, Command::Prune { days: None });
        assert_eq!(
            config(&["prune", "--days", "7"]).command,
            Command::Prune { days: Some(7) }
        );
    }

    #[test]
    fn test_prune_zero_days_is_usage_error() {
        let err = parse_args_from([BIN_NAME, "prune", "--days", "0"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_add_without_id_is_usage_error() {
        let err = parse_args_from([BIN_NAME, "add"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_home_dir_before_or_after_subcommand() {
        assert_eq!(config(&["-d", "/tmp/mh", "list"]).home_dir.as_deref(), Some("/tmp/mh"));
        assert_eq!(config(&["clear", "--home-dir", "/tmp/mh"]).home_dir.as_deref(), Some("/tmp/mh"));
    }

    #[test]
    fn test_generate_completion() {
        match parse_args_from([BIN_NAME, "--generate", "bash"]).unwrap() {
            ParseOutcome::GenerateCompletion(shell) => assert_eq!(shell, Shell::Bash),
            other => panic!("expected completion, got {:?}", other),
        }
    }

    fn display(args: &[&str]) -> String {
        let mut argv = vec![BIN_NAME];
        argv.extend_from_slice(args);
        match parse_args_from(argv).unwrap() {
            ParseOutcome::Display(text) => text,
            other => panic!("expected display, got {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_help_is_display() {
        let text = display(&["add", "--help"]);
        assert!(text.contains("--title"));
        assert!(text.contains("movie-history add"));
        assert!(display(&["add", "-h"]).contains("--cover"));
        assert!(display(&["prune", "--help"]).contains("--days"));
        assert!(display(&["clear", "-h"]).contains("Remove every movie"));
    }

    #[test]
    fn test_subcommand_help_skips_required_args() {
        // id 未指定でも -h はヘルプ表示（usage エラーにしない）
        assert!(display(&["remove", "--help"]).contains("Remove a movie"));
    }

    #[test]
    fn test_help_subcommand_with_flag_is_top_level_help() {
        assert_eq!(config(&["help", "-h"]).command, Command::Help);
    }
}
