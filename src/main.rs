use clap::{value_parser, Arg, ArgAction, Command};
use expressive::{repl, runner, RunOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;

const DEFAULT_OUTPUT: &str = "output.txt";

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn cli() -> Command {
    Command::new("expressive")
        .about("Evaluates arithmetic expressions, one at a time or a file of them")
        .arg(
            Arg::new("input")
                .help("An expression, or a file with one expression per line")
                .value_name("INPUT")
                .allow_hyphen_values(true)
                .index(1),
        )
        .arg(
            Arg::new("expr")
                .short('e')
                .long("expr")
                .help("Evaluate this expression even if a file of the same name exists")
                .value_name("EXPR")
                .allow_hyphen_values(true)
                .conflicts_with("input"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Where batch results are written")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .help("Decimal places per result in batch output")
                .value_name("N")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Worker threads for batch evaluation")
                .value_name("N")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token table before the result")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .help("Print the expression tree before the result")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    init_tracing();
    let matches = cli().get_matches();

    let defaults = RunOptions::default();
    let opts = RunOptions {
        show_tokens: matches.get_flag("tokens"),
        show_tree: matches.get_flag("tree"),
        precision: matches.get_one::<usize>("precision").copied().unwrap_or(defaults.precision),
    };

    if let Some(&jobs) = matches.get_one::<usize>("jobs") {
        if let Err(error) = rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global() {
            warn!(%error, "could not configure worker threads");
        }
    }

    if let Some(source) = matches.get_one::<String>("expr") {
        return exit_code(runner::run(source, None, &opts));
    }

    match matches.get_one::<String>("input") {
        Some(input) if !matches.get_flag("interactive") => {
            let path = Path::new(input);
            if path.is_file() {
                let output = matches
                    .get_one::<PathBuf>("output")
                    .map_or(Path::new(DEFAULT_OUTPUT), PathBuf::as_path);
                run_file(path, output, &opts)
            } else {
                exit_code(runner::run(input, None, &opts))
            }
        }
        _ => {
            repl::start(opts);
            ExitCode::SUCCESS
        }
    }
}

fn run_file(path: &Path, output: &Path, opts: &RunOptions) -> ExitCode {
    match runner::process_file(path, output, opts) {
        Ok(report) => exit_code(report.failures == 0),
        Err(e) => {
            eprintln!("Error processing '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_options_fall_back_to_shared_defaults() {
        let matches = cli().try_get_matches_from(["expressive", "1 + 2"]).unwrap();

        assert_eq!(
            matches.get_one::<PathBuf>("output").map(PathBuf::as_path),
            Some(Path::new(DEFAULT_OUTPUT))
        );
        assert_eq!(matches.get_one::<usize>("precision"), None);
        assert_eq!(RunOptions::default().precision, 6);
    }
}
