use crate::runner::{self, RunOptions};
use crate::value::Value;
use std::io::{self, BufRead, Write};

/// Line-at-a-time calculator. Each line is an independent expression;
/// `:tokens` and `:tree` toggle the diagnostic dumps.
pub fn start(mut opts: RunOptions) {
    println!("expressive {}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let line = match lines.next() {
            None => {
                println!();
                break;
            }
            Some(Ok(line)) => line,
            Some(Err(error)) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        };

        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            ":tokens" => {
                opts.show_tokens = !opts.show_tokens;
                println!("token dump {}", if opts.show_tokens { "on" } else { "off" });
            }
            ":tree" => {
                opts.show_tree = !opts.show_tree;
                println!("tree dump {}", if opts.show_tree { "on" } else { "off" });
            }
            source => match runner::evaluate_verbose(source, &opts) {
                Ok(value) => println!("{}", Value(value)),
                Err(error) => error.report(source, Some("<repl>")),
            },
        }
    }
}
