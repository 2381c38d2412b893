//! Rho command-line driver.

mod commands;
mod report;
mod tracing_setup;

use commands::{eval_text, parse_file, run_file, RunOptions};

fn main() {
    tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            let mut options = RunOptions::default();
            let mut path = None;
            for arg in args.iter().skip(2) {
                if let Some(depth) = arg.strip_prefix("--max-depth=") {
                    let Ok(depth) = depth.parse() else {
                        eprintln!("error: --max-depth expects a positive integer, got '{depth}'");
                        std::process::exit(1);
                    };
                    options.max_depth = Some(depth);
                } else if arg == "--quiet" || arg == "-q" {
                    options.quiet = true;
                } else if !arg.starts_with('-') && path.is_none() {
                    path = Some(arg.as_str());
                }
            }

            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: rho run <file.R> [--max-depth=N] [--quiet]");
                std::process::exit(1);
            };
            run_file(path, &options);
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: rho eval \"<source>\"");
                std::process::exit(1);
            }
            eval_text(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: rho parse <file.R>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Rho interpreter");
    println!();
    println!("Usage: rho <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Evaluate a source file, printing visible values");
    println!("  eval <source>    Evaluate source text given on the command line");
    println!("  parse <file>     Parse a file and print each statement back");
    println!("  help             Show this message");
    println!();
    println!("Run options:");
    println!("  --max-depth=N    Fail calls nested deeper than N");
    println!("  -q, --quiet      Discard printed output");
    println!();
    println!("Set RHO_LOG (e.g. RHO_LOG=rho_eval=debug) to trace evaluation.");
}
