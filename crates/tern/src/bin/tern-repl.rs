use std::{
    io::{self, Write},
    process::ExitCode,
};

use tern::{Context, evaluate_blocking, parse, stringify};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        // File execution mode
        let path = &args[1];
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {path}: {e}");
                return ExitCode::FAILURE;
            }
        };
        let context = Context::new();
        return match parse(&source).and_then(|program| evaluate_blocking(&program, &context)) {
            Ok(value) => {
                if !value.is_nothing() {
                    println!("{}", stringify(&value));
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    // Interactive mode: one expression per line, bindings persist across
    // lines through a shared context.
    let context = Context::new();
    loop {
        let Some(line) = read_line("> ") else {
            println!();
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line).and_then(|program| evaluate_blocking(&program, &context)) {
            Ok(value) => {
                if !value.is_nothing() {
                    println!("{}", stringify(&value));
                }
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    ExitCode::SUCCESS
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_owned()),
        Err(_) => None,
    }
}
