//! devcon - interactive debug console
//! Reads lines from stdin, dispatches them against a demo registry, and
//! prints captured log output

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;

use devcon::executor::dispatch;
use devcon::logger::{ConsoleLogger, SharedRecords};
use devcon::registry::{
    ArgumentDefinition, ArgumentType, ArgumentValue, CommandRegistry, ConsoleCommand,
};

fn build_registry(quit: Arc<AtomicBool>) -> CommandRegistry {
    CommandRegistry::new()
        .register(
            "echo",
            ConsoleCommand::new(
                |args| {
                    let Some(ArgumentValue::String(text)) = args.get("text") else {
                        return Err("missing text".to_string());
                    };
                    if matches!(args.get("shout"), Some(ArgumentValue::Flag(true))) {
                        println!("{}", text.to_uppercase());
                    } else {
                        println!("{text}");
                    }
                    Ok(())
                },
                vec![
                    ArgumentDefinition::new("text", ArgumentType::String),
                    ArgumentDefinition::new("shout", ArgumentType::Flag),
                ],
                "print a value back; --shout for uppercase",
            ),
        )
        .register(
            "add",
            ConsoleCommand::new(
                |args| {
                    match (args.get("lhs"), args.get("rhs")) {
                        (Some(ArgumentValue::Float64(a)), Some(ArgumentValue::Float64(b))) => {
                            println!("{}", a + b);
                            Ok(())
                        }
                        _ => Err("missing operand".to_string()),
                    }
                },
                vec![
                    ArgumentDefinition::new("lhs", ArgumentType::Float64),
                    ArgumentDefinition::new("rhs", ArgumentType::Float64),
                ],
                "add two numbers",
            ),
        )
        .register(
            "warn",
            ConsoleCommand::new(
                |args| {
                    if let Some(ArgumentValue::String(text)) = args.get("text") {
                        log::warn!("{text}");
                    }
                    Ok(())
                },
                vec![ArgumentDefinition::new("text", ArgumentType::String)],
                "emit a warning through the captured logger",
            ),
        )
        .register(
            "quit",
            ConsoleCommand::new(
                move |_| {
                    quit.store(true, Ordering::Relaxed);
                    Ok(())
                },
                Vec::new(),
                "leave the console",
            ),
        )
}

fn print_help(registry: &CommandRegistry) {
    println!("commands:");
    for name in registry.names() {
        if let Some(cmd) = registry.get(name) {
            println!("  {name:<12} {}", cmd.description());
        }
    }
    println!("  {:<12} show this list", "help");
}

/// Print log records captured since the last prompt
fn drain_records(records: &SharedRecords, seen: &mut usize) {
    let Ok(records) = records.read() else {
        return;
    };
    for record in records.iter().skip(*seen) {
        println!(
            "[{}:{}] {}",
            record.idx,
            record.level,
            record.text
        );
    }
    *seen = records.len();
}

fn main() -> anyhow::Result<()> {
    let records = ConsoleLogger::new()
        .install(log::LevelFilter::Debug)
        .context("failed to install console logger")?;
    let mut seen_records = 0;

    let quit = Arc::new(AtomicBool::new(false));
    let mut registry = build_registry(quit.clone());

    println!("devcon - type 'help' for commands, 'quit' to exit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            break; // EOF
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        if line.trim() == "help" {
            print_help(&registry);
            continue;
        }

        if let Err(err) = dispatch(&mut registry, line) {
            eprintln!("{err}");
        }
        drain_records(&records, &mut seen_records);

        if quit.load(Ordering::Relaxed) {
            break;
        }
    }

    Ok(())
}
