use std::process;

use clap::Parser;
use mgl_cli::{Answer, App, Command};
use mgl_core::{DecisionTable, Relation};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = App::parse();
    tracing::debug!(command = ?app.command, json = app.json, "running");

    match &app.command {
        Command::Table(args) => table(Relation::from(args.relation.clone()), app.json),
        Command::Schema => schema(),
        command => {
            let Some(answer) = Answer::from_command(command) else {
                unreachable!("every query command has an answer");
            };
            if app.json {
                print_json(&answer);
            } else if answer.is_failure() {
                eprintln!("{answer}");
            } else {
                println!("{answer}");
            }
            if answer.is_failure() {
                process::exit(1);
            }
        }
    }
}

fn table(relation: Relation, json: bool) {
    let table = DecisionTable::new(relation);
    if json {
        print_json(&table);
    } else {
        println!("{relation}");
        print!("{table}");
    }
}

fn schema() {
    let schema = schemars::schema_for!(Answer);
    let rendered = serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
        eprintln!("Failed to render schema: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn print_json<T: Serialize>(value: &T) {
    let rendered = serde_json::to_string(value).unwrap_or_else(|e| {
        eprintln!("Failed to serialize answer: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}
