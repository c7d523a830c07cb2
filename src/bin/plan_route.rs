use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use route_planner::{CLIArgs, Error};

/// Whitespace separated tokens from a reader, read lazily line by line.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self
                .reader
                .read_line(&mut line)
                .context("Failed to read from standard input.")?
                == 0
            {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }

        Ok(self.pending.pop_front())
    }
}

fn prompt<R: BufRead>(tokens: &mut Tokens<R>, text: &str) -> Result<String> {
    print!("{}", text);
    io::stdout().flush().context("Failed to flush standard output.")?;
    tokens
        .next_token()?
        .ok_or_else(|| anyhow!("No input given for prompt({}).", text.trim_end()))
}

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let planner = match &args.map {
        Some(path) => route_planner::read_map(path).with_context(|| {
            format!("Failed to read travel map from given file({}).", path.display())
        })?,
        None => route_planner::demo_map(),
    };

    println!("{}", planner);

    let mut tokens = Tokens::new(io::stdin().lock());
    let origin = match args.origin {
        Some(origin) => origin,
        None => prompt(&mut tokens, "Enter start location: ")?,
    };
    let destination = match args.destination {
        Some(destination) => destination,
        None => prompt(&mut tokens, "Enter destination location: ")?,
    };

    let route = match planner.shortest_path(&origin, &destination) {
        Ok(route) => route,
        Err(e @ Error::Unreachable { .. }) => {
            eprintln!("{}", e);
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to find shortest path from {} to {}.",
                    origin, destination
                )
            })
        }
    };

    println!("Shortest path from {} to {}:", origin, destination);
    for loc in route.path() {
        print!("{} -> ", loc);
    }
    println!();
    println!("Total travel cost: {} miles", route.cost());

    Ok(())
}
