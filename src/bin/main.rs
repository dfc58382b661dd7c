use bishop::{Bayes, BayesConfig, BayesError};
use crossterm::style::Stylize;
use std::collections::BTreeMap;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_PATH: &str = "bayesdata.json";
const CONFIG_PATH: &str = "bishop.toml";

fn main() -> bishop::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let data_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
    let config = if Path::new(CONFIG_PATH).exists() {
        BayesConfig::from_file(Path::new(CONFIG_PATH))?
    } else {
        BayesConfig::default()
    };
    let mut engine = Bayes::load_or_new(&data_path, &config)?;

    println!("{}", "Bishop classifier shell. Type 'help' for commands.".bold());
    println!("Data file: {}", data_path.display());

    prompt()?;
    for line in stdin().lock().lines() {
        let line = line?;
        let (command, rest) = split_command(line.trim());
        match command {
            "" => {}
            "exit" | "quit" => break,
            "help" => print_help(),
            _ => {
                if let Err(e) = run(&mut engine, command, rest) {
                    eprintln!("{} {}", "[ERROR]".red(), e);
                }
            }
        }
        prompt()?;
    }

    println!("\nSaving classifier...");
    if let Err(e) = engine.commit() {
        eprintln!("{} Could not save: {}", "[ERROR]".red(), e);
    } else {
        println!("Saved to '{}'", data_path.display());
    }
    Ok(())
}

fn run(engine: &mut Bayes, command: &str, rest: &str) -> bishop::Result<()> {
    match command {
        "train" => {
            let (pool, text) = split_command(rest);
            engine.train(pool, text)?;
            println!("trained '{}'", pool);
        }
        "untrain" => {
            let (pool, text) = split_command(rest);
            engine.untrain(pool, text)?;
            println!("untrained '{}'", pool);
        }
        "guess" => print_guess(&engine.guess(rest)),
        "pools" => {
            for pool in engine.pools() {
                println!("  {} (trained {} times)", pool, pool.train_count());
            }
        }
        "new" => {
            engine.new_pool(rest)?;
        }
        "remove" => {
            engine.remove_pool(rest);
        }
        "rename" => {
            let (old, new) = split_command(rest);
            engine.rename_pool(old, new)?;
        }
        "merge" => {
            let (dest, source) = split_command(rest);
            engine.merge_pools(dest, source)?;
        }
        "stop" => engine.add_stop_words(rest.split_whitespace()),
        "save" => engine.commit()?,
        other => {
            return Err(BayesError::InvalidInput {
                reason: format!("unknown command '{other}'"),
            })
        }
    }
    Ok(())
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    }
}

fn print_guess(guess: &BTreeMap<String, f64>) {
    if guess.is_empty() {
        println!("{}", "No pool recognises this text.".yellow());
        return;
    }
    let mut ranked: Vec<(&String, &f64)> = guess.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(a.1));
    for (i, (pool, prob)) in ranked.into_iter().enumerate() {
        let line = format!("  {:<20} {:.4}", pool, prob);
        if i == 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

fn print_help() {
    println!("  train <pool> <text>     add text to a pool");
    println!("  untrain <pool> <text>   remove text from a pool");
    println!("  guess <text>            score text against every pool");
    println!("  pools                   list pools");
    println!("  new <pool> | remove <pool> | rename <old> <new> | merge <dest> <source>");
    println!("  stop <words>            add stop words");
    println!("  save | exit");
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    stdout().flush()
}
