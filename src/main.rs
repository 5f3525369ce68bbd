use std::path::PathBuf;

use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use memento::{
    default_history_files, due_cards, generate_cards, load_cards, merge_cards, parse_history,
    save_cards, Card, Config,
};

#[derive(Parser, Debug)]
#[command(name = "memento")]
#[command(author, version, about = "Shell history for your brain")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse bash/zsh history and generate/update cards
    Ingest {
        /// History file(s) to read instead of ~/.zsh_history and ~/.bash_history
        #[arg(long)]
        history: Vec<PathBuf>,
    },

    /// Daily review session (Leitner boxes)
    Review,

    /// Print the card collection
    List {
        /// Only cards due now
        #[arg(long)]
        due: bool,

        /// Only cards carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Collection statistics: cards per box, due counts
    Stats,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();
    let config = Config::load();

    let result = match args.command {
        Command::Ingest { history } => cmd_ingest(&config, history),
        Command::Review => cmd_review(&config),
        Command::List { due, tag } => cmd_list(due, tag.as_deref()),
        Command::Stats => cmd_stats(),
        Command::Completion { shell } => {
            let mut cmd = Args::command();
            clap_complete::generate(shell, &mut cmd, "memento", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn history_files(config: &Config, overrides: Vec<PathBuf>) -> Vec<PathBuf> {
    if !overrides.is_empty() {
        return overrides;
    }
    if !config.ingest.history_files.is_empty() {
        return config.ingest.history_files.clone();
    }
    default_history_files()
}

fn cmd_ingest(config: &Config, history: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let paths = history_files(config, history);
    if paths.is_empty() {
        eprintln!("{}", "No history files found.".yellow());
        return Ok(());
    }

    let mut cards = load_cards()?;
    let events = parse_history(&paths);
    let fresh = generate_cards(&events, &mut cards, Utc::now());

    if fresh.is_empty() {
        // seen_count bumps on existing cards still deserve a save
        save_cards(&cards)?;
        println!("No new tricky commands found. You're a wizard.");
        return Ok(());
    }

    let new_count = fresh.len();
    let cards = merge_cards(cards, fresh);
    save_cards(&cards)?;
    println!(
        "Ingested {} new cards. Total: {}",
        new_count.to_string().green().bold(),
        cards.len()
    );
    Ok(())
}

fn cmd_review(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let cards = load_cards()?;
    memento::tui::run(&cards, config.intervals())
}

fn cmd_list(due_only: bool, tag: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let cards = load_cards()?;
    let now = Utc::now();

    let selected: Vec<&Card> = cards
        .iter()
        .filter(|c| !due_only || c.due(now))
        .filter(|c| match tag {
            Some(t) => c.tags.iter().any(|ct| ct == t),
            None => true,
        })
        .collect();

    if selected.is_empty() {
        println!("No cards.");
        return Ok(());
    }

    for card in selected {
        let box_label = format!("[{}]", card.box_level);
        let colored_box = match card.box_level {
            1 => box_label.red(),
            2 | 3 => box_label.yellow(),
            _ => box_label.green(),
        };
        let due_label = if card.due(now) {
            "due".red().to_string()
        } else {
            card.next_due.format("%Y-%m-%d").to_string()
        };
        println!(
            "{} {:<10} seen:{:<3} {}",
            colored_box, due_label, card.seen_count, card.prompt
        );
    }
    Ok(())
}

fn cmd_stats() -> Result<(), Box<dyn std::error::Error>> {
    let cards = load_cards()?;
    let now = Utc::now();

    let mut per_box = [0usize; 5];
    let mut reviews = 0u64;
    for card in &cards {
        let idx = (card.box_level.clamp(1, 5) - 1) as usize;
        per_box[idx] += 1;
        reviews += u64::from(card.times_seen);
    }
    let due = due_cards(&cards, now).len();

    println!("{}", "Collection".bold());
    println!("  cards:   {}", cards.len());
    println!("  due now: {}", due);
    println!("  reviews: {}", reviews);
    println!("{}", "Boxes".bold());
    for (i, count) in per_box.iter().enumerate() {
        println!("  box {}:   {}", i + 1, count);
    }
    Ok(())
}
