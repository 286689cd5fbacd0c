use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catdeck", version, about = "Generate poker decks with AI cat portrait faces")]
struct Cli {
    /// API key for the image-generation service
    /// (falls back to the CATDECK_API_KEY environment variable)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Seed the card draws for reproducible hands
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Deal a hand of three cards with generated portraits
    Hand,
    /// Draw one additional card onto a small hand
    Draw,
    /// Build the full 52-card deck (sixteen portraits, pip number cards)
    Deck,
    /// Build the full deck and write the rendered sheet to a file
    Export {
        /// Output path for the sheet raster
        #[arg(long, default_value = "deck.ppm")]
        out: PathBuf,
    },
}

#[cfg(feature = "http")]
fn run(cli: Cli) -> anyhow::Result<()> {
    use catdeck::studio::Studio;
    use catdeck::{Artwork, GeneratorConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let api_key = match cli.api_key.or_else(|| std::env::var("CATDECK_API_KEY").ok()) {
        Some(key) if !key.is_empty() => key,
        _ => anyhow::bail!("no API key: pass --api-key or set CATDECK_API_KEY"),
    };

    let generator = catdeck::new_generator(GeneratorConfig { api_key, ..Default::default() })?;
    let mut studio = match cli.seed {
        Some(seed) => Studio::with_rng(generator, StdRng::seed_from_u64(seed)),
        None => Studio::new(generator),
    };
    studio.on_progress(|p| println!("Generating images: {} / {}", p.current, p.total));

    match cli.command {
        CliCommand::Hand => studio.generate_hand()?,
        CliCommand::Draw => studio.draw_single()?,
        CliCommand::Deck => studio.generate_full_deck()?,
        CliCommand::Export { out } => {
            studio.generate_full_deck()?;
            studio.export_deck(&out)?;
            println!("Wrote {}", out.display());
        }
    }

    for card in studio.cards() {
        let state = match &card.artwork {
            Artwork::Portrait(_) => "portrait",
            Artwork::Pips => "pips",
            Artwork::Empty => "pending",
        };
        println!("{:>3} of {:<8} [{}]", card.id.rank.label(), card.id.suit.name(), state);
    }
    Ok(())
}

#[cfg(not(feature = "http"))]
fn run(_cli: Cli) -> anyhow::Result<()> {
    anyhow::bail!("catdeck was built without the `http` feature; no generator backend available")
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
