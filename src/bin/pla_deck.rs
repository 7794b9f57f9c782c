//! Generate PLA summary decks from quantification results.
//!
//! Usage:
//!   pla_deck --data Data [--output-dir out] [--variants both|thresholding|find-maxima]
//!   pla_deck --data Data.zip
//!
//! When `--data` points at a `.zip` archive it is extracted next to the
//! archive first; otherwise it must be the extracted `Data` directory.

use pla_deck::{extract, paginate, DeckBuilder, DeckConfig, VariantSelection};
use std::path::PathBuf;

#[derive(Debug)]
struct RunConfig {
    data: PathBuf,
    output_dir: Option<PathBuf>,
    selection: VariantSelection,
}

impl RunConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut data = PathBuf::from("Data");
        let mut output_dir = None;
        let mut selection = VariantSelection::Both;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--data" => {
                    i += 1;
                    if i < args.len() {
                        data = PathBuf::from(&args[i]);
                    }
                },
                "--output-dir" => {
                    i += 1;
                    if i < args.len() {
                        output_dir = Some(PathBuf::from(&args[i]));
                    }
                },
                "--variants" => {
                    i += 1;
                    if i < args.len() {
                        selection = match VariantSelection::parse(&args[i]) {
                            Some(s) => s,
                            None => {
                                eprintln!(
                                    "Unknown variant selection '{}' (expected both, thresholding, or find-maxima)",
                                    args[i]
                                );
                                std::process::exit(2);
                            },
                        };
                    }
                },
                "--help" | "-h" => {
                    println!(
                        "Usage: pla_deck --data <Data dir or Data.zip> [--output-dir <dir>] [--variants both|thresholding|find-maxima]"
                    );
                    std::process::exit(0);
                },
                _ => {},
            }
            i += 1;
        }

        Self {
            data,
            output_dir,
            selection,
        }
    }
}

fn run(config: &RunConfig) -> pla_deck::Result<Vec<PathBuf>> {
    let data_root = if config.data.extension().and_then(|e| e.to_str()) == Some("zip") {
        let dest = config
            .data
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        pla_deck::archive::unpack(&config.data, &dest)?
    } else {
        config.data.clone()
    };

    let mut deck_config = DeckConfig::new(data_root).with_selection(config.selection);
    if let Some(dir) = &config.output_dir {
        deck_config = deck_config.with_output_dir(dir);
    }

    let conditions = extract::discover_conditions(&deck_config.data_root)?;
    let records = extract::extract_all(&conditions, deck_config.selection)?;
    let pages = paginate::paginate(records)?;
    println!(
        "{} condition(s), {} cell(s), {} slide(s) per deck",
        conditions.len(),
        pages.iter().map(|p| p.len()).sum::<usize>(),
        pages.len()
    );

    DeckBuilder::new(&deck_config).build(&pages)
}

fn main() {
    env_logger::init();

    let config = RunConfig::from_args();
    match run(&config) {
        Ok(saved) => {
            for path in saved {
                println!("Saved {}", path.display());
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    }
}
