//! Kropki-Patterns: inspect and dump the move heuristic tables.
//!
//! ## Usage
//!
//! - `kropki-patterns show 0x1234` - Decode a 3x3 code and show its orbit
//! - `kropki-patterns dump moves moves.bin` - Compile a catalog to a binary file
//! - `kropki-patterns lookup moves.bin YQY.H....` - Read one value from a dump
//! - `kropki-patterns audit moves` - Compare a catalog with the realizable patterns

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use kropki_patterns::enumerate::{audit, canonical_patterns};
use kropki_patterns::pattern3::{Pattern3, Pattern3Table};
use kropki_patterns::pattern52::{Pattern52, Pattern52Table};
use kropki_patterns::patterns::{Catalog, EdgeCatalog};
use kropki_patterns::table::Player;

/// Kropki-Patterns: local shape tables for a Kropki engine
#[derive(Parser)]
#[command(name = "kropki-patterns")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a pattern code (number or atomic string)
    Show {
        code: String,
        /// Treat the code as a 5x2 edge band code
        #[arg(long)]
        edge: bool,
    },
    /// Compile a built-in catalog and write it as a binary table
    Dump { catalog: CatalogArg, out: PathBuf },
    /// Look a code up in a binary table
    Lookup {
        file: PathBuf,
        code: String,
        /// The table holds 5x2 edge band codes
        #[arg(long)]
        edge: bool,
        /// Look up for the second player
        #[arg(long)]
        second: bool,
    },
    /// Report how a 3x3 catalog covers the realizable patterns
    Audit {
        #[arg(default_value = "moves")]
        catalog: CatalogArg,
        /// Print every uncovered pattern
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CatalogArg {
    Moves,
    SymmetricCuts,
    Cost,
    EdgeInner,
    Edge,
}

impl CatalogArg {
    fn pattern3(self) -> Option<Catalog> {
        match self {
            CatalogArg::Moves => Some(Catalog::Moves),
            CatalogArg::SymmetricCuts => Some(Catalog::SymmetricCuts),
            CatalogArg::Cost => Some(Catalog::Cost),
            CatalogArg::EdgeInner | CatalogArg::Edge => None,
        }
    }

    fn pattern52(self) -> Option<EdgeCatalog> {
        match self {
            CatalogArg::EdgeInner => Some(EdgeCatalog::Inner),
            CatalogArg::Edge => Some(EdgeCatalog::Edge),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .target(env_logger::Target::Stderr)
    .init();

    match cli.command {
        Commands::Show { code, edge: false } => {
            let p = parse_pattern3(&code)?;
            println!("code {:#07x} ({})", p.raw(), p.atoms());
            print!("{p}");
            let c = p.canonical();
            println!("canonical {:#07x} ({})", c.raw(), c.atoms());
            if !p.is_well_formed() {
                println!("ill-formed: atari flag over a field without a dot");
            }
        }
        Commands::Show { code, edge: true } => {
            let p = parse_pattern52(&code)?;
            println!("code {:#07x} ({})", p.raw(), p.atoms());
            print!("{p}");
        }
        Commands::Dump { catalog, out } => {
            if let Some(catalog) = catalog.pattern3() {
                let table = catalog.build().context("compiling catalog")?;
                table
                    .save_to_file(&out)
                    .with_context(|| format!("writing {}", out.display()))?;
            } else if let Some(catalog) = catalog.pattern52() {
                let table = catalog.build().context("compiling catalog")?;
                table
                    .save_to_file(&out)
                    .with_context(|| format!("writing {}", out.display()))?;
            }
        }
        Commands::Lookup {
            file,
            code,
            edge,
            second,
        } => {
            let player = if second { Player::Second } else { Player::First };
            let context = || format!("loading {}", file.display());
            if edge {
                let p = parse_pattern52(&code)?;
                let table = Pattern52Table::load_from_file(&file).with_context(context)?;
                println!("{}", table.lookup(p, player));
            } else {
                let p = parse_pattern3(&code)?;
                let table = Pattern3Table::load_from_file(&file).with_context(context)?;
                println!("{}", table.lookup(p, player));
            }
        }
        Commands::Audit { catalog, verbose } => {
            let Some(catalog) = catalog.pattern3() else {
                bail!("only 3x3 catalogs can be audited");
            };
            let table = catalog.build().context("compiling catalog")?;
            let realizable = canonical_patterns();
            let coverage = audit(&table, &realizable);
            println!("{coverage}");
            for p in &coverage.spurious {
                println!("spurious {:#07x} {}", p.raw(), p.atoms());
            }
            if verbose {
                for p in &coverage.uncovered {
                    println!("uncovered {:#07x} {}", p.raw(), p.atoms());
                }
            }
            info!("{} realizable patterns checked", realizable.len());
        }
    }
    Ok(())
}

/// Parse a decimal or `0x` hex number.
fn parse_number(text: &str) -> Option<u32> {
    match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

fn parse_pattern3(text: &str) -> Result<Pattern3> {
    match parse_number(text) {
        Some(raw) => {
            Pattern3::from_raw(raw).with_context(|| format!("code {raw:#x} out of range"))
        }
        None => Pattern3::from_atoms(text).with_context(|| format!("bad 3x3 pattern {text:?}")),
    }
}

fn parse_pattern52(text: &str) -> Result<Pattern52> {
    match parse_number(text) {
        Some(raw) => {
            Pattern52::from_raw(raw).with_context(|| format!("code {raw:#x} out of range"))
        }
        None => Pattern52::from_atoms(text).with_context(|| format!("bad edge pattern {text:?}")),
    }
}
