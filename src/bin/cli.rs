//! duravec CLI
//!
//! Thin command-line wrapper around the vector engine's three operations.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use duravec::{Config, LayoutKind, PersistentVector};

/// duravec CLI
#[derive(Parser, Debug)]
#[command(name = "duravec-cli")]
#[command(about = "CLI for the duravec persistent vector")]
#[command(version)]
struct Args {
    /// Backing directory
    #[arg(short, long, default_value = "./duravec_data")]
    data_dir: String,

    /// On-disk layout (must match across reopens of the same directory)
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Packed)]
    layout: LayoutArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LayoutArg {
    Discrete,
    Packed,
}

impl From<LayoutArg> for LayoutKind {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Discrete => LayoutKind::Discrete,
            LayoutArg::Packed => LayoutKind::Packed,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append a value at the end of the vector
    Push {
        /// The value to append
        value: String,
    },

    /// Read the element at an index
    Get {
        /// The logical index to read
        index: u64,
    },

    /// Erase the element at an index, shifting later elements down
    Erase {
        /// The logical index to erase
        index: u64,
    },

    /// Print the number of elements
    Len,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,duravec=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .layout(args.layout.into())
        .build();

    let mut vector = match PersistentVector::open(config) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("failed to open vector: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = match args.command {
        Commands::Push { value } => vector.push_back(value.as_bytes()).map(|_| {
            println!("pushed element {}", vector.size() - 1);
        }),
        Commands::Get { index } => vector.at(index).map(|bytes| {
            println!("{}", String::from_utf8_lossy(&bytes));
        }),
        Commands::Erase { index } => vector.erase(index).map(|_| {
            println!("erased element {}", index);
        }),
        Commands::Len => {
            println!("{}", vector.size());
            Ok(())
        }
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
