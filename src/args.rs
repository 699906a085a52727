use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
  /// The cropped grid, one row per line.
  Text,
  /// One line per placed word with its clue number, direction and start.
  Placements,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
  /// Word list with one word per line.
  #[arg(long)]
  pub dict: Option<String>,

  /// Encoded dictionary. Read instead of --dict when it exists, otherwise
  /// written after parsing --dict.
  #[arg(long)]
  pub cache: Option<String>,

  /// Letters available to build words from.
  #[arg(long)]
  pub letters: String,

  #[arg(long)]
  pub seed: Option<u64>,

  /// Side of the square grid to fill before cropping. Defaults to twice the
  /// number of letters.
  #[arg(long)]
  pub size: Option<u32>,

  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  pub output: OutputFormat,

  /// Where to write the encoded result.
  #[arg(long)]
  pub save: Option<String>,
}
