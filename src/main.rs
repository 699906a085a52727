#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;

use std::{
  collections::HashMap,
  fs::{self, File},
  io::Write,
  path::Path,
  process::ExitCode,
};

use args::{Args, OutputFormat};
use clap::Parser;
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use util::{
  bitcode,
  error::{LetterGridError, LetterGridResult},
  time::time_fn,
};
use word_dict::{Trie, TrieEncoding};
use word_gen::{
  crossword_grid::{CrosswordEncoding, CrosswordGrid},
  generator::CrosswordGenerator,
};

fn read_cached_trie(cache_path: &str) -> LetterGridResult<Trie> {
  let encoding: TrieEncoding = bitcode::decode(&fs::read(cache_path)?)?;
  Ok(encoding.into())
}

fn write_cached_trie(trie: &Trie, cache_path: &str) -> LetterGridResult {
  let result = bitcode::encode(&TrieEncoding::from(trie));
  let mut file = File::create(cache_path)?;
  file.write_all(&result)?;
  Ok(())
}

fn load_trie(args: &Args) -> LetterGridResult<Trie> {
  if let Some(cache_path) = args.cache.as_deref() {
    if Path::new(cache_path).exists() {
      info!("Reading dictionary cache {cache_path}");
      return read_cached_trie(cache_path);
    }
  }

  let dict_path = args.dict.as_deref().ok_or_else(|| {
    LetterGridError::Parse("No --dict word list given and no dictionary cache found".to_owned())
  })?;
  let trie = Trie::parse_word_list(&fs::read_to_string(dict_path)?);

  if let Some(cache_path) = args.cache.as_deref() {
    write_cached_trie(&trie, cache_path)?;
    info!("Wrote dictionary cache {cache_path}");
  }
  Ok(trie)
}

fn print_placements(grid: &CrosswordGrid) {
  let numbers: HashMap<_, _> = grid
    .clue_starts()
    .into_iter()
    .map(|(number, pos)| (pos, number))
    .collect();
  for placement in grid.placements() {
    if let Some(start) = placement.start() {
      let number = numbers.get(&start).cloned().unwrap_or_default();
      println!("{number}{} {} {start}", placement.direction(), placement.word());
    }
  }
}

fn run() -> LetterGridResult {
  let args = Args::parse();

  let (load_time, trie) = time_fn(|| load_trie(&args));
  let trie = trie?;
  info!("Loaded {} words in {}s", trie.len(), load_time.as_secs_f32());

  let generator = CrosswordGenerator::new(trie);
  let mut rng = match args.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  };

  let (gen_time, generation) = time_fn(|| match args.size {
    Some(side) => generator.generate_with_side(&args.letters, side, &mut rng),
    None => generator.generate(&args.letters, &mut rng),
  });
  info!(
    "Placed {} of {} words in {}s",
    generation.placed_count(),
    generation.candidate_count(),
    gen_time.as_secs_f32()
  );

  match args.output {
    OutputFormat::Text => println!("{}", generation.grid()),
    OutputFormat::Placements => print_placements(generation.grid()),
  }

  if let Some(save_path) = args.save.as_deref() {
    let result = bitcode::encode(&CrosswordEncoding::from(generation.grid()));
    let mut file = File::create(save_path)?;
    file.write_all(&result)?;
  }

  Ok(())
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  if let Err(err) = run() {
    error!("{err}");
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
