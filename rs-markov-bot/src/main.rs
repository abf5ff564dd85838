use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use rs_markov_core::model::fitting::default_workers;
use rs_markov_core::publish::{Publisher, WritePublisher};
use rs_markov_core::{Chain, MarkovError, Settings};

/// Generates one text from a corpus and hands it to the publisher.
#[derive(Parser, Debug)]
#[command(name = "rs-markov-bot")]
#[command(version, about = "Markov chain text bot")]
struct Cli {
    /// Corpus file (whitespace separated words)
    #[arg(long, default_value = "data.txt")]
    corpus: PathBuf,

    /// Settings file (prefixCount, wordCount, charCount, ...)
    #[arg(long, default_value = "configuration.json")]
    config: PathBuf,

    /// Fixed RNG seed, overrides the one in the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Generation threads racing for a fitting text (0 = one per CPU)
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Skip length fitting and publish a plain generation
    #[arg(long)]
    raw: bool,
}

fn run(cli: &Cli) -> Result<(), MarkovError> {
    // Settings first, so a bad file is reported before the corpus is read
    let mut settings = Settings::load(&cli.config)?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    let mut rng = settings.rng();
    let corpus = BufReader::new(File::open(&cli.corpus)?);
    let chain = Chain::build(corpus, settings.prefix_count, &mut rng)?;
    let stats = chain.stats();
    info!("Chain ready: {} prefixes, {} suffixes", stats.prefixes, stats.suffixes);

    let generator = settings.generator(&chain)?;
    let text = if cli.raw {
        generator.generate(settings.word_count, &mut rng)?
    } else {
        let fitter = settings.fitter()?;
        let workers = if cli.workers == 0 { default_workers() } else { cli.workers };
        if workers > 1 {
            fitter.fit_parallel(&generator, workers, &mut rng)?
        } else {
            fitter.fit(&generator, &mut rng)?
        }
    };

    WritePublisher::stdout().publish(&text)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Nothing published ({}): {e}", e.kind());
            ExitCode::FAILURE
        }
    }
}
