mod naming;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use termverse_capture::{CaptureClient, append_to_source};
use termverse_core::config::DEFAULT_POETRY_WEIGHT;
use termverse_core::{
    CorpusPool, DrawPolicy, EngineConfig, RunSummary, SelectionEngine, SentencePolicy, Source,
};
use tracing::info;

/// Create a new file from a random permutation of lines taken from a
/// terms/privacy/data policy text and a poetry text.
#[derive(Parser, Debug)]
#[command(name = "termverse", version, about)]
struct Cli {
    /// Terms/privacy/data policy source text, one line per line
    #[arg(short, long, env = "TERMVERSE_TERMS_FILE", default_value = "source/terms.txt")]
    terms_file: PathBuf,

    /// Policy page to capture and append to the terms file before the run
    #[arg(long, env = "TERMVERSE_TERMS_URL")]
    terms_url: Option<String>,

    /// Poetry source text, one line per line
    #[arg(short, long, env = "TERMVERSE_POETRY_FILE", default_value = "source/source.txt")]
    poetry_file: PathBuf,

    /// Directory where the new file is created
    #[arg(short = 'd', long, env = "TERMVERSE_OUTPUT_DIR", default_value = "generated_files")]
    new_file_dir: PathBuf,

    /// Use each line (case-insensitively) at most once
    #[arg(short, long)]
    unique_lines: bool,

    /// Randomly skip about half of the otherwise usable lines
    #[arg(short = 's', long)]
    random_skip: bool,

    /// Maximum number of lines written
    #[arg(short = 'm', long)]
    max_lines: Option<usize>,

    /// Maximum words per policy line, keeping the start, middle or end
    #[arg(short = 'w', long)]
    max_words_per_line: Option<usize>,

    /// Never insert blank lines between stanzas
    #[arg(long)]
    no_stanzas: bool,

    /// How the next source is picked
    #[arg(long, value_enum, default_value_t = DrawPolicyArg::Alternating)]
    draw_policy: DrawPolicyArg,

    /// Probability of drawing poetry under the weighted policy
    #[arg(long, default_value_t = DEFAULT_POETRY_WEIGHT)]
    poetry_weight: f64,

    /// Which sentence of a multi-sentence policy line is kept
    #[arg(long, value_enum, default_value_t = SentenceArg::First)]
    sentence: SentenceArg,

    /// Seed for a reproducible run
    #[arg(long, env = "TERMVERSE_SEED")]
    seed: Option<u64>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DrawPolicyArg {
    Alternating,
    Weighted,
    Chained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SentenceArg {
    First,
    Random,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let draw_policy = match self.draw_policy {
            DrawPolicyArg::Alternating => DrawPolicy::Alternating,
            DrawPolicyArg::Weighted => DrawPolicy::Weighted {
                poetry_weight: self.poetry_weight,
            },
            DrawPolicyArg::Chained => DrawPolicy::PatternChained,
        };
        let sentence_policy = match self.sentence {
            SentenceArg::First => SentencePolicy::First,
            SentenceArg::Random => SentencePolicy::Random,
        };
        EngineConfig {
            unique_lines: self.unique_lines,
            random_skip: self.random_skip,
            max_lines: self.max_lines,
            max_words_per_line: self.max_words_per_line,
            no_stanzas: self.no_stanzas,
            draw_policy,
            sentence_policy,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    info!("termverse v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.engine_config();
    config.validate().context("invalid options")?;

    // Every source problem must surface before the output file exists.
    let poetry = CorpusPool::load(Source::Poetry, &cli.poetry_file)
        .with_context(|| format!("reading poetry source {}", cli.poetry_file.display()))?;

    if let Some(url) = &cli.terms_url {
        let text = CaptureClient::new()
            .capture(url)
            .await
            .with_context(|| format!("capturing {url}"))?;
        append_to_source(&cli.terms_file, &text)
            .with_context(|| format!("appending capture to {}", cli.terms_file.display()))?;
    }

    let policy = CorpusPool::load(Source::Policy, &cli.terms_file)
        .with_context(|| format!("reading terms source {}", cli.terms_file.display()))?;

    let file_name = naming::artifact_file_name(&config, Utc::now());
    let (_, summary) = generate(
        config,
        policy,
        poetry,
        cli.rng(),
        &cli.new_file_dir,
        &file_name,
    )?;

    println!("File {file_name} created");
    println!("Total lines: {}", summary.accepted);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

/// Run the engine into a newly created `dir/file_name`.
fn generate(
    config: EngineConfig,
    policy: CorpusPool,
    poetry: CorpusPool,
    rng: StdRng,
    dir: &Path,
    file_name: &str,
) -> anyhow::Result<(PathBuf, RunSummary)> {
    let mut engine = SelectionEngine::new(config, policy, poetry, rng)?;

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(file_name);
    let file = File::create_new(&path).with_context(|| format!("creating {}", path.display()))?;

    let mut out = BufWriter::new(file);
    let summary = engine
        .run(&mut out)
        .with_context(|| format!("writing {}", path.display()))?;
    out.flush()?;

    info!(path = %path.display(), accepted = summary.accepted, "artifact written");
    Ok((path, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn pools() -> (CorpusPool, CorpusPool) {
        let policy = (0..20).map(|i| format!("WE MAY SHARE ITEM {i} WITH PARTNERS.")).collect();
        let poetry = (0..20).map(|i| format!("verse {i} of the long poem")).collect();
        (
            CorpusPool::new(Source::Policy, policy),
            CorpusPool::new(Source::Poetry, poetry),
        )
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_map_to_default_config() {
        let cli = Cli::try_parse_from(["termverse"]).unwrap();
        assert_eq!(cli.engine_config(), EngineConfig::default());
        assert_eq!(cli.new_file_dir, PathBuf::from("generated_files"));
        assert!(cli.terms_url.is_none());
    }

    #[test]
    fn flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "termverse",
            "-u",
            "--random-skip",
            "-m",
            "10",
            "-w",
            "8",
            "--no-stanzas",
            "--draw-policy",
            "weighted",
            "--poetry-weight",
            "0.8",
            "--sentence",
            "random",
        ])
        .unwrap();
        let config = cli.engine_config();
        assert!(config.unique_lines);
        assert!(config.random_skip);
        assert!(config.no_stanzas);
        assert_eq!(config.max_lines, Some(10));
        assert_eq!(config.max_words_per_line, Some(8));
        assert_eq!(config.draw_policy, DrawPolicy::Weighted { poetry_weight: 0.8 });
        assert_eq!(config.sentence_policy, SentencePolicy::Random);
    }

    #[test]
    fn chained_policy_flag() {
        let cli = Cli::try_parse_from(["termverse", "--draw-policy", "chained"]).unwrap();
        assert_eq!(cli.engine_config().draw_policy, DrawPolicy::PatternChained);
    }

    #[test]
    fn generate_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("generated_files");
        let (policy, poetry) = pools();
        let config = EngineConfig {
            max_lines: Some(6),
            max_words_per_line: Some(3),
            ..Default::default()
        };

        let (path, summary) = generate(
            config,
            policy,
            poetry,
            StdRng::seed_from_u64(1),
            &out_dir,
            "run.txt",
        )
        .unwrap();

        assert_eq!(path, out_dir.join("run.txt"));
        assert_eq!(summary.accepted, 6);
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.split_whitespace().count() <= 6));
    }

    #[test]
    fn generate_is_reproducible_with_seed() {
        let dir = tempfile::tempdir().unwrap();
        let mut outputs = Vec::new();
        for name in ["a.txt", "b.txt"] {
            let (policy, poetry) = pools();
            let (path, _) = generate(
                EngineConfig::default(),
                policy,
                poetry,
                StdRng::seed_from_u64(42),
                dir.path(),
                name,
            )
            .unwrap();
            outputs.push(fs::read_to_string(path).unwrap());
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn generate_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("taken.txt"), "keep me").unwrap();
        let (policy, poetry) = pools();
        let result = generate(
            EngineConfig::default(),
            policy,
            poetry,
            StdRng::seed_from_u64(0),
            dir.path(),
            "taken.txt",
        );
        assert!(result.is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("taken.txt")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn invalid_config_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("never");
        let (policy, poetry) = pools();
        let config = EngineConfig {
            max_words_per_line: Some(0),
            ..Default::default()
        };
        let result = generate(
            config,
            policy,
            poetry,
            StdRng::seed_from_u64(0),
            &out_dir,
            "x.txt",
        );
        assert!(result.is_err());
        assert!(!out_dir.exists());
    }
}
