use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use effect_annotator::annotator::EffectAnnotator;
use effect_annotator::cli;
use effect_annotator::config::AnnotatorConfig;
use effect_annotator::effect::{EffectType, effects_description};
use effect_annotator::reference::InMemoryGenome;
use effect_annotator::transcript::GeneModelIndex;
use effect_annotator::variant::{Location, VariantSpec};

#[derive(Parser)]
#[command(
    name = "annotate_variant",
    about = "Annotate the functional effects of variants on overlapping transcripts"
)]
struct Cli {
    /// Reference genome FASTA (plain or gzip)
    #[arg(short = 'g', long = "genome")]
    genome: PathBuf,

    /// Gene models as a JSON array of transcript records
    #[arg(short = 'm', long = "gene-models")]
    gene_models: PathBuf,

    /// Annotator JSON configuration
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Promoter length, overriding the configuration
    #[arg(long = "promoter-len")]
    promoter_len: Option<i64>,

    /// Variant location: chrom:pos, or chrom:begin-end for CNV+/CNV-
    #[arg(short = 'l', long = "location", requires = "variant", conflicts_with = "input")]
    location: Option<String>,

    /// Variant notation: sub(X->Y), del(N), ins(SEQ), CNV+ or CNV-
    #[arg(short = 'v', long = "variant", requires = "location")]
    variant: Option<String>,

    /// Tab-separated file of location and variant columns
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Log filter, e.g. "warn" or "effect_annotator=debug"
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
    Ok(())
}

/// `(location, variant)` pairs from the command line or the input file.
fn read_queries(cli_args: &Cli) -> Result<Vec<(String, String)>> {
    if let (Some(location), Some(variant)) = (&cli_args.location, &cli_args.variant) {
        return Ok(vec![(location.clone(), variant.clone())]);
    }
    let Some(path) = &cli_args.input else {
        bail!("either --location/--variant or --input is required");
    };

    let file = File::open(path)
        .with_context(|| format!("failed to open input file: {}", path.display()))?;
    let mut queries = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((location, variant)) = line.split_once('\t') else {
            bail!(
                "{}:{}: expected location<TAB>variant, got '{line}'",
                path.display(),
                line_no + 1
            );
        };
        queries.push((location.trim().to_string(), variant.trim().to_string()));
    }
    Ok(queries)
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();
    init_tracing(&cli_args.log_level)?;

    cli::banner("Annotate Variants");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let mut config = match &cli_args.config {
        Some(path) => AnnotatorConfig::from_file(path)?,
        None => AnnotatorConfig::default(),
    };
    if let Some(promoter_len) = cli_args.promoter_len {
        config.promoter_len = promoter_len;
        config.validate()?;
    }

    cli::kv("Genome", &cli_args.genome.display().to_string());
    cli::kv("Gene models", &cli_args.gene_models.display().to_string());
    cli::kv("Promoter length", &config.promoter_len.to_string());
    cli::kv("Splice site length", &config.splice_site_length.to_string());
    eprintln!();

    // ── Loading ──────────────────────────────────────────
    cli::section("Loading");

    let genome = InMemoryGenome::from_fasta_path(&cli_args.genome)
        .with_context(|| format!("failed to load genome: {}", cli_args.genome.display()))?;
    cli::kv("Chromosomes", &genome.len().to_string());

    let gene_models = GeneModelIndex::from_json_path(&cli_args.gene_models).with_context(|| {
        format!(
            "failed to load gene models: {}",
            cli_args.gene_models.display()
        )
    })?;
    cli::kv("Transcripts", &gene_models.len().to_string());

    let queries = read_queries(&cli_args)?;
    cli::kv("Variants", &queries.len().to_string());
    eprintln!();

    // ── Annotation ───────────────────────────────────────
    cli::section("Annotation");

    let annotator = EffectAnnotator::new(&genome, &gene_models, config);
    let mut out = BufWriter::new(io::stdout().lock());
    let mut worst_counts: HashMap<EffectType, usize> = HashMap::new();
    let mut failures = 0usize;

    for (location_text, variant_text) in &queries {
        let effects = location_text
            .parse::<Location>()
            .and_then(|location| {
                annotator.do_annotate_variant(&location, &VariantSpec::Notation(variant_text))
            });
        let effects = match effects {
            Ok(effects) => effects,
            Err(e) => {
                cli::warning(&format!("{location_text} {variant_text}: {e}"));
                failures += 1;
                continue;
            }
        };

        if let Some((worst, genes, details)) = effects_description(&effects) {
            *worst_counts.entry(worst).or_default() += 1;
            writeln!(out, "{location_text}\t{variant_text}\t{worst}\t{genes}\t{details}")
                .context("failed to write output")?;
        }
    }
    out.flush().context("failed to write output")?;

    let mut counts: Vec<(EffectType, usize)> = worst_counts.into_iter().collect();
    counts.sort_by_key(|(effect, _)| (std::cmp::Reverse(effect.severity()), effect.as_str()));
    cli::effect_counts(&counts);

    let annotated = queries.len() - failures;
    cli::success(&format!("annotated {annotated} variants"));
    if failures > 0 {
        cli::warning(&format!("{failures} variants could not be annotated"));
    }

    cli::print_summary(start);
    Ok(())
}
