use criterion::{Criterion, black_box, criterion_group, criterion_main};

use effect_annotator::annotator::EffectAnnotator;
use effect_annotator::config::AnnotatorConfig;
use effect_annotator::reference::InMemoryGenome;
use effect_annotator::strand::Strand;
use effect_annotator::transcript::{GeneModelIndex, TranscriptModel};
use effect_annotator::variant::Variant;

const CHROMOSOME_LENGTH: usize = 1_000_000;
const GENES: i64 = 500;
const GENE_SPACING: i64 = 2_000;

/// A chromosome of repeating ACGT with evenly spaced three-exon genes on
/// alternating strands.
fn fixture() -> (InMemoryGenome, GeneModelIndex) {
    let sequence: String = "ACGT".repeat(CHROMOSOME_LENGTH / 4);
    let mut genome = InMemoryGenome::new();
    genome.insert("chr1", &sequence);

    let transcripts = (0..GENES)
        .map(|i| {
            let base = i * GENE_SPACING + 100;
            let strand = if i % 2 == 0 {
                Strand::Forward
            } else {
                Strand::Reverse
            };
            TranscriptModel::new(
                &format!("GENE{i}"),
                &format!("TX{i}"),
                "chr1",
                strand,
                &[
                    (base, base + 199),
                    (base + 500, base + 649),
                    (base + 1000, base + 1299),
                ],
                Some((base + 50, base + 1200)),
            )
            .unwrap()
        })
        .collect();
    (genome, GeneModelIndex::new(transcripts))
}

fn bench_annotate(c: &mut Criterion) {
    let (genome, models) = fixture();
    let annotator = EffectAnnotator::new(&genome, &models, AnnotatorConfig::default());

    let variants = [
        ("missense", Variant::new("chr1", 200_160, "A", "C").unwrap()),
        ("frame_shift", Variant::new("chr1", 200_620, "G", "").unwrap()),
        ("splice_site", Variant::new("chr1", 200_300, "N", "A").unwrap()),
        ("intron", Variant::new("chr1", 200_400, "A", "G").unwrap()),
        ("intergenic", Variant::new("chr1", 999_000, "A", "G").unwrap()),
    ];

    let mut group = c.benchmark_group("annotate");
    for (name, variant) in &variants {
        group.bench_function(*name, |b| {
            b.iter(|| annotator.annotate(black_box(variant)).unwrap());
        });
    }
    group.finish();
}

fn bench_load_gene_models(c: &mut Criterion) {
    c.bench_function("build_index (500 transcripts)", |b| {
        b.iter(|| {
            let (_, models) = fixture();
            assert_eq!(models.len(), GENES as usize);
        });
    });
}

criterion_group!(benches, bench_annotate, bench_load_gene_models);
criterion_main!(benches);
