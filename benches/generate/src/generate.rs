use lorem_html::HtmlRandomizer;
use random_posts::{generate, AssumeYes, GenerateOptions, MemoryHost, NullProgress};

fn main() {
    // Run registered benchmarks.
    divan::main();
}

// Checks document generation for a few tree shapes
#[divan::bench(args = [(3, 3, 10), (5, 4, 10), (8, 6, 20)])]
fn random_html(bencher: divan::Bencher, (depth, width, length): (u32, u32, u32)) {
    let mut randomizer = HtmlRandomizer::seeded(42);
    bencher.bench_local(|| randomizer.random_html(depth, width, length));
}

// Checks a whole `generate` run against the in-memory host
#[divan::bench]
fn generate_posts(bencher: divan::Bencher) {
    let options = GenerateOptions {
        count: 50,
        taxonomies: vec!["category".into(), "post_tag".into()],
        featured_image: true,
        seed: Some(42),
        ..GenerateOptions::default()
    };
    bencher.bench_local(|| {
        let mut host = MemoryHost::default();
        generate(&mut host, &options, &mut AssumeYes, &mut NullProgress)
    });
}
