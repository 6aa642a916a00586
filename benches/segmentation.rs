use criterion::{black_box, criterion_group, criterion_main, Criterion};
use khmercut::{Dictionary, Segmenter};

const WORDS: &str = "សួស្តី\nខ្ញុំ\nស្រលាញ់\nកម្ពុជា\nបង\nការ\nកងកម្លាំង\nរក្សា\nសន្តិសុខ\nនិង\nសណ្តាប់ធ្នាប់\nសាធារណៈ\n";
const FREQS: &str = r#"{
    "សួស្តី": 500, "ខ្ញុំ": 900, "ស្រលាញ់": 400, "កម្ពុជា": 800,
    "បង": 600, "ការ": 900, "កងកម្លាំង": 120, "រក្សា": 340,
    "សន្តិសុខ": 210, "និង": 2500, "សណ្តាប់ធ្នាប់": 80, "សាធារណៈ": 260
}"#;

fn benchmark_segmentation(c: &mut Criterion) {
    let dictionary = Dictionary::from_content(WORDS, Some(FREQS));
    let segmenter = Segmenter::new(dictionary);

    // "Security and public order forces"
    let sentence = "កងកម្លាំងរក្សាសន្តិសុខនិងសណ្តាប់ធ្នាប់សាធារណៈ";
    c.bench_function("segment_short_sentence", |b| {
        b.iter(|| {
            segmenter.segment(black_box(sentence));
        })
    });

    let mixed = "ខ្ញុំស្រលាញ់កម្ពុជា ១ ០០០ ០០០ ៛ (ស.ភ.ភ.ព.) 50.00$!";
    c.bench_function("segment_mixed_content", |b| {
        b.iter(|| {
            segmenter.segment(black_box(mixed));
        })
    });

    let paragraph = "ខ្ញុំស្រលាញ់កម្ពុជា។".repeat(50);
    c.bench_function("segment_paragraph", |b| {
        b.iter(|| {
            segmenter.segment(black_box(paragraph.as_str()));
        })
    });
}

criterion_group!(benches, benchmark_segmentation);
criterion_main!(benches);
