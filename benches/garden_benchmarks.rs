//! Benchmarks for graph building, backlink scans and fuzzy search.
//!
//! Run with: cargo bench --bench garden_benchmarks

use chrono::{DateTime, Duration, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use garden::domain::{Note, NoteId, Tag};
use garden::graph::build_graph;
use garden::links::{TitleLookup, find_backlinks, resolve_references};
use garden::search::{SearchEngine, SearchOptions};
use garden::tags::tag_counts;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Tags to assign to notes
const TAGS: &[&str] = &[
    "draft",
    "review",
    "published",
    "important",
    "rust",
    "cli",
    "garden",
    "journal",
];

/// Sample words for generating realistic note content
const WORDS: &[&str] = &[
    "architecture",
    "design",
    "pattern",
    "implementation",
    "testing",
    "performance",
    "compost",
    "seedling",
    "perennial",
    "harvest",
    "interface",
    "module",
    "function",
    "structure",
    "algorithm",
    "cache",
    "query",
    "graph",
    "memory",
    "network",
];

const SIZES: [usize; 3] = [100, 500, 1000];

fn base_time() -> DateTime<Utc> {
    // 2024-01-01T00:00:00Z
    DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

fn title_for(index: usize) -> String {
    format!("Note {} {}", index, WORDS[index % WORDS.len()])
}

/// Generate a note whose content links to a few earlier notes
fn generate_note(index: usize) -> Note {
    let created = base_time() + Duration::minutes(index as i64);
    let id = NoteId::from_datetime(created);

    let body: Vec<&str> = (0..40).map(|j| WORDS[(index + j) % WORDS.len()]).collect();
    let mut content = body.join(" ");
    for step in [1, 7, 31] {
        if index >= step {
            content.push_str(&format!(" See [[{}]].", title_for(index - step)));
        }
    }
    if index % 10 == 0 {
        content.push_str(" Also [[Missing page]].");
    }

    let tags = vec![
        Tag::new(TAGS[index % TAGS.len()]).unwrap(),
        Tag::new(TAGS[(index + 3) % TAGS.len()]).unwrap(),
    ];

    Note::builder(id, title_for(index), created, created)
        .content(content)
        .tags(tags)
        .build()
        .unwrap()
}

fn generate_notes(count: usize) -> Vec<Note> {
    // Newest first, the same order the store keeps
    (0..count).rev().map(generate_note).collect()
}

// =============================================================================
// Link Benchmarks
// =============================================================================

fn bench_build_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");

    for size in SIZES {
        let notes = generate_notes(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &notes, |b, notes| {
            b.iter(|| build_graph(notes));
        });
    }

    group.finish();
}

fn bench_backlinks(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_backlinks");

    for size in SIZES {
        let notes = generate_notes(size);
        // Oldest note collects the most references
        let target = notes[notes.len() - 1].clone();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &notes, |b, notes| {
            b.iter(|| find_backlinks(&target, notes));
        });
    }

    group.finish();
}

fn bench_resolve_references(c: &mut Criterion) {
    let notes = generate_notes(1000);
    let lookup = TitleLookup::new(&notes);
    let note = &notes[0];

    c.bench_function("resolve_references", |b| {
        b.iter(|| resolve_references(note.content(), &lookup))
    });
}

// =============================================================================
// Search Benchmarks
// =============================================================================

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_index_build");

    for size in SIZES {
        let notes = generate_notes(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &notes, |b, notes| {
            b.iter(|| SearchEngine::new(notes, SearchOptions::default()));
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in SIZES {
        let notes = generate_notes(size);
        let mut engine = SearchEngine::new(&notes, SearchOptions::default());

        for query in ["harvest", "algoritm", "rust #draft"] {
            engine.set_query(query);
            group.bench_with_input(
                BenchmarkId::new(query, size),
                &notes,
                |b, notes| b.iter(|| engine.results(notes)),
            );
        }
    }

    group.finish();
}

fn bench_tag_counts(c: &mut Criterion) {
    let notes = generate_notes(1000);

    c.bench_function("tag_counts", |b| b.iter(|| tag_counts(&notes)));
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    link_benches,
    bench_build_graph,
    bench_backlinks,
    bench_resolve_references,
);

criterion_group!(search_benches, bench_index_build, bench_search, bench_tag_counts);

criterion_main!(link_benches, search_benches);
