//! Performance benchmarks for catalog reconciliation and view projection

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use biffcat::{Catalog, CatalogView, Entry, IconHandle, Provenance, SortDirection, SortKey};

const EXTENSIONS: [&str; 4] = ["itm", "cre", "wed", "bam"];

fn entry(index: usize, provenance: Provenance) -> Entry {
    Entry::new(
        format!("res{index:04}.{}", EXTENSIONS[index % EXTENSIONS.len()]),
        provenance,
        IconHandle(index as u64),
    )
}

/// An archive load followed by an override scan touching every fourth name.
fn populated_catalog(size: usize) -> Catalog {
    let mut catalog = Catalog::new();
    for i in 0..size {
        catalog.insert(entry(i, Provenance::Archived)).unwrap();
    }
    for i in (0..size).step_by(4) {
        catalog.insert(entry(i, Provenance::Override)).unwrap();
    }
    for i in 0..size / 10 {
        catalog.insert(entry(i, Provenance::New)).unwrap();
    }
    catalog
}

fn benchmark_reconciliation(c: &mut Criterion) {
    c.bench_function("reconcile_1000_entries", |b| {
        b.iter(|| black_box(populated_catalog(1000)));
    });
}

fn benchmark_projection(c: &mut Criterion) {
    let catalog = populated_catalog(1000);

    c.bench_function("project_by_name", |b| {
        let mut view = CatalogView::new();
        b.iter(|| view.project(black_box(&catalog)).len());
    });

    c.bench_function("project_by_provenance_filtered", |b| {
        let mut view = CatalogView::new();
        view.set_visible(Provenance::New, false);
        view.set_sort(SortKey::Provenance, SortDirection::Descending);
        b.iter(|| view.project(black_box(&catalog)).len());
    });
}

criterion_group!(benches, benchmark_reconciliation, benchmark_projection);
criterion_main!(benches);
