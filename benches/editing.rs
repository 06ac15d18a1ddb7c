//! Benchmarks for buffer editing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use textedit::editor::EditorBuffer;

fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {i}: the quick brown fox jumps over the lazy dog\n"))
        .collect()
}

fn bench_typing(c: &mut Criterion) {
    c.bench_function("type_paragraph", |b| {
        b.iter(|| {
            let mut buf = EditorBuffer::empty();
            for ch in black_box("the quick brown fox jumps over the lazy dog\n").chars() {
                buf.insert_char(ch);
            }
            buf
        });
    });
}

fn bench_edit_large(c: &mut Criterion) {
    let text = sample_text(10_000);
    c.bench_function("insert_middle_large", |b| {
        b.iter(|| {
            let mut buf = EditorBuffer::from_text(black_box(&text));
            buf.move_to(5_000, 10);
            buf.insert_str("inserted text");
            buf
        });
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    let text = sample_text(1_000);
    c.bench_function("undo_redo_100", |b| {
        b.iter(|| {
            let mut buf = EditorBuffer::from_text(&text);
            for i in 0..100 {
                buf.move_to(i * 10, 0);
                buf.insert_str("x ");
            }
            while buf.undo() {}
            while buf.redo() {}
            buf
        });
    });
}

criterion_group!(benches, bench_typing, bench_edit_large, bench_undo_redo);
criterion_main!(benches);
