use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sheetgrade_core::{parse_answers, parse_multi_set, parse_questions};

fn mcq_paper(count: u32) -> String {
    let mut s = String::from("Aptitude Test\n");
    for n in 1..=count {
        s.push_str(&format!(
            "Q{n}\nWhat is {n} times 3?\nA. {}\nB. {}\nC. {}\nD. none\n",
            n * 3,
            n + 3,
            n * 4
        ));
    }
    s
}

fn numbered_paper(count: u32) -> String {
    (1..=count)
        .map(|n| format!("{n}. Explain concept number {n}\n   in your own words.\n"))
        .collect()
}

fn multi_set_table(count: u32) -> String {
    let mut s = String::from("Question Number\tSET A\tSET B\tSET C\n");
    for n in 1..=count {
        s.push_str(&format!("Q{n}\tA. {n}\tB. {}\tC. {}\n", n + 1, n + 2));
    }
    s
}

fn bench_questions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_questions");
    let blocks = mcq_paper(100);
    let numbered = numbered_paper(100);

    group.bench_function("header_blocks", |b| {
        b.iter(|| parse_questions(black_box(&blocks)))
    });
    group.bench_function("numbered_lines", |b| {
        b.iter(|| parse_questions(black_box(&numbered)))
    });

    group.finish();
}

fn bench_answers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_answers");
    let inline: String = (1..=100).map(|n| format!("Q{n}    ANSWER{n}\n")).collect();
    let letters: String = (1..=100)
        .map(|n| format!("{n}. {}\n", ["A", "B", "C", "D"][(n % 4) as usize]))
        .collect();

    group.bench_function("inline_table", |b| {
        b.iter(|| parse_answers(black_box(&inline)))
    });
    group.bench_function("option_letters", |b| {
        b.iter(|| parse_answers(black_box(&letters)))
    });

    group.finish();
}

fn bench_multi_set(c: &mut Criterion) {
    let table = multi_set_table(100);
    c.bench_function("parse_multi_set/100", |b| {
        b.iter(|| parse_multi_set(black_box(&table)))
    });
}

criterion_group!(benches, bench_questions, bench_answers, bench_multi_set);
criterion_main!(benches);
