// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use httpbridge::http::build_url_params;
use httpbridge::http::codec::{decode, encode};
use httpbridge::HttpParams;

fn cookie_codec_benchmark(c: &mut Criterion) {
    let values = vec![
        "plain",
        "hello world",
        "a;b=c",
        "émoji 🍪 (cookie)",
        "#$&+^`|",
    ];

    c.bench_function("cookie_encode", |b| {
        b.iter(|| {
            for value in &values {
                black_box(encode(black_box(value)));
            }
        })
    });

    let encoded: Vec<String> = values.iter().map(|v| encode(v)).collect();

    c.bench_function("cookie_decode", |b| {
        b.iter(|| {
            for value in &encoded {
                black_box(decode(black_box(value)));
            }
        })
    });
}

fn url_params_benchmark(c: &mut Criterion) {
    let params = HttpParams::new()
        .insert("q", "search terms here")
        .insert("page", "2")
        .insert("id", vec!["1", "2", "3", "4"])
        .insert("filter", "a&b=c");

    c.bench_function("build_url_params_encoded", |b| {
        b.iter(|| black_box(build_url_params(Some(&params), true)))
    });

    c.bench_function("build_url_params_raw", |b| {
        b.iter(|| black_box(build_url_params(Some(&params), false)))
    });
}

criterion_group!(benches, cookie_codec_benchmark, url_params_benchmark);
criterion_main!(benches);
