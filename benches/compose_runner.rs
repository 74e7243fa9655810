use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};

use flowcard::{compose_to_writer, derive_style, render, Brief, Flow};

fn sample_brief() -> Brief {
    Brief {
        overlay: "Buy a Widget in Three Easy Steps".to_string(),
        elements: vec![
            "Search for the widget in the catalog".to_string(),
            "Open the product page and review options".to_string(),
            "Add to cart and complete checkout".to_string(),
        ],
    }
}

fn sample_flow() -> Flow {
    serde_json::from_str(
        r##"{
            "name": "Widget checkout",
            "steps": [
                {"type": "CHAPTER", "theme": "dark", "textAlign": "left"},
                {"hotspots": [{"bgColor": "#0055cc", "textColor": "#ffffff"}]},
                {"paths": [{"buttonColor": "#0055cc"}]},
                {"hotspots": [{"bgColor": "#0055cc"}]}
            ]
        }"##,
    )
    .expect("valid flow json")
}

fn bench_derive_style(c: &mut Criterion) {
    let flow = sample_flow();
    c.bench_function("derive_style", |b| {
        b.iter(|| derive_style(Some(&flow)))
    });
}

fn bench_render(c: &mut Criterion) {
    let brief = sample_brief();
    let flow = sample_flow();
    c.bench_function("render_card", |b| {
        b.iter(|| render(&brief, Some(&flow), None))
    });
}

fn bench_compose_png(c: &mut Criterion) {
    let brief = sample_brief();
    c.bench_function("compose_png", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(Vec::new());
            compose_to_writer(&brief, &mut cursor, None, None).expect("compose failed");
            cursor.into_inner()
        })
    });
}

criterion_group!(benches, bench_derive_style, bench_render, bench_compose_png);
criterion_main!(benches);
