use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalplot_core::{Destination, PlotConfig};
use evalplot_pivot::{classify, ClassifyOptions};
use evalplot_script::{ChartKind, ScriptBuilder};

fn inputs(count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| PathBuf::from(format!("Algorithm_Split/alg{}_{}.csv", i % 12, i / 12)))
        .collect()
}

fn bench_synthesis(c: &mut Criterion) {
    let files = inputs(120);
    let destination = Destination::new("bench/report.pdf", PlotConfig::default());
    let opts = ClassifyOptions::from_config(&destination.config);

    c.bench_function("classify_120_inputs", |b| {
        b.iter(|| classify(black_box(&files), &opts))
    });

    c.bench_function("render_recognition_charts", |b| {
        b.iter(|| {
            let classification = classify(&files, &opts).expect("classify");
            let mut builder = ScriptBuilder::new(&classification, &destination);
            builder.summarize();
            builder.metadata_tables();
            for kind in [ChartKind::Roc, ChartKind::Det, ChartKind::Iet, ChartKind::Cmc] {
                let options = builder.resolve_options(kind).expect("options");
                builder.chart("line", "DET", kind == ChartKind::Roc, &options);
            }
            builder.match_galleries();
            black_box(builder.finish().render())
        })
    });
}

criterion_group!(benches, bench_synthesis);
criterion_main!(benches);
