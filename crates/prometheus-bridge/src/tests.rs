use crate::ClassificationMetrics;
use prometheus::Registry;
use sentiment_fls::{generate_report, Defuzzification, SentimentSystem};
use std::io::Cursor;
use swn_lexicon::{Lexicon, SenseWeighting};

#[test]
fn report_updates_gauges_and_counters() {
    let registry = Registry::new();
    let metrics = ClassificationMetrics::new(&registry).unwrap();
    let mut system = SentimentSystem::new().unwrap();
    let report = generate_report(&mut system, 0.6, 0.4).unwrap();

    metrics.observe_report(&report);
    metrics.observe_classification(Defuzzification::Height, report.height);

    let centroid = metrics
        .classification_value
        .with_label_values(&["centroid"])
        .get();
    assert_eq!(centroid, report.centroid);
    assert_eq!(
        metrics
            .evaluations_total
            .with_label_values(&["height"])
            .get(),
        2
    );
    assert_eq!(
        metrics
            .rule_firing_strength
            .with_label_values(&["8"])
            .get(),
        report.firings[7].strength
    );
}

#[test]
fn lexicon_size_is_exported() {
    let registry = Registry::new();
    let metrics = ClassificationMetrics::new(&registry).unwrap();
    let text = "a\t1\t0.8\t0.1\tgood#1 nice#2\tg\n";
    let lexicon = Lexicon::from_reader(Cursor::new(text), SenseWeighting::Uniform).unwrap();
    metrics.observe_lexicon(&lexicon);

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("sentiment_lexicon_terms 2"), "{rendered}");
}

#[test]
fn registering_twice_fails() {
    let registry = Registry::new();
    ClassificationMetrics::new(&registry).unwrap();
    assert!(ClassificationMetrics::new(&registry).is_err());
}
