use sentiment_fls::{generate_report, Defuzzification, Polarity, SentimentSystem};

const TOLERANCE: f64 = 1e-9;

#[test]
fn reference_pair_lands_on_positive_side() {
    let mut system = SentimentSystem::new().unwrap();

    let height = system.classify(0.6, 0.4, Defuzzification::Height).unwrap();
    let centroid = system.classify(0.6, 0.4, Defuzzification::Centroid).unwrap();

    assert!((height - 0.725).abs() < TOLERANCE, "height {height}");
    assert!((centroid - 0.6708835682345615).abs() < TOLERANCE, "centroid {centroid}");
    assert!(height > 0.5 && centroid > 0.5);
}

#[test]
fn coarser_output_grid_shifts_centroid_only() {
    let mut system = SentimentSystem::new()
        .unwrap()
        .with_discretization_level(50)
        .unwrap();
    let c = system.classify_all(0.6, 0.4).unwrap();
    assert!((c.centroid - 0.6734904488111034).abs() < TOLERANCE);
    assert!((c.height - 0.725).abs() < TOLERANCE);
}

#[test]
fn repeated_evaluation_is_identical() {
    let mut system = SentimentSystem::new().unwrap();
    let first = system.classify_all(0.6, 0.4).unwrap();
    let _ = system.classify_all(0.2, 0.9).unwrap();
    let again = system.classify_all(0.6, 0.4).unwrap();
    assert_eq!(first, again);
}

#[test]
fn report_records_every_rule() {
    let mut system = SentimentSystem::new().unwrap();
    let report = generate_report(&mut system, 0.6, 0.4).unwrap();

    assert_eq!(report.polarity, Polarity::Positive);
    assert_eq!(report.firings.len(), 9);
    let expected = [0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.2, 0.5, 0.2];
    for (firing, want) in report.firings.iter().zip(expected) {
        assert!((firing.strength - want).abs() < TOLERANCE, "{}", firing.rule);
    }

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["polarity"], "positive");
    assert_eq!(value["firings"].as_array().map(Vec::len), Some(9));
    assert!(value["generated_at"].as_str().is_some());
}

#[test]
fn lexicon_scores_feed_the_classifier() {
    use std::io::Cursor;
    use swn_lexicon::{Lexicon, SenseWeighting};

    let text = "a\t00000001\t0.75\t0\tgreat#1\tvery good\n\
                a\t00000002\t0\t0.625\tawful#1\texceptionally bad\n";
    let lexicon = Lexicon::from_reader(Cursor::new(text), SenseWeighting::Uniform).unwrap();
    let mut system = SentimentSystem::new().unwrap();

    for term in ["great", "awful", "unlisted"] {
        let score = lexicon.score(term, "a");
        let report = generate_report(&mut system, score.negative, score.positive).unwrap();
        let centroid = system
            .classify(score.negative, score.positive, Defuzzification::Centroid)
            .unwrap();
        assert_eq!(report.centroid, centroid, "{term}");
        assert!((0.0..=1.0).contains(&report.height), "{term}");
    }

    let unlisted = lexicon.score("unlisted", "a");
    let neutral = system.classify_all(unlisted.negative, unlisted.positive).unwrap();
    assert!((neutral.centroid - 0.5).abs() < TOLERANCE);
}
