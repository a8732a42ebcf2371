use crate::{Lexicon, LexiconEntry, LexiconError, PolarityScore, SenseWeighting};
use rand::Rng;
use std::io::Cursor;

const DICTIONARY: &str = "# SentiWordNet sample\n\
# POS\tID\tPosScore\tNegScore\tSynsetTerms\tGloss\n\
a\t00000001\t0.8\t0.1\tgood#1 nice#2\thaving desirable qualities\n\
\n\
   \n\
a\t00000002\t0.4\t0.3\tgood#1\tmorally admirable\n\
n\t00000003\t0\t0.75\tloss#1\tsomething lost\n";

fn load(text: &str, weighting: SenseWeighting) -> Result<Lexicon, LexiconError> {
    Lexicon::from_reader(Cursor::new(text), weighting)
}

fn close(a: PolarityScore, positive: f64, negative: f64) -> bool {
    (a.positive - positive).abs() < 1e-12 && (a.negative - negative).abs() < 1e-12
}

#[test]
fn senses_are_averaged_per_term() {
    let lexicon = load(DICTIONARY, SenseWeighting::Uniform).unwrap();
    assert!(close(lexicon.score("good", "a"), 0.6, 0.2));
    assert!(close(lexicon.score("nice", "a"), 0.8, 0.1));
    assert!(close(lexicon.score("loss", "n"), 0.0, 0.75));
    assert_eq!(lexicon.len(), 3);
}

#[test]
fn part_of_speech_is_part_of_the_key() {
    let lexicon = load(DICTIONARY, SenseWeighting::Uniform).unwrap();
    assert!(lexicon.contains("good", "a"));
    assert!(!lexicon.contains("good", "n"));
    assert_eq!(lexicon.score("good", "n"), PolarityScore::default());
}

#[test]
fn unknown_terms_score_zero() {
    let lexicon = load(DICTIONARY, SenseWeighting::Uniform).unwrap();
    assert_eq!(lexicon.score("unknownterm", "n"), PolarityScore::new(0.0, 0.0));
    let empty = Lexicon::default();
    assert_eq!(empty.score("good", "a"), PolarityScore::new(0.0, 0.0));
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let bare = "a\t1\t0.8\t0.1\tgood#1\tg\na\t2\t0.4\t0.3\tgood#2\tg\n";
    let noisy = "# header\n\n\t \na\t1\t0.8\t0.1\tgood#1\tg\n  # indented comment\na\t2\t0.4\t0.3\tgood#2\tg\n\n";
    let a = load(bare, SenseWeighting::Uniform).unwrap();
    let b = load(noisy, SenseWeighting::Uniform).unwrap();
    assert_eq!(a.score("good", "a"), b.score("good", "a"));
    assert_eq!(a.len(), b.len());
}

#[test]
fn short_line_names_its_number() {
    let text = "# header\na\t1\t0.8\t0.1\tgood#1\tg\na\t2\t0.4\t0.3\tbad#1\n";
    let err = load(text, SenseWeighting::Uniform).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().contains("line 3"), "{err}");
}

#[test]
fn extra_field_is_rejected() {
    let text = "a\t1\t0.8\t0.1\tgood#1\tgood\tand kind\n";
    let err = load(text, SenseWeighting::Uniform).unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert!(err.to_string().contains("found 7"), "{err}");
}

#[test]
fn invalid_utf8_names_its_line() {
    let bytes: &[u8] = b"a\t1\t0.8\t0.1\tgood#1\tg\na\t2\t0.4\t0.3\tbad\xff#1\tg\n";
    let err = Lexicon::from_reader(Cursor::new(bytes), SenseWeighting::Uniform).unwrap_err();
    assert!(matches!(err, LexiconError::Format { line: 2, .. }), "{err}");
}

#[test]
fn unparsable_numbers_abort_the_load() {
    let text = "a\t1\tzero\t0.1\tgood#1\tg\n";
    assert!(matches!(
        load(text, SenseWeighting::Uniform),
        Err(LexiconError::Format { line: 1, .. })
    ));
    let bad_rank = "a\t1\t0.5\t0.1\tgood#first\tg\n";
    assert!(matches!(
        load(bad_rank, SenseWeighting::Uniform),
        Err(LexiconError::Format { line: 1, .. })
    ));
    let no_rank = "a\t1\t0.5\t0.1\tgood\tg\n";
    assert!(load(no_rank, SenseWeighting::Uniform).is_err());
}

#[test]
fn duplicate_sense_keeps_last_record() {
    let text = "a\t7\t0.9\t0.0\tgood#1\tg\na\t7\t0.1\t0.5\tgood#1\tg\n";
    let lexicon = load(text, SenseWeighting::Uniform).unwrap();
    assert!(close(lexicon.score("good", "a"), 0.1, 0.5));
}

#[test]
fn inverse_rank_weighting_is_opt_in() {
    let text = "v\t1\t1.0\t0.0\trun#1\tg\nv\t2\t0.0\t1.0\trun#2\tg\n";
    let uniform = load(text, SenseWeighting::Uniform).unwrap();
    assert!(close(uniform.score("run", "v"), 0.5, 0.5));
    let weighted = load(text, SenseWeighting::InverseRank).unwrap();
    assert!(close(weighted.score("run", "v"), 2.0 / 3.0, 1.0 / 3.0));
}

#[test]
fn uniform_aggregate_is_plain_mean() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let mut entry = LexiconEntry::default();
        let n = rng.gen_range(1..20u32);
        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        for rank in 1..=n {
            let score = PolarityScore::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
            pos_sum += score.positive;
            neg_sum += score.negative;
            entry.insert(rank, format!("{rank:08}"), score);
        }
        let aggregated = entry.aggregate(SenseWeighting::Uniform);
        assert!((aggregated.positive - pos_sum / n as f64).abs() < 1e-9);
        assert!((aggregated.negative - neg_sum / n as f64).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&aggregated.positive));
    }
}

#[test]
fn load_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("swn-lexicon-{}.txt", std::process::id()));
    std::fs::write(&path, DICTIONARY).unwrap();
    let lexicon = Lexicon::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(close(lexicon.score("good", "a"), 0.6, 0.2));

    let missing = Lexicon::load(path.with_extension("missing")).unwrap_err();
    assert!(matches!(missing, LexiconError::Io(_)));
}

#[test]
fn weighting_names() {
    assert_eq!("inverse-rank".parse::<SenseWeighting>(), Ok(SenseWeighting::InverseRank));
    assert_eq!(SenseWeighting::default(), SenseWeighting::Uniform);
    assert_eq!(SenseWeighting::Uniform.to_string(), "uniform");
    assert!("rank".parse::<SenseWeighting>().is_err());
}
