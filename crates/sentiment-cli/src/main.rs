//! `sentiment`: classify negativity/positivity pairs, dump the control surface
//! and membership curves, print the rulebase, and look up lexicon scores.

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::SentimentConfig;
use fls_core::Defuzzification;
use prometheus::Registry;
use prometheus_bridge::ClassificationMetrics;
use sentiment_fls::{generate_report, SentimentSystem};
use swn_lexicon::{Lexicon, SenseWeighting};
use tracing::{debug, Level};

fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .value_name("MODE")
        .value_parser(["height", "centroid"])
        .help("Defuzzification strategy")
}

fn cli() -> Command {
    Command::new("sentiment")
        .about("Type-1 fuzzy sentiment classifier over negativity and positivity degrees")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("JSON configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .arg(
            Arg::new("metrics")
                .long("metrics")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print Prometheus metrics after the command"),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify one negativity/positivity pair")
                .arg(
                    Arg::new("negativity")
                        .long("negativity")
                        .required(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("positivity")
                        .long("positivity")
                        .required(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(mode_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("mode")
                        .help("Print a full JSON report carrying both defuzzified values"),
                ),
        )
        .subcommand(
            Command::new("surface")
                .about("Sample the classification over the negativity x positivity grid")
                .arg(
                    Arg::new("steps-x")
                        .long("steps-x")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("steps-y")
                        .long("steps-y")
                        .value_parser(value_parser!(usize)),
                )
                .arg(mode_arg()),
        )
        .subcommand(
            Command::new("curves")
                .about("Sample every membership function as JSON")
                .arg(
                    Arg::new("levels")
                        .long("levels")
                        .default_value("100")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(Command::new("rules").about("Print the rulebase"))
        .subcommand(
            Command::new("lookup")
                .about("Aggregated polarity score of a term")
                .arg(
                    Arg::new("lexicon")
                        .long("lexicon")
                        .value_name("PATH")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("weighting")
                        .long("weighting")
                        .value_parser(["uniform", "inverse-rank"]),
                )
                .arg(Arg::new("term").required(true))
                .arg(Arg::new("pos").required(true).help("a, n, r or v")),
        )
}

fn init_tracing(verbose: bool, json: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn selected_mode(
    matches: &ArgMatches,
    config: &SentimentConfig,
) -> anyhow::Result<Defuzzification> {
    match matches.get_one::<String>("mode") {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(config.mode),
    }
}

fn run_classify(
    matches: &ArgMatches,
    system: &mut SentimentSystem,
    metrics: &ClassificationMetrics,
) -> anyhow::Result<()> {
    let negativity = *matches
        .get_one::<f64>("negativity")
        .context("--negativity is required")?;
    let positivity = *matches
        .get_one::<f64>("positivity")
        .context("--positivity is required")?;

    if matches.get_flag("json") {
        let report = generate_report(system, negativity, positivity)?;
        metrics.observe_report(&report);
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("The negativity measure was: {negativity}");
    println!("The positivity measure was: {positivity}");
    let modes = match matches.get_one::<String>("mode") {
        Some(raw) => vec![raw.parse::<Defuzzification>()?],
        None => vec![Defuzzification::Height, Defuzzification::Centroid],
    };
    for mode in modes {
        let value = system.classify(negativity, positivity, mode)?;
        metrics.observe_classification(mode, value);
        println!("Using {mode} defuzzification {value}");
    }
    Ok(())
}

fn run_surface(
    matches: &ArgMatches,
    system: &mut SentimentSystem,
    config: &SentimentConfig,
) -> anyhow::Result<()> {
    let steps_x = matches
        .get_one::<usize>("steps-x")
        .copied()
        .unwrap_or(config.surface.steps_x);
    let steps_y = matches
        .get_one::<usize>("steps-y")
        .copied()
        .unwrap_or(config.surface.steps_y);
    let mode = selected_mode(matches, config)?;

    let surface = system.control_surface(steps_x, steps_y, mode)?;
    debug!(steps_x, steps_y, %mode, "control surface sampled");
    let header: Vec<String> = surface.x.iter().map(|x| format!("{x:.3}")).collect();
    println!("pos\\neg\t{}", header.join("\t"));
    for (y, row) in surface.y.iter().zip(&surface.z) {
        let cells: Vec<String> = row.iter().map(|z| format!("{z:.4}")).collect();
        println!("{y:.3}\t{}", cells.join("\t"));
    }
    Ok(())
}

fn run_lookup(
    matches: &ArgMatches,
    config: &SentimentConfig,
    metrics: &ClassificationMetrics,
) -> anyhow::Result<()> {
    let path = match matches.get_one::<PathBuf>("lexicon") {
        Some(path) => path.clone(),
        None => match &config.lexicon.path {
            Some(path) => path.clone(),
            None => bail!("no lexicon given: pass --lexicon or set lexicon.path in the config"),
        },
    };
    let weighting = match matches.get_one::<String>("weighting") {
        Some(raw) => raw.parse::<SenseWeighting>().map_err(anyhow::Error::msg)?,
        None => config.lexicon.weighting,
    };
    let term = matches
        .get_one::<String>("term")
        .context("term is required")?;
    let pos = matches.get_one::<String>("pos").context("pos is required")?;

    let lexicon = Lexicon::load_with(&path, weighting)
        .with_context(|| format!("loading lexicon {}", path.display()))?;
    metrics.observe_lexicon(&lexicon);

    let score = lexicon.score(term, pos);
    println!(
        "{term}#{pos}\tpositive={:.6}\tnegative={:.6}",
        score.positive, score.negative
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"), matches.get_flag("log-json"));

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => SentimentConfig::load(path)?,
        None => SentimentConfig::default(),
    };
    debug!(?config, "configuration resolved");

    let registry = Registry::new();
    let metrics = ClassificationMetrics::new(&registry)?;
    let mut system =
        SentimentSystem::new()?.with_discretization_level(config.discretization_level)?;

    match matches.subcommand() {
        Some(("classify", sub)) => run_classify(sub, &mut system, &metrics)?,
        Some(("surface", sub)) => run_surface(sub, &mut system, &config)?,
        Some(("curves", sub)) => {
            let levels = sub.get_one::<usize>("levels").copied().unwrap_or(100);
            let curves = system.membership_curves(levels)?;
            println!("{}", serde_json::to_string_pretty(&curves)?);
        }
        Some(("rules", _)) => print!("{}", system.rulebase()),
        Some(("lookup", sub)) => run_lookup(sub, &config, &metrics)?,
        _ => bail!("no subcommand given"),
    }

    if matches.get_flag("metrics") {
        print!("{}", metrics.render()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn classify_arguments_parse() {
        let matches = cli()
            .try_get_matches_from([
                "sentiment",
                "classify",
                "--negativity",
                "0.6",
                "--positivity",
                "0.4",
                "--mode",
                "height",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "classify");
        assert_eq!(sub.get_one::<f64>("negativity"), Some(&0.6));
        let mode = selected_mode(sub, &SentimentConfig::default()).unwrap();
        assert_eq!(mode, Defuzzification::Height);
    }

    #[test]
    fn mode_falls_back_to_config() {
        let matches = cli()
            .try_get_matches_from(["sentiment", "surface", "--steps-x", "5"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let config = SentimentConfig {
            mode: Defuzzification::Height,
            ..SentimentConfig::default()
        };
        assert_eq!(selected_mode(sub, &config).unwrap(), Defuzzification::Height);
        assert_eq!(sub.get_one::<usize>("steps-x"), Some(&5));
    }

    #[test]
    fn json_report_does_not_take_a_mode() {
        let base = ["sentiment", "classify", "--negativity", "0.6", "--positivity", "0.4"];
        let with_json: Vec<&str> = base.iter().copied().chain(["--json"]).collect();
        assert!(cli().try_get_matches_from(with_json.clone()).is_ok());

        let conflicting: Vec<&str> = with_json
            .iter()
            .copied()
            .chain(["--mode", "height"])
            .collect();
        let err = cli().try_get_matches_from(conflicting).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn unknown_mode_is_refused_by_the_parser() {
        assert!(cli()
            .try_get_matches_from(["sentiment", "surface", "--mode", "mean"])
            .is_err());
    }
}
