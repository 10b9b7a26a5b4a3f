use log::{debug, info, warn};

use condorcet_voting::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::tally::config_reader::*;
use crate::tally::io_common::{infer_candidates, simplify_file_name};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing the summary to {path}: {source}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Could not understand {value} as a positive index"))]
    ParsingJsonNumber { value: String },
    #[snafu(display("Line {lineno}: could not read the CSV record: {source}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno}: the line is too short (expected column {column})"))]
    CsvLineTooShort { lineno: usize, column: usize },
    #[snafu(display("Line {lineno}: {value:?} is not a candidate identifier"))]
    ParsingCandidate {
        source: std::num::ParseIntError,
        lineno: usize,
        value: String,
    },
    #[snafu(display("Line {lineno}: {value:?} is not a ballot count"))]
    ParsingCount {
        source: std::num::ParseIntError,
        lineno: usize,
        value: String,
    },
    #[snafu(display("Invalid election rules: {source}"))]
    InvalidRules { source: ConfigurationError },
    #[snafu(display("Invalid ballots: {source}"))]
    InvalidBallots { source: ValidationError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;

/// A ballot, as parsed by the readers.
/// The count is not applied yet and empty rankings are still present.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: Option<String>,
    pub count: Option<u64>,
    pub ranking: Vec<CandidateId>,
}

fn read_ranking_data(root_path: &Path, cfs: &FileSource) -> TallyResult<Vec<ParsedBallot>> {
    let p: PathBuf = root_path.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read rank file {:?}", p2);
    match cfs.provider.as_str() {
        "csv" | "" => io_csv::read_csv_ranking(&p2, cfs),
        "json" => io_json::read_json_ranking(&p2),
        x => whatever!("Provider not implemented {:?} (expected csv or json)", x),
    }
}

/// Applies the counts. Ballots with a count of zero or without any candidate are dropped.
fn expand_ballots(parsed_ballots: &[ParsedBallot]) -> Vec<Ballot> {
    let mut res: Vec<Ballot> = Vec::new();
    for pb in parsed_ballots.iter() {
        // Default of 1 if not specified
        let count = pb.count.unwrap_or(1);
        if count == 0 || pb.ranking.is_empty() {
            debug!("expand_ballots: skipping ballot {:?}", pb);
            continue;
        }
        for _ in 0..count {
            res.push(pb.ranking.clone());
        }
    }
    res
}

fn declared_candidates(
    args: &Args,
    config: &ElectionConfig,
    parsed_ballots: &[ParsedBallot],
) -> Vec<CandidateId> {
    if let Some(cands) = &args.candidates {
        cands.clone()
    } else if let Some(cands) = &config.candidates {
        cands.iter().map(|c| c.id).collect()
    } else {
        let inferred = infer_candidates(parsed_ballots);
        info!("No candidates declared, using the candidates of the ballots: {:?}", inferred);
        inferred
    }
}

// Matrices are written with string keys: {"1": {"2": 4, "3": 1}, ...}
fn matrix_to_json<T: Into<JSValue>>(rows: Vec<(CandidateId, Vec<(CandidateId, T)>)>) -> JSValue {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    for (a, row) in rows {
        let mut js_row: JSMap<String, JSValue> = JSMap::new();
        for (b, x) in row {
            js_row.insert(b.to_string(), x.into());
        }
        res.insert(a.to_string(), JSValue::Object(js_row));
    }
    JSValue::Object(res)
}

fn result_to_json(result: &ElectionResult, min_votes_for_result: u64) -> JSValue {
    json!({
        "winner": result.winner(),
        "hasCondorcetWinner": result.winner().is_some(),
        "totalVotes": result.vote_count(),
        "belowMinimumVotes": (result.vote_count() as u64) < min_votes_for_result,
        "candidates": result.candidates(),
        "ranking": result.ranking(),
        "smithSet": result.smith_set(),
        "ties": result.ties(),
        "pairwiseComparisons": matrix_to_json(result.pairwise_matrix().rows()),
        "margins": matrix_to_json(result.margin_matrix().rows()),
    })
}

fn stability_to_json(report: &StabilityReport, rules: &StabilityRules) -> JSValue {
    json!({
        "baseWinner": report.base_winner,
        "winnerStability": report.winner_stability,
        "rankingStability": report.ranking_stability,
        "condorcetEfficiency": report.condorcet_efficiency,
        "simulations": report.simulations,
        "seed": rules.seed,
    })
}

fn build_summary_js(
    config: &ElectionConfig,
    rules: &VoteRules,
    result: &ElectionResult,
    stability: Option<(&StabilityReport, &StabilityRules)>,
) -> JSValue {
    let min_votes_for_result = config.rules.min_votes_for_result();
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        jurisdiction: config.output_settings.contest_jurisdiction.clone(),
        office: config.output_settings.contest_office.clone(),
        tie_break_method: rules.tie_break_method.to_string(),
        min_votes_for_result,
    };
    let mut js = json!({
        "config": c,
        "results": result_to_json(result, min_votes_for_result),
    });
    if let Some((report, stability_rules)) = stability {
        js["stability"] = stability_to_json(report, stability_rules);
    }
    js
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> TallyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    info!("summary: {:?}", summary_ref);
    let pretty_js_summary_ref = serde_json::to_string_pretty(&summary_ref)
        .context(ParsingJsonSnafu {
            path: reference_path,
        })?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!(
            "Difference detected between calculated summary and reference summary {}",
            reference_path
        )
    }
    Ok(())
}

/// Reads the election described by the command line, tabulates it and writes the summary.
pub fn run_election(args: &Args) -> TallyResult<()> {
    let (mut config, root_path): (ElectionConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (ElectionConfig::default(), PathBuf::new()),
    };
    info!("config: {:?}", config);

    // The input on the command line replaces the sources of the configuration.
    if let Some(input_path) = &args.input {
        config.ballot_sources = vec![FileSource {
            provider: args.input_type.clone().unwrap_or_else(|| "csv".to_string()),
            file_path: input_path.clone(),
            ..FileSource::default()
        }];
        if config.output_settings.contest_name.is_empty() {
            config.output_settings.contest_name = simplify_file_name(input_path);
        }
    }
    if config.ballot_sources.is_empty() {
        whatever!("No ballot source: use --input or add ballotSources to the configuration")
    }

    // Validate the rules:
    let rules = config.rules.vote_rules(&args.tie_break)?;

    let mut parsed_ballots: Vec<ParsedBallot> = Vec::new();
    for cfs in config.ballot_sources.iter() {
        let mut file_data = read_ranking_data(&root_path, cfs)?;
        parsed_ballots.append(&mut file_data);
    }
    info!("Read {} ballots", parsed_ballots.len());

    let candidates = declared_candidates(args, &config, &parsed_ballots);
    let ballots = expand_ballots(&parsed_ballots);

    let system = CondorcetSystem::new(&rules);
    let result = system
        .conduct_election(&ballots, &candidates)
        .context(InvalidBallotsSnafu {})?;
    info!("result: {:?}", result);

    let min_votes = config.rules.min_votes_for_result();
    if (result.vote_count() as u64) < min_votes {
        warn!(
            "Only {} ballots were cast, the minimum for a meaningful result is {}",
            result.vote_count(),
            min_votes
        );
    }

    let stability = if args.stability || config.rules.stability_analysis.unwrap_or(false) {
        let stability_rules = config.rules.stability_rules(args.seed)?;
        let report = analyze_stability(&system, &ballots, &candidates, &stability_rules)
            .context(InvalidBallotsSnafu {})?;
        Some((report, stability_rules))
    } else {
        None
    };

    // Assemble the final json
    let result_js = build_summary_js(
        &config,
        &rules,
        &result,
        stability.as_ref().map(|(r, sr)| (r, sr)),
    );
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {
        path: "(summary)",
    })?;

    match args.out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js_stats);
        }
        Some(out_path) => {
            info!("Writing the summary to {}", out_path);
            fs::write(out_path, &pretty_js_stats).context(WritingSummarySnafu { path: out_path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    Ok(())
}
