use std::collections::HashSet;
use std::path::Path;

use crate::tally::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Ballots without an identifier are named after their file and line.
pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// Reads one cell of a ballot. Empty cells are skipped.
pub fn parse_candidate(lineno: usize, cell: &str) -> TallyResult<Option<CandidateId>> {
    let value = cell.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let cid = value
        .parse::<CandidateId>()
        .context(ParsingCandidateSnafu { lineno, value })?;
    Ok(Some(cid))
}

/// All the candidates found on the ballots, in order of first appearance.
pub fn infer_candidates(ballots: &[ParsedBallot]) -> Vec<CandidateId> {
    let mut seen: HashSet<CandidateId> = HashSet::new();
    ballots
        .iter()
        .flat_map(|pb| pb.ranking.iter())
        .cloned()
        .filter(|cid| seen.insert(*cid))
        .collect()
}
