// Reading ballots written in JSON.

use serde::Deserialize;
use serde_json::Value as JSValue;

use crate::tally::{io_common::make_default_id, *};

// A ballot is either the ranking alone, or a ranking with some metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum JsonBallot {
    Ranking(Vec<CandidateId>),
    Detailed {
        id: Option<JSValue>,
        count: Option<u64>,
        ranking: Vec<CandidateId>,
    },
}

pub fn read_json_ranking(path: &str) -> TallyResult<Vec<ParsedBallot>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    parse_json_ranking(&contents, path, &make_default_id(path))
}

pub fn parse_json_ranking(
    contents: &str,
    path: &str,
    default_id: &dyn Fn(usize) -> String,
) -> TallyResult<Vec<ParsedBallot>> {
    let ballots: Vec<JsonBallot> =
        serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    let res = ballots
        .into_iter()
        .enumerate()
        .map(|(idx, jb)| match jb {
            JsonBallot::Ranking(ranking) => ParsedBallot {
                id: Some(default_id(idx + 1)),
                count: None,
                ranking,
            },
            JsonBallot::Detailed { id, count, ranking } => {
                let id = match id {
                    Some(JSValue::String(s)) => s,
                    Some(x) => x.to_string(),
                    None => default_id(idx + 1),
                };
                ParsedBallot {
                    id: Some(id),
                    count,
                    ranking,
                }
            }
        })
        .collect();
    debug!("parse_json_ranking: {:?}", res);
    Ok(res)
}
