use crate::tally::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

/// The description of the election, as written in the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
    #[serde(rename = "tieBreakMethod")]
    pub tie_break_method: String,
    #[serde(rename = "minVotesForResult")]
    pub min_votes_for_result: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileSource {
    /// csv or json
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    pub first_vote_column_index: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    pub first_vote_row_index: Option<JSValue>,
    #[serde(rename = "idColumnIndex")]
    pub id_column_index: Option<JSValue>,
    #[serde(rename = "countColumnIndex")]
    pub count_column_index: Option<JSValue>,
}

// All the indices are 1-based in the configuration and 0-based in the code.
impl FileSource {
    pub fn id_column_index_int(&self) -> TallyResult<Option<usize>> {
        read_js_index(&self.id_column_index)
    }

    pub fn count_column_index_int(&self) -> TallyResult<Option<usize>> {
        read_js_index(&self.count_column_index)
    }

    /// The first column with a candidate. By default, the first column after the id and
    /// count columns.
    pub fn first_vote_column_index(&self) -> TallyResult<usize> {
        if let Some(idx) = read_js_index(&self.first_vote_column_index)? {
            return Ok(idx);
        }
        let after_id = self.id_column_index_int()?.map(|x| x + 1).unwrap_or(0);
        let after_count = self.count_column_index_int()?.map(|x| x + 1).unwrap_or(0);
        Ok(std::cmp::max(after_id, after_count))
    }

    /// The first row with a ballot. The rows before (typically a header) are skipped.
    pub fn first_vote_row_index(&self) -> TallyResult<usize> {
        Ok(read_js_index(&self.first_vote_row_index)?.unwrap_or(0))
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionCandidate {
    pub id: CandidateId,
    pub name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct ElectionRules {
    #[serde(rename = "tieBreakMethod")]
    pub tie_break_method: Option<String>,
    #[serde(rename = "minVotesForResult")]
    pub min_votes_for_result: Option<u64>,
    #[serde(rename = "stabilityAnalysis")]
    pub stability_analysis: Option<bool>,
    #[serde(rename = "stabilitySimulations")]
    pub stability_simulations: Option<u32>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<JSValue>,
}

impl ElectionRules {
    pub const DEFAULT_MIN_VOTES_FOR_RESULT: u64 = 3;

    pub fn vote_rules(&self, tie_break_override: &Option<String>) -> TallyResult<VoteRules> {
        let name = tie_break_override
            .as_ref()
            .or(self.tie_break_method.as_ref());
        let tie_break_method = match name {
            Some(n) => n.parse::<TieBreakMethod>().context(InvalidRulesSnafu {})?,
            None => VoteRules::DEFAULT_RULES.tie_break_method,
        };
        Ok(VoteRules { tie_break_method })
    }

    pub fn min_votes_for_result(&self) -> u64 {
        self.min_votes_for_result
            .unwrap_or(Self::DEFAULT_MIN_VOTES_FOR_RESULT)
    }

    pub fn stability_rules(&self, seed_override: Option<u64>) -> TallyResult<StabilityRules> {
        let seed = match seed_override {
            Some(s) => s,
            None if self.random_seed.is_some() => read_js_int(&self.random_seed)? as u64,
            None => StabilityRules::DEFAULT_RULES.seed,
        };
        Ok(StabilityRules {
            simulations: self
                .stability_simulations
                .unwrap_or(StabilityRules::DEFAULT_RULES.simulations),
            seed,
            ..StabilityRules::DEFAULT_RULES
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "ballotSources", default)]
    pub ballot_sources: Vec<FileSource>,
    pub candidates: Option<Vec<ElectionCandidate>>,
    #[serde(default)]
    pub rules: ElectionRules,
}

pub fn read_config(path: &str) -> TallyResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: ElectionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}

pub fn read_summary(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    debug!("read_summary: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

// Indices may be written as numbers or as strings.
fn read_js_int(x: &Option<JSValue>) -> TallyResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {
                value: n.to_string(),
            }),
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu { value: s.clone() }),
        Some(v) => None.context(ParsingJsonNumberSnafu {
            value: v.to_string(),
        }),
        None => None.context(ParsingJsonNumberSnafu {
            value: "(missing)".to_string(),
        }),
    }
}

fn read_js_index(x: &Option<JSValue>) -> TallyResult<Option<usize>> {
    if x.is_none() {
        return Ok(None);
    }
    let idx = read_js_int(x)?;
    ensure!(idx >= 1, ParsingJsonNumberSnafu { value: "0" });
    Ok(Some(idx - 1))
}
