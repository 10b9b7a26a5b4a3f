// Primitives for reading CSV files.

use std::fs::File;
use std::io::Read;

use crate::tally::{
    io_common::{make_default_id, parse_candidate},
    *,
};

pub fn read_csv_ranking(path: &str, cfs: &FileSource) -> TallyResult<Vec<ParsedBallot>> {
    let file = File::open(path).context(OpeningFileSnafu { path })?;
    read_csv_records(file, &make_default_id(path), cfs)
}

/// Reads one ballot per row: every cell after the first vote column is a candidate, in rank order.
pub fn read_csv_records<R: Read>(
    input: R,
    default_id: &dyn Fn(usize) -> String,
    cfs: &FileSource,
) -> TallyResult<Vec<ParsedBallot>> {
    let id_idx_o = cfs.id_column_index_int()?;
    let count_idx_o = cfs.count_column_index_int()?;
    let choices_start_col = cfs.first_vote_column_index()?;
    let first_row = cfs.first_vote_row_index()?;

    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut res: Vec<ParsedBallot> = Vec::new();
    // The rows before the first vote row are skipped.
    for (idx, line_r) in rdr.into_records().enumerate().skip(first_row) {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_records: {:?} {:?}", lineno, line);

        let id = if let Some(id_idx) = id_idx_o {
            line.get(id_idx)
                .context(CsvLineTooShortSnafu {
                    lineno,
                    column: id_idx + 1,
                })?
                .to_string()
        } else {
            default_id(lineno)
        };

        let count: Option<u64> = if let Some(count_idx) = count_idx_o {
            let cell = line.get(count_idx).context(CsvLineTooShortSnafu {
                lineno,
                column: count_idx + 1,
            })?;
            let count = cell
                .trim()
                .parse::<u64>()
                .context(ParsingCountSnafu { lineno, value: cell })?;
            Some(count)
        } else {
            None
        };

        let mut ranking: Vec<CandidateId> = Vec::new();
        for cell in line.iter().skip(choices_start_col) {
            if let Some(cid) = parse_candidate(lineno, cell)? {
                ranking.push(cid);
            }
        }

        res.push(ParsedBallot {
            id: Some(id),
            count,
            ranking,
        });
    }
    Ok(res)
}
