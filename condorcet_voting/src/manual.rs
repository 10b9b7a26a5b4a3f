/*!

This is the long-form manual for `condorcet_voting` and `condorcet`.

## The election

Every voter submits a ranking of candidates, most preferred first. Rankings may be partial:
a candidate that does not appear on a ballot is not compared with anybody on that ballot.
Candidates are identified by positive integers.

The election proceeds as follows:
1. The ballots are validated: every candidate must be declared, and may appear at most once per ballot.
2. For every pair of candidates, the ballots that rank one strictly ahead of the other are counted.
3. The Condorcet winner is the candidate that beats every other candidate head to head.
   A single tie is enough to prevent a candidate from winning.
4. The Smith set is computed by removing, pass after pass, the candidates beaten by all the others.
5. The full ranking is built by taking out the Condorcet winner of the remaining candidates,
   again and again. When no winner exists (a Condorcet paradox), the remaining candidates are
   ordered with the tie breaking method and the ranking is complete.
6. Neighbours in the ranking whose head-to-head margin is at most 1 vote are reported as ties.

## Tie breaking methods

* `margin` (default) the minimax method: the candidate with the smallest worst defeat comes first.
* `copeland` the number of head-to-head victories minus the number of defeats.
* `borda` each ballot of length `n` gives `n - 1` points to its first candidate, `n - 2` to the
  second one, and so on.

Candidates with the same score keep their declared order.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values (default)
* `json` JSON arrays of rankings

### csv

Each row is a ballot. Each column (in order) is a rank, and each cell holds the identifier of a candidate.
Empty cells are skipped.

```text
id,count,choice 1,choice 2,choice 3
v1,20,1,2,3
v2,5,3,,1
```

The `id` and `count` columns are optional. Headers in the first row are optional.
See the [Configuration section](#configuration) on controlling the optional rows and columns.

### json

An array of ballots. A ballot is either a ranking, or an object with a ranking and optionally an
identifier and a count:

```text
[
  [1, 2, 3],
  {"id": "v2", "count": 5, "ranking": [3, 1]}
]
```

Ballots with a count of 0 or with an empty ranking are ignored.

## Configuration

The program accepts a configuration file in JSON. All the fields are optional.

```text
{
  "outputSettings": {
    "contestName": "Weekend activity",
    "contestDate": "2024-05-04"
  },
  "ballotSources": [
    {"provider": "csv", "filePath": "ballots.csv", "idColumnIndex": 1, "countColumnIndex": 2, "firstVoteRowIndex": 2}
  ],
  "candidates": [{"id": 1, "name": "Hiking"}, {"id": 2, "name": "Museum"}, {"id": 3}],
  "rules": {
    "tieBreakMethod": "margin",
    "minVotesForResult": 3,
    "stabilityAnalysis": true,
    "stabilitySimulations": 100,
    "randomSeed": 42
  }
}
```

Ballot sources:
 - `provider`: `csv` or `json`.
 - `filePath`: relative to the directory of the configuration file.
 - `idColumnIndex`, `countColumnIndex` (number or string, optional, starting at 1): the columns with
   the identifier and the count of the ballot. If no count is provided, every ballot counts once.
 - `firstVoteColumnIndex` (starting at 1): the first column with a candidate. By default, the first
   column after the id and count columns.
 - `firstVoteRowIndex` (starting at 1): the first row with a ballot.

Candidates: when they are not provided (in the configuration or with `--candidates`), the candidates
are all the identifiers found on the ballots, in order of appearance.

Rules:
 - `minVotesForResult` (default 3): elections with fewer ballots are still tabulated, but the
   summary is marked with `belowMinimumVotes`.
 - `stabilityAnalysis`: re-runs the election many times, each time leaving out 10% of the
   ballots at random, and reports how often the winner and the ranking stay the same.
   The draws only depend on `randomSeed`.

The command line options `--input`, `--input-type`, `--candidates`, `--tie-break`, `--stability`
and `--seed` override the configuration.

## Summary

The summary is a JSON object with the fields `config`, `results` and, if requested, `stability`.
The pairwise counts are in `results.pairwiseComparisons`: `pairwiseComparisons["1"]["2"]` is the
number of ballots that rank candidate 1 ahead of candidate 2. The margins follow the same layout.

 */
