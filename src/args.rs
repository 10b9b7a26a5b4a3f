use clap::Parser;

/// This is a Condorcet election tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the election configuration, in JSON.
    /// For more information about the file format, read the documentation of the condorcet_voting::manual module.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the summary of an election in JSON format. If provided, condorcet will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. Otherwise it is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, the ballots are read from this file. Setting this option overrides the
    /// ballot sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or json. See documentation for all the input types.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of comma-separated candidate identifiers or not specified) If specified, the declared candidates. Otherwise
    /// the candidates come from the configuration, or from the ballots in order of appearance.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub candidates: Option<Vec<u32>>,

    /// (margin, copeland or borda) The method that orders the candidates when no Condorcet winner exists.
    /// Overrides the method of the configuration. The default is margin.
    #[clap(long, value_parser)]
    pub tie_break: Option<String>,

    /// If passed as an argument, runs the stability analysis on random subsets of the ballots.
    #[clap(long, takes_value = false)]
    pub stability: bool,

    /// (integer) The seed of the stability analysis.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
