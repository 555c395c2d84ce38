use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kira_stainscheme::EngineConfig;
use kira_stainscheme::ScoreParsePolicy;
use kira_stainscheme::scheme::SearchLimits;

#[derive(Debug, Parser)]
#[command(
    name = "kira-stainscheme",
    version,
    about = "Generate and rank flow-cytometry staining schemes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate ranked staining schemes for a selection of antibodies.
    Run(RunArgs),
    /// Print the antibodies available in a library table.
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Library table: header row, then `spectrum,channel,antibody` rows.
    #[arg(long)]
    pub library: PathBuf,
    /// Similarity table: `spectrum_a,spectrum_b,score` rows, no header.
    #[arg(long)]
    pub similarity: Option<PathBuf>,
    /// Antibody to include in the panel. Repeatable.
    #[arg(long = "select", value_name = "ANTIBODY")]
    pub select: Vec<String>,
    /// Include every antibody in the library.
    #[arg(long)]
    pub select_all: bool,
    /// Directory for schemes.txt, schemes.json and summary.json.
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print at most this many schemes.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Stop enumerating after this many schemes. Ranking then covers only
    /// those schemes, in enumeration order, so the best one shown may not be
    /// the best overall.
    #[arg(long)]
    pub max_schemes: Option<usize>,
    /// How to treat similarity scores that are not numbers.
    #[arg(long, value_enum, default_value_t = ScoreParsePolicy::Zero)]
    pub unparsable_score: ScoreParsePolicy,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub library: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub library: PathBuf,
    pub similarity: Option<PathBuf>,
    pub select: Vec<String>,
    pub select_all: bool,
    pub out_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub limit: Option<usize>,
    pub engine: EngineConfig,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        Self {
            library: args.library,
            similarity: args.similarity,
            select: args.select,
            select_all: args.select_all,
            out_dir: args.out,
            format: args.format,
            limit: args.limit,
            engine: EngineConfig {
                score_policy: args.unparsable_score,
                limits: SearchLimits {
                    max_schemes: args.max_schemes,
                },
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
