use clap::{Args, Parser, Subcommand};
use holdem_engine::player::Difficulty;

#[derive(Parser, Debug)]
#[command(name = "holdem", version, about = "Texas Hold'em tables in the terminal")]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a bots-only table and print what happened
    Sim(SimArgs),
    /// Sit at a table against bots, reading actions from stdin
    Play(PlayArgs),
    /// Rank 5 to 7 cards, or rate two hole cards
    Eval {
        /// Card codes such as As Kd 7h
        #[arg(required = true, num_args = 2..=7)]
        cards: Vec<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Args, Debug, Clone)]
pub struct SimArgs {
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=10))]
    pub seats: u8,
    #[arg(long, default_value_t = 50)]
    pub hands: u32,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Overrides the configured difficulty for every bot
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
    /// Write the JSONL hand history here
    #[arg(long)]
    pub output: Option<String>,
    /// Print only the final standings
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub bots: u8,
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
    #[arg(long, default_value_t = 10)]
    pub hands: u32,
    #[arg(long, default_value = "you")]
    pub name: String,
    #[arg(long)]
    pub seed: Option<u64>,
}
