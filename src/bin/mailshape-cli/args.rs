use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "mailshape-cli", version, about = "Vérifie la forme syntaxique d'adresses e-mail")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// écrit le rapport dans un fichier (json/ndjson/csv)
    #[arg(long)]
    pub out: Option<String>,

    /// format de sortie
    #[arg(long, value_enum, default_value_t = Format::Human)]
    pub format: Format,

    /// logs de debug sur stderr (feature `with-tracing`)
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    Validate {
        /// adresse à vérifier
        email: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
    Ndjson,
    Csv,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }
}
