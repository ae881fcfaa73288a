use super::Parser;

#[derive(Parser, Debug)]
#[command(about = "Friendship tiers and affinity for the city")]
pub struct Cli {
    /// Path to a settings TOML file
    #[arg(long)]
    pub settings: Option<String>,
}
