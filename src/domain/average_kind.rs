use strum_macros::{Display, EnumIter};

/// Which moving average the crossover rule is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, clap::ValueEnum)]
pub enum AverageKind {
    #[strum(serialize = "SMA")]
    #[value(name = "sma", alias = "simple")]
    Simple,
    #[strum(serialize = "EMA")]
    #[value(name = "ema", alias = "exponential")]
    Exponential,
}

impl AverageKind {
    pub fn long_name(&self) -> &'static str {
        match self {
            AverageKind::Simple => "Simple Moving Average",
            AverageKind::Exponential => "Exponential Moving Average",
        }
    }

    /// Simple averages have no value until `window` observations are in.
    pub fn needs_full_warm_up(&self) -> bool {
        matches!(self, AverageKind::Simple)
    }
}
