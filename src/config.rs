use clap::Parser;

/// Pre-match football value scanner
#[derive(Parser, Debug, Clone)]
#[command(name = "valuescout", version, about)]
pub struct Config {
    /// API listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Odds / historical data API base URL
    #[arg(
        long,
        env = "ODDS_API_URL",
        default_value = "https://api.oddsprovider.io/v3"
    )]
    pub odds_api_url: String,

    /// Odds API key
    #[arg(long, env = "ODDS_API_KEY")]
    pub odds_api_key: Option<String>,

    /// Upstream response cache TTL in seconds
    #[arg(long, env = "CACHE_TTL_SECS", default_value = "300")]
    pub cache_ttl_secs: u64,

    /// Multiplier applied to the home side's scoring rate
    #[arg(long, env = "HOME_ADVANTAGE", default_value = "1.15")]
    pub home_advantage: f64,

    /// Weight of recent form when blending with head-to-head history
    #[arg(long, env = "FORM_WEIGHT", default_value = "0.7")]
    pub form_weight: f64,

    /// Weight of head-to-head history when blending with recent form
    #[arg(long, env = "H2H_WEIGHT", default_value = "0.3")]
    pub h2h_weight: f64,

    /// How many recent results per team feed the form analysis
    #[arg(long, env = "RECENT_FORM_WINDOW", default_value = "10")]
    pub recent_form_window: usize,

    /// Minimum head-to-head meetings before H2H influences expected goals
    #[arg(long, env = "MIN_H2H_SAMPLE", default_value = "3")]
    pub min_h2h_sample: u32,

    /// Minimum EV percentage for a quote to surface as an opportunity
    #[arg(long, env = "MIN_EV_PERCENT", default_value = "4.0")]
    pub min_ev_percent: f64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.home_advantage < 1.0 || self.home_advantage > 2.0 {
            anyhow::bail!("home_advantage must be between 1.0 and 2.0");
        }
        if !(0.0..=1.0).contains(&self.form_weight) || !(0.0..=1.0).contains(&self.h2h_weight) {
            anyhow::bail!("form_weight and h2h_weight must be between 0.0 and 1.0");
        }
        if (self.form_weight + self.h2h_weight - 1.0).abs() > 1e-9 {
            anyhow::bail!("form_weight and h2h_weight must sum to 1.0");
        }
        if self.recent_form_window == 0 {
            anyhow::bail!("recent_form_window must be at least 1");
        }
        if self.min_ev_percent < 0.0 {
            anyhow::bail!("min_ev_percent must not be negative");
        }
        Ok(())
    }

    /// Extract the subset the pure model layer needs. The model never sees
    /// process-level settings like listen addresses or API keys.
    pub fn model(&self) -> ModelConfig {
        ModelConfig {
            home_advantage: self.home_advantage,
            form_weight: self.form_weight,
            h2h_weight: self.h2h_weight,
            recent_form_window: self.recent_form_window,
            min_h2h_sample: self.min_h2h_sample,
            min_ev_percent: self.min_ev_percent,
        }
    }
}

/// Model parameters, passed explicitly into every core function.
/// Read-only after startup.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub home_advantage: f64,
    pub form_weight: f64,
    pub h2h_weight: f64,
    pub recent_form_window: usize,
    pub min_h2h_sample: u32,
    pub min_ev_percent: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            home_advantage: 1.15,
            form_weight: 0.7,
            h2h_weight: 0.3,
            recent_form_window: 10,
            min_h2h_sample: 3,
            min_ev_percent: 4.0,
        }
    }
}
