use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::environment::{get_env_var_parsed, get_env_var_string};
use crate::error::PipelineError;

pub const DEFAULT_SIM_THRESHOLD: f64 = 0.5;
pub const DEFAULT_INPUT_DIR: &str = "MC1/News Articles";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const ENV_INPUT: &str = "PROVENANCE_INPUT";
pub const ENV_OUTPUT: &str = "PROVENANCE_OUTPUT";
pub const ENV_SIM_THRESHOLD: &str = "PROVENANCE_SIM_THRESHOLD";
pub const ENV_THREADS: &str = "PROVENANCE_THREADS";

/// Inverse document frequency variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IdfFormula {
    /// `1 + ln(N / (1 + df))`; stays above zero for any `df <= N`, so terms
    /// shared by every document (verbatim reprints) still count.
    #[default]
    Natural,
    /// `ln(N / df)`; terms present in every document weigh zero.
    Plain,
    /// `ln((1 + N) / (1 + df)) + 1`; every term keeps a positive weight.
    Smooth,
}

impl IdfFormula {
    pub fn idf(self, n_docs: usize, doc_freq: usize) -> f64 {
        let n = n_docs as f64;
        let df = doc_freq as f64;
        match self {
            IdfFormula::Natural => 1.0 + (n / (1.0 + df)).ln(),
            IdfFormula::Plain => (n / df).ln(),
            IdfFormula::Smooth => ((1.0 + n) / (1.0 + df)).ln() + 1.0,
        }
    }
}

impl fmt::Display for IdfFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdfFormula::Natural => write!(f, "natural"),
            IdfFormula::Plain => write!(f, "plain"),
            IdfFormula::Smooth => write!(f, "smooth"),
        }
    }
}

/// Everything a single pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub threshold: f64,
    pub idf: IdfFormula,
    pub stem: bool,
    // 0 leaves the rayon global pool at its default size
    pub threads: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            threshold: DEFAULT_SIM_THRESHOLD,
            idf: IdfFormula::default(),
            stem: false,
            threads: 0,
        }
    }
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Defaults overlaid with whatever `PROVENANCE_*` variables are set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            input_dir: get_env_var_string(ENV_INPUT)
                .map(PathBuf::from)
                .unwrap_or(defaults.input_dir),
            output_dir: get_env_var_string(ENV_OUTPUT)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            threshold: get_env_var_parsed(ENV_SIM_THRESHOLD).unwrap_or(defaults.threshold),
            threads: get_env_var_parsed(ENV_THREADS).unwrap_or(defaults.threads),
            ..defaults
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_idf(mut self, idf: IdfFormula) -> Self {
        self.idf = idf;
        self
    }

    pub fn with_stemming(mut self, enabled: bool) -> Self {
        self.stem = enabled;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(PipelineError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let config = PipelineConfig::default();
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.idf, IdfFormula::Natural);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_validation() {
        assert!(PipelineConfig::default().with_threshold(0.0).validate().is_ok());
        assert!(PipelineConfig::default().with_threshold(1.0).validate().is_ok());
        assert!(PipelineConfig::default().with_threshold(1.01).validate().is_err());
        assert!(PipelineConfig::default().with_threshold(-0.1).validate().is_err());
        assert!(PipelineConfig::default()
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_env_overrides_defaults_and_builder_overrides_env() {
        // Only test in this binary that touches these variables.
        std::env::set_var(ENV_SIM_THRESHOLD, "0.35");
        std::env::set_var(ENV_THREADS, "3");
        let config = PipelineConfig::from_env();
        assert_eq!(config.threshold, 0.35);
        assert_eq!(config.threads, 3);
        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));

        let config = PipelineConfig::from_env().with_threshold(0.8);
        assert_eq!(config.threshold, 0.8);
        assert_eq!(config.threads, 3);

        std::env::set_var(ENV_SIM_THRESHOLD, "not-a-number");
        assert_eq!(PipelineConfig::from_env().threshold, DEFAULT_SIM_THRESHOLD);

        std::env::remove_var(ENV_SIM_THRESHOLD);
        std::env::remove_var(ENV_THREADS);
        let config = PipelineConfig::from_env();
        assert_eq!(config.threshold, DEFAULT_SIM_THRESHOLD);
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn test_idf_formulas() {
        // term in every document
        assert_eq!(IdfFormula::Plain.idf(4, 4), 0.0);
        assert!(IdfFormula::Smooth.idf(4, 4) > 0.0);
        assert!((IdfFormula::Plain.idf(4, 1) - 4f64.ln()).abs() < 1e-12);
        assert!((IdfFormula::Smooth.idf(4, 1) - (2.5f64.ln() + 1.0)).abs() < 1e-12);
        assert!((IdfFormula::Natural.idf(4, 1) - (1.0 + 2f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_natural_idf_is_positive_for_shared_terms() {
        for n in 1..50 {
            assert!(IdfFormula::Natural.idf(n, n) > 0.0, "n = {}", n);
        }
        assert!((IdfFormula::Natural.idf(3, 2) - 1.0).abs() < 1e-12);
    }
}
