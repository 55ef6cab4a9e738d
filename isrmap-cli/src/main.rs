use clap::Parser;
use isrmap::io::{match_map_path, read_scan, write_match_map, ScanColumns, DEFAULT_OUT_FILE};
use isrmap::{
    format_isr_line, IsrConfig, IsrError, IsrMatcher, Modality, Symmetry, DEFAULT_DEVIATION_DEG,
};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "EBSD indexing success rate (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    comparison_path: String,
    reference_path: String,
    modality: String,
    symmetry: String,
    quality_column: Option<usize>,
    deviation: f64,
    out_path: String,
    out_file: String,
    parallel: bool,
    progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comparison_path: String::new(),
            reference_path: String::new(),
            modality: Modality::default().to_string(),
            symmetry: Symmetry::default().to_string(),
            quality_column: None,
            deviation: DEFAULT_DEVIATION_DEG,
            out_path: ".".to_string(),
            out_file: DEFAULT_OUT_FILE.to_string(),
            parallel: false,
            progress: false,
        }
    }
}

/// Library settings resolved from the config, checked before any scan is read.
#[derive(Debug)]
struct Settings {
    isr: IsrConfig,
    modality: Modality,
    symmetry: Symmetry,
    columns: ScanColumns,
}

impl Config {
    fn resolve(&self) -> Result<Settings, IsrError> {
        let modality: Modality = self.modality.parse()?;
        let symmetry: Symmetry = self.symmetry.parse()?;
        let isr = IsrConfig {
            deviation_deg: self.deviation,
            parallel: self.parallel,
            report_progress: self.progress,
        };
        isr.validate()?;

        let mut columns = ScanColumns::for_modality(modality);
        if let Some(col) = self.quality_column {
            columns.quality = col;
        }
        Ok(Settings {
            isr,
            modality,
            symmetry,
            columns,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;

    if cli.trace || config.progress {
        let directive = if config.progress {
            "isrmap=debug"
        } else {
            "isrmap=info"
        };
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
            .with_target(false)
            .init();
    }

    if config.comparison_path.is_empty() || config.reference_path.is_empty() {
        return Err("comparison_path and reference_path must be set in the config".into());
    }
    let settings = config.resolve()?;
    let modality = settings.modality;

    tracing::info!(%modality, quality_field = modality.quality_field().as_str(), "loading scans");
    let comparison = read_scan(&config.comparison_path, settings.columns, settings.symmetry)?;
    let reference = read_scan(&config.reference_path, settings.columns, settings.symmetry)?;

    let report = IsrMatcher::new(settings.isr).run(
        &comparison.orientations,
        &comparison.quality,
        &reference.orientations,
        &modality,
    )?;

    let out = match_map_path(&config.out_path, &config.out_file);
    write_match_map(&out, &report.matches)?;

    println!("{}", format_isr_line(report.isr));
    tracing::info!(path = %out.display(), matched = report.matched, skipped = report.skipped, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> Config {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults_resolve_to_ang_cubic_five_degrees() {
        let settings = config("{}").resolve().unwrap();
        assert_eq!(settings.modality, Modality::Ang);
        assert_eq!(settings.symmetry, Symmetry::Cubic);
        assert_eq!(settings.isr.deviation_deg, 5.0);
        assert!(!settings.isr.parallel);
        assert_eq!(settings.columns, ScanColumns::for_modality(Modality::Ang));
    }

    #[test]
    fn quality_column_overrides_modality_default() {
        let settings = config(r#"{"modality": "astro", "quality_column": 9}"#)
            .resolve()
            .unwrap();
        assert_eq!(settings.modality, Modality::Astro);
        assert_eq!(settings.columns.quality, 9);
        assert_eq!(settings.columns.x, 3);

        let settings = config(r#"{"modality": "astro"}"#).resolve().unwrap();
        assert_eq!(
            settings.columns.quality,
            Modality::Astro.default_quality_column()
        );
    }

    #[test]
    fn unknown_modality_is_rejected_before_reading_scans() {
        // The scan paths do not exist; resolution must fail first.
        let cfg = config(
            r#"{"comparison_path": "missing/a.ang", "reference_path": "missing/b.ang", "modality": "ctf"}"#,
        );
        assert!(matches!(
            cfg.resolve(),
            Err(IsrError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn bad_deviation_and_symmetry_are_rejected() {
        for json in [
            r#"{"deviation": 0.0}"#,
            r#"{"deviation": -2.5}"#,
            r#"{"symmetry": "tetragonal"}"#,
        ] {
            assert!(
                matches!(config(json).resolve(), Err(IsrError::InvalidConfiguration { .. })),
                "{json}"
            );
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"devation": 3.0}"#).is_err());
    }

    #[test]
    fn example_config_resolves() {
        let settings = config(EXAMPLE_JSON).resolve().unwrap();
        assert_eq!(settings.modality, Modality::Ang);
    }

    #[test]
    fn summary_line_matches_console_format() {
        assert_eq!(format_isr_line(0.873_449), "ISR_RK = 0.8734");
    }
}
