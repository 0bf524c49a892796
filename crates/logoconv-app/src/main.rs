// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// logoconv — render the built-in logo, write `logo.pgm`, re-read it, and
// write `logo.jpg`.
//
// Entry point. Initialises logging, runs the conversion with the default
// configuration, and turns the first failure into a non-zero exit status.

use std::process::ExitCode;

use logoconv_core::ConversionConfig;
use logoconv_core::human_errors::humanize_error;

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the completion line.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("logoconv starting");

    let config = ConversionConfig::default();
    match logoconv_imaging::convert(&config) {
        Ok(report) => {
            match serde_json::to_string(&report) {
                Ok(json) => tracing::debug!(report = %json, "conversion report"),
                Err(err) => tracing::warn!(error = %err, "conversion report could not be serialized"),
            }
            println!("{}", report.completion_line());
            ExitCode::SUCCESS
        }
        Err(err) => {
            let human = humanize_error(&err);
            tracing::error!(error = %err, kind = ?err.kind(), "conversion failed");
            eprintln!("logoconv: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::from(human.exit_code)
        }
    }
}
