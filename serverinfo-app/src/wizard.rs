//! Interactive CLI setup wizard for first-time configuration
//!
//! Prompts for the metrics endpoint address and polling periods, probes the
//! endpoint once, then saves the configuration.

use anyhow::{Context, Result};
use serverinfo_core::HttpFetcher;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::config::{AppConfig, ApiAddressManager};

const DEFAULT_ADDRESS: &str = "http://127.0.0.1:5000/api/metrics";

pub struct SetupWizard<R, W> {
    input: R,
    output: W,
}

impl SetupWizard<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> SetupWizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the wizard. Returns `true` when the configuration was saved.
    pub async fn run(&mut self, manager: &ApiAddressManager) -> Result<bool> {
        writeln!(self.output)?;
        writeln!(self.output, "🖥️  ======================================")?;
        writeln!(self.output, "   SERVERINFO CONFIGURATION WIZARD")?;
        writeln!(self.output, "🖥️  ======================================")?;
        writeln!(self.output)?;

        let mut config = manager.config();
        self.configure_endpoint(&mut config).await?;
        self.configure_polling(&mut config)?;
        self.display_summary(&config, manager)?;

        if !self.prompt_yes_no("💾 Save this configuration?", true)? {
            writeln!(self.output, "❌ Configuration cancelled.")?;
            return Ok(false);
        }

        manager
            .update(config)
            .await
            .context("Failed to save configuration")?;

        writeln!(self.output)?;
        writeln!(self.output, "✅ Configuration saved successfully!")?;
        writeln!(self.output)?;
        Ok(true)
    }

    async fn configure_endpoint(&mut self, config: &mut AppConfig) -> Result<()> {
        writeln!(self.output, "📡 METRICS ENDPOINT")?;
        writeln!(self.output, "────────────────────────────────────────")?;
        writeln!(self.output, "Full URL of the server's JSON metrics endpoint.")?;
        writeln!(self.output)?;

        let default = if config.has_address() {
            config.api.address.clone()
        } else {
            DEFAULT_ADDRESS.to_string()
        };
        config.api.address = self.prompt_with_default("Endpoint URL", &default)?;

        writeln!(self.output, "🔍 Testing endpoint...")?;
        match probe_endpoint(&config.api.address).await {
            Ok(()) => writeln!(self.output, "✅ Endpoint answered with a metrics document!")?,
            Err(e) => writeln!(
                self.output,
                "⚠️  Endpoint test failed: {} - Configuration will be saved anyway.",
                e
            )?,
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn configure_polling(&mut self, config: &mut AppConfig) -> Result<()> {
        writeln!(self.output, "⏱️  POLLING")?;
        writeln!(self.output, "────────────────────────────────────────")?;

        config.polling.hardware_period_ms = self.prompt_with_default_parse(
            "Hardware screen period (ms)",
            &config.polling.hardware_period_ms.to_string(),
        )?;
        config.polling.system_period_ms = self.prompt_with_default_parse(
            "System screen period (ms)",
            &config.polling.system_period_ms.to_string(),
        )?;

        writeln!(self.output)?;
        Ok(())
    }

    fn display_summary(&mut self, config: &AppConfig, manager: &ApiAddressManager) -> Result<()> {
        writeln!(self.output, "📋 CONFIGURATION SUMMARY")?;
        writeln!(self.output, "────────────────────────────────────────")?;
        writeln!(self.output, "📡 Endpoint: {}", config.api.address)?;
        writeln!(self.output, "🔧 Hardware period: {}ms", config.polling.hardware_period_ms)?;
        writeln!(self.output, "🔧 System period: {}ms", config.polling.system_period_ms)?;
        writeln!(self.output, "📁 File: {}", manager.path().display())?;
        writeln!(self.output)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            anyhow::bail!("Input closed during setup");
        }
        Ok(input.trim().to_string())
    }

    fn prompt_with_default(&mut self, prompt: &str, default: &str) -> Result<String> {
        write!(self.output, "❓ {} [{}]: ", prompt, default)?;
        let input = self.read_line()?;

        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    fn prompt_with_default_parse<T: std::str::FromStr>(
        &mut self,
        prompt: &str,
        default: &str,
    ) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        loop {
            let input = self.prompt_with_default(prompt, default)?;
            match input.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "❌ Invalid input: {}. Please try again.", e)?,
            }
        }
    }

    fn prompt_yes_no(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let default_str = if default { "Y/n" } else { "y/N" };

        loop {
            write!(self.output, "{} [{}]: ", prompt, default_str)?;
            let input = self.read_line()?.to_lowercase();

            if input.is_empty() {
                return Ok(default);
            }

            match input.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "❌ Please enter 'y' or 'n'.")?,
            }
        }
    }
}

async fn probe_endpoint(address: &str) -> Result<()> {
    let fetcher = HttpFetcher::with_timeout(Some(Duration::from_secs(5)))?;
    fetcher.fetch_snapshot(address).await?;
    Ok(())
}
