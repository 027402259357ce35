use std::path::PathBuf;
use std::time::Duration;

use nordgen_core::{AccessToken, CountryCode, RenderOptions, ValidationError};
use nordvpn_api::ServerGroup;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub timeout: Duration,
    pub mode: Mode,
}

#[derive(Debug, Clone)]
pub enum Mode {
    ListCountries,
    Generate(GenerateConfig),
}

/// Everything a config-generation run needs, already validated.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub token: AccessToken,
    pub country: Option<CountryCode>,
    pub group: Option<ServerGroup>,
    pub limit: u32,
    /// `None` means ask the user after showing the server table.
    pub selection: Option<String>,
    pub render: RenderOptions,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ValidationError> {
        let mode = if cli.list_countries {
            Mode::ListCountries
        } else {
            let token = AccessToken::parse(cli.token.as_deref().unwrap_or_default())?;
            let country: Option<CountryCode> = cli.country.as_deref().map(str::parse).transpose()?;
            if cli.limit == 0 {
                return Err(ValidationError::ZeroLimit);
            }

            Mode::Generate(GenerateConfig {
                token,
                country,
                group: cli.group.map(ServerGroup::from),
                limit: cli.limit,
                selection: cli.select,
                render: RenderOptions {
                    dns: cli.dns,
                    address: cli.address,
                    listen_port: cli.port,
                    keepalive: cli.keepalive,
                },
                output_dir: cli.output_dir,
            })
        };

        Ok(Self {
            api_url: cli.api_url.filter(|u| !u.trim().is_empty()),
            timeout: Duration::from_secs(cli.timeout_secs),
            mode,
        })
    }
}
