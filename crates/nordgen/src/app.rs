use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use nordgen_core::{
    Catalog, CountryCode, ValidationError, find_country, list_countries, list_servers, render,
    resolve_private_key, select, write_configs,
};
use nordvpn_api::{Country, Server};

use crate::config::GenerateConfig;
use crate::error::AppError;

/// Print the provider's country list.
pub async fn run_list_countries(catalog: &dyn Catalog, out: &mut dyn Write) -> Result<(), AppError> {
    let mut countries = list_countries(catalog).await?;
    countries.sort_by(|a, b| a.name.cmp(&b.name));
    out.write_all(country_table(&countries).as_bytes())?;
    Ok(())
}

/// Resolve, fetch, select, render and write.
///
/// `ask` is only consulted when no selection was given up front. Returns the
/// paths written.
pub async fn run_generate(
    config: &GenerateConfig,
    catalog: &dyn Catalog,
    out: &mut dyn Write,
    ask: &mut dyn FnMut() -> std::io::Result<String>,
    now: DateTime<Utc>,
) -> Result<Vec<PathBuf>, AppError> {
    let private_key = resolve_private_key(catalog, &config.token).await?;
    tracing::info!("resolved wireguard private key");

    let country_id = resolve_country(catalog, config.country.as_ref()).await?;
    let servers = list_servers(catalog, country_id, config.group, config.limit).await?;

    out.write_all(server_table(&servers).as_bytes())?;

    let expr = match &config.selection {
        Some(expr) => expr.clone(),
        None => ask()?,
    };
    let chosen = select(&servers, &expr)?;
    tracing::info!(count = chosen.len(), expr = %expr.trim(), "servers selected");

    let configs: Vec<_> = chosen
        .into_iter()
        .map(|server| render(&private_key, server, &config.render, now))
        .collect();

    let paths = write_configs(&config.output_dir, &configs)?;
    for path in &paths {
        writeln!(out, "wrote {}", path.display())?;
    }
    Ok(paths)
}

/// Map a country code to the provider's id.
///
/// An unreachable country list is not fatal: the run continues with the
/// provider's recommendations for all countries.
async fn resolve_country(
    catalog: &dyn Catalog,
    code: Option<&CountryCode>,
) -> Result<Option<u32>, AppError> {
    let Some(code) = code else {
        return Ok(None);
    };

    match list_countries(catalog).await {
        Ok(countries) => match find_country(&countries, code) {
            Some(country) => {
                tracing::info!(code = %code, id = country.id, name = %country.name, "resolved country");
                Ok(Some(country.id))
            }
            None => Err(ValidationError::UnknownCountry(code.to_string()).into()),
        },
        Err(e) => {
            tracing::warn!(
                error = %e,
                code = %code,
                "could not fetch country list, falling back to recommended servers"
            );
            Ok(None)
        }
    }
}

fn server_table(servers: &[Server]) -> String {
    let host_w = servers.iter().map(|s| s.hostname.len()).max().unwrap_or(0).max(8);
    let city_w = servers.iter().map(|s| s.city.chars().count()).max().unwrap_or(0).max(4);

    let mut table = format!("{:>3}  {:<host_w$}  {:<city_w$}  {:>4}\n", "#", "Hostname", "City", "Load");
    for (i, s) in servers.iter().enumerate() {
        table.push_str(&format!(
            "{:>3}  {:<host_w$}  {:<city_w$}  {:>3}%\n",
            i + 1,
            s.hostname,
            s.city,
            s.load
        ));
    }
    table
}

fn country_table(countries: &[Country]) -> String {
    let mut table = String::from("Code  Name\n");
    for c in countries {
        table.push_str(&format!("{:<4}  {}\n", c.code, c.name));
    }
    table
}
