use async_trait::async_trait;
use nordvpn_api::{Country, NordClient, Server, ServerGroup, ServerQuery};

use crate::error::{AuthError, FetchError};
use crate::types::{AccessToken, CountryCode};

/// Source of credentials and server metadata.
///
/// [`NordClient`] is the production implementation.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Exchange an access token for the WireGuard private key.
    async fn private_key(&self, token: &AccessToken) -> nordvpn_api::Result<String>;

    async fn countries(&self) -> nordvpn_api::Result<Vec<Country>>;

    /// Servers matching `query`, in whatever order the provider returns them.
    async fn servers(&self, query: &ServerQuery) -> nordvpn_api::Result<Vec<Server>>;
}

#[async_trait]
impl Catalog for NordClient {
    async fn private_key(&self, token: &AccessToken) -> nordvpn_api::Result<String> {
        Ok(self.credentials(token.expose()).await?.nordlynx_private_key)
    }

    async fn countries(&self) -> nordvpn_api::Result<Vec<Country>> {
        NordClient::countries(self).await
    }

    async fn servers(&self, query: &ServerQuery) -> nordvpn_api::Result<Vec<Server>> {
        self.recommendations(query).await
    }
}

/// Resolve the account's tunnel private key. One request, no retry.
pub async fn resolve_private_key(catalog: &dyn Catalog, token: &AccessToken) -> Result<String, AuthError> {
    match catalog.private_key(token).await {
        Ok(key) if key.trim().is_empty() => Err(AuthError::RequestFailed(
            "credentials response carried an empty private key".into(),
        )),
        Ok(key) => Ok(key),
        Err(e) if e.is_unauthorized() => Err(AuthError::InvalidToken),
        Err(e) => Err(AuthError::RequestFailed(e.to_string())),
    }
}

pub async fn list_countries(catalog: &dyn Catalog) -> Result<Vec<Country>, FetchError> {
    let countries = catalog.countries().await?;
    tracing::debug!(count = countries.len(), "fetched country list");
    Ok(countries)
}

pub fn find_country<'a>(countries: &'a [Country], code: &CountryCode) -> Option<&'a Country> {
    countries
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.as_str()))
}

/// Fetch WireGuard servers and order them by ascending load.
///
/// The sort is stable so equal loads keep the provider's order, which is the
/// order the user sees and picks indices from.
pub async fn list_servers(
    catalog: &dyn Catalog,
    country_id: Option<u32>,
    group: Option<ServerGroup>,
    limit: u32,
) -> Result<Vec<Server>, FetchError> {
    let query = ServerQuery {
        country_id,
        group,
        limit,
    };

    let mut servers = match catalog.servers(&query).await {
        Ok(servers) => servers,
        Err(e) => {
            tracing::error!(error = %e, ?country_id, ?group, "server recommendation request failed");
            return Err(FetchError::ServersUnavailable(e));
        }
    };

    if servers.is_empty() {
        tracing::warn!(?country_id, ?group, "provider returned no servers for this filter");
        return Err(FetchError::NoServers);
    }

    servers.sort_by_key(|s| s.load);
    tracing::info!(count = servers.len(), "fetched servers");
    Ok(servers)
}
