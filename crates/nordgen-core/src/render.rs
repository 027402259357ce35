use chrono::{DateTime, Utc};
use nordvpn_api::Server;

pub const DEFAULT_DNS: &str = "103.86.96.100";
pub const DEFAULT_ADDRESS: &str = "10.5.0.2/32";
pub const DEFAULT_LISTEN_PORT: u16 = 51820;
pub const DEFAULT_KEEPALIVE: u32 = 25;

const ALLOWED_IPS: &str = "0.0.0.0/0, ::/0";

/// Per-run settings shared by every rendered config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub dns: String,
    /// Client tunnel address for the `[Interface]` block.
    pub address: String,
    /// Port used in the peer `Endpoint`.
    pub listen_port: u16,
    pub keepalive: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dns: DEFAULT_DNS.into(),
            address: DEFAULT_ADDRESS.into(),
            listen_port: DEFAULT_LISTEN_PORT,
            keepalive: DEFAULT_KEEPALIVE,
        }
    }
}

/// A WireGuard config document for one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfig<'a> {
    pub text: String,
    /// File-system safe base name, without extension.
    pub name: String,
    pub server: &'a Server,
}

impl RenderedConfig<'_> {
    pub fn file_name(&self) -> String {
        format!("{}.conf", self.name)
    }
}

/// Render the config for `server`.
///
/// A server without a `wireguard_udp` public key yields an empty `PublicKey`
/// line and a warning rather than an error.
pub fn render<'a>(
    private_key: &str,
    server: &'a Server,
    opts: &RenderOptions,
    generated_at: DateTime<Utc>,
) -> RenderedConfig<'a> {
    let public_key = server.wireguard_public_key().unwrap_or_else(|| {
        tracing::warn!(
            hostname = %server.hostname,
            "server has no wireguard public key, leaving PublicKey empty"
        );
        ""
    });

    let text = format!(
        "\
# NordVPN WireGuard configuration
# Server: {hostname} ({station})
# Location: {city}, {country}
# Load: {load}%
# Generated: {generated}

[Interface]
PrivateKey = {private_key}
Address = {address}
DNS = {dns}

[Peer]
PublicKey = {public_key}
AllowedIPs = {ALLOWED_IPS}
Endpoint = {station}:{port}
PersistentKeepalive = {keepalive}
",
        hostname = server.hostname,
        station = server.station,
        city = server.city,
        country = server.country,
        load = server.load,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        address = opts.address,
        dns = opts.dns,
        port = opts.listen_port,
        keepalive = opts.keepalive,
    );

    RenderedConfig {
        text,
        name: safe_name(&server.country, &server.city, &server.hostname),
        server,
    }
}

/// `country-city-hostname`, whitespace runs turned into `_` and anything
/// outside `[A-Za-z0-9_.-]` dropped.
///
/// Distinct servers may map to the same name; nothing here disambiguates them.
pub fn safe_name(country: &str, city: &str, hostname: &str) -> String {
    let joined = format!("{country}-{city}-{hostname}");

    let mut out = String::with_capacity(joined.len());
    let mut in_space = false;
    for c in joined.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            out.push(c);
        }
    }
    out
}
