use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use nordgen_core::output::DEFAULT_OUTPUT_DIR;
use nordgen_core::render::{DEFAULT_ADDRESS, DEFAULT_DNS, DEFAULT_KEEPALIVE, DEFAULT_LISTEN_PORT};
use nordvpn_api::ServerGroup;

/// Generate WireGuard configs for NordVPN servers
#[derive(Debug, Parser)]
#[command(
    name = "nordgen",
    version,
    about = "Generate WireGuard configs for NordVPN servers",
    after_help = "Selection expressions:\n  \
        <empty>      the 3 least loaded servers\n  \
        best N       the N least loaded servers\n  \
        all          every listed server\n  \
        1,3,5        servers by their position in the table\n\n\
        Examples:\n  \
        nordgen --token $TOKEN --country US --select 'best 2'\n  \
        nordgen --country DE --group p2p --limit 20\n  \
        nordgen --list-countries"
)]
pub struct Cli {
    /// NordVPN access token
    #[arg(short, long, env = "NORDVPN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Two-letter country code, e.g. US
    #[arg(short, long)]
    pub country: Option<String>,

    /// Restrict to a server group
    #[arg(short, long, value_enum)]
    pub group: Option<GroupArg>,

    /// How many servers to fetch
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: u32,

    /// Selection expression; prompts when omitted and stdin is a terminal
    #[arg(short, long)]
    pub select: Option<String>,

    /// DNS servers written into the [Interface] block
    #[arg(long, default_value = DEFAULT_DNS)]
    pub dns: String,

    /// Client tunnel address
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// Peer endpoint port
    #[arg(long, default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// PersistentKeepalive interval in seconds
    #[arg(long, default_value_t = DEFAULT_KEEPALIVE)]
    pub keepalive: u32,

    /// Directory the .conf files are written to
    #[arg(short, long, env = "NORDGEN_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Print the available countries and exit
    #[arg(long)]
    pub list_countries: bool,

    /// API base URL
    #[arg(long, env = "NORDVPN_API_URL", hide = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = nordvpn_api::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupArg {
    Standard,
    P2p,
    DoubleVpn,
    Obfuscated,
    Onion,
    DedicatedIp,
}

impl From<GroupArg> for ServerGroup {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Standard => Self::Standard,
            GroupArg::P2p => Self::P2p,
            GroupArg::DoubleVpn => Self::DoubleVpn,
            GroupArg::Obfuscated => Self::Obfuscated,
            GroupArg::Onion => Self::OnionOverVpn,
            GroupArg::DedicatedIp => Self::DedicatedIp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn group_args_map_to_api_identifiers() {
        let cli = Cli::try_parse_from(["nordgen", "--group", "onion"]).unwrap();
        let group = ServerGroup::from(cli.group.unwrap());
        assert_eq!(group.identifier(), "legacy_onion_over_vpn");

        assert_eq!(
            ServerGroup::from(GroupArg::DedicatedIp).identifier(),
            "legacy_dedicated_ip"
        );
    }

    #[test]
    fn timeout_defaults_to_client_default() {
        let cli = Cli::try_parse_from(["nordgen"]).unwrap();
        assert_eq!(cli.timeout_secs, nordvpn_api::DEFAULT_TIMEOUT.as_secs());
    }

    #[test]
    fn parses_full_invocation() {
        let cli = Cli::try_parse_from([
            "nordgen", "--token", "abc", "-c", "us", "-g", "double-vpn", "-n", "5", "-s", "best 2",
        ])
        .unwrap();

        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert_eq!(cli.country.as_deref(), Some("us"));
        assert_eq!(cli.group, Some(GroupArg::DoubleVpn));
        assert_eq!(cli.limit, 5);
        assert_eq!(cli.select.as_deref(), Some("best 2"));
        assert_eq!(cli.port, 51820);
        assert_eq!(cli.keepalive, 25);
    }
}
