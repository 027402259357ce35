use serde::Deserialize;

use crate::WIREGUARD_TECHNOLOGY;

// ── Credentials ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub nordlynx_private_key: String,
}

// ── Countries ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub id: u32,
    pub code: String,
    pub name: String,
}

// ── Servers ─────────────────────────────────────────────────────────

/// A recommended server, flattened from the API's nested location records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ServerRecord")]
pub struct Server {
    pub hostname: String,
    /// IPv4 literal the tunnel endpoint points at.
    pub station: String,
    /// Utilisation in percent, lower is better.
    pub load: u32,
    pub city: String,
    pub country: String,
    pub technologies: Vec<Technology>,
}

impl Server {
    /// Peer public key advertised under the `wireguard_udp` technology.
    pub fn wireguard_public_key(&self) -> Option<&str> {
        self.technologies
            .iter()
            .find(|t| t.identifier == WIREGUARD_TECHNOLOGY)
            .and_then(|t| t.metadata_value("public_key"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Technology {
    pub identifier: String,
    #[serde(default)]
    pub metadata: Vec<Metadata>,
}

impl Technology {
    pub fn metadata_value(&self, name: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub value: String,
}

#[derive(Deserialize)]
struct ServerRecord {
    hostname: String,
    station: String,
    load: u32,
    #[serde(default)]
    locations: Vec<LocationRecord>,
    #[serde(default)]
    technologies: Vec<Technology>,
}

#[derive(Deserialize)]
struct LocationRecord {
    country: LocationCountry,
}

#[derive(Deserialize)]
struct LocationCountry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: Option<LocationCity>,
}

#[derive(Deserialize)]
struct LocationCity {
    #[serde(default)]
    name: String,
}

impl From<ServerRecord> for Server {
    fn from(record: ServerRecord) -> Self {
        let (country, city) = match record.locations.into_iter().next() {
            Some(loc) => {
                let city = loc.country.city.map(|c| c.name).unwrap_or_default();
                (loc.country.name, city)
            }
            None => (String::new(), String::new()),
        };

        Self {
            hostname: record.hostname,
            station: record.station,
            load: record.load,
            city,
            country,
            technologies: record.technologies,
        }
    }
}

// ── Recommendation query ────────────────────────────────────────────

/// Provider server groups that can narrow a recommendation query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerGroup {
    Standard,
    P2p,
    DoubleVpn,
    Obfuscated,
    OnionOverVpn,
    DedicatedIp,
}

impl ServerGroup {
    /// Identifier the API expects in `filters[servers_groups][identifier]`.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Standard => "legacy_standard",
            Self::P2p => "legacy_p2p",
            Self::DoubleVpn => "legacy_double_vpn",
            Self::Obfuscated => "legacy_obfuscated_servers",
            Self::OnionOverVpn => "legacy_onion_over_vpn",
            Self::DedicatedIp => "legacy_dedicated_ip",
        }
    }
}

/// Filters for `GET /servers/recommendations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerQuery {
    pub country_id: Option<u32>,
    pub group: Option<ServerGroup>,
    pub limit: u32,
}

impl ServerQuery {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = vec![(
            "filters[servers_technologies][identifier]",
            WIREGUARD_TECHNOLOGY.to_string(),
        )];
        if let Some(id) = self.country_id {
            query.push(("filters[country_id]", id.to_string()));
        }
        if let Some(g) = self.group {
            query.push(("filters[servers_groups][identifier]", g.identifier().to_string()));
        }
        query.push(("limit", self.limit.to_string()));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_JSON: &str = r#"{
        "id": 929912,
        "name": "United States #1234",
        "station": "192.0.2.10",
        "hostname": "us1234.nordvpn.com",
        "load": 12,
        "status": "online",
        "locations": [
            {
                "id": 1,
                "country": {
                    "id": 228,
                    "name": "United States",
                    "code": "US",
                    "city": { "id": 8971718, "name": "New York" }
                }
            }
        ],
        "technologies": [
            { "id": 3, "identifier": "openvpn_udp", "metadata": [] },
            {
                "id": 35,
                "identifier": "wireguard_udp",
                "metadata": [ { "name": "public_key", "value": "abcPUBLICKEY=" } ]
            }
        ]
    }"#;

    #[test]
    fn server_flattens_location() {
        let server: Server = serde_json::from_str(SERVER_JSON).unwrap();

        assert_eq!(server.hostname, "us1234.nordvpn.com");
        assert_eq!(server.station, "192.0.2.10");
        assert_eq!(server.load, 12);
        assert_eq!(server.country, "United States");
        assert_eq!(server.city, "New York");
        assert_eq!(server.technologies.len(), 2);
    }

    #[test]
    fn public_key_comes_from_wireguard_entry() {
        let server: Server = serde_json::from_str(SERVER_JSON).unwrap();
        assert_eq!(server.wireguard_public_key(), Some("abcPUBLICKEY="));
    }

    #[test]
    fn public_key_absent_without_wireguard_entry() {
        let json = r#"{
            "hostname": "de100.nordvpn.com",
            "station": "198.51.100.7",
            "load": 40,
            "technologies": [
                { "identifier": "openvpn_tcp", "metadata": [ { "name": "public_key", "value": "nope" } ] }
            ]
        }"#;
        let server: Server = serde_json::from_str(json).unwrap();

        assert_eq!(server.wireguard_public_key(), None);
        assert_eq!(server.country, "");
        assert_eq!(server.city, "");
    }

    #[test]
    fn missing_required_field_is_a_decode_error() {
        let json = r#"{ "hostname": "x.nordvpn.com", "load": 3 }"#;
        let err = serde_json::from_str::<Server>(json).unwrap_err();
        assert!(err.to_string().contains("station"));
    }

    #[test]
    fn credentials_decode() {
        let json = r#"{ "id": 1, "username": "u", "password": "p", "nordlynx_private_key": "PRIV=" }"#;
        let creds: Credentials = serde_json::from_str(json).unwrap();
        assert_eq!(creds.nordlynx_private_key, "PRIV=");
    }

    #[test]
    fn query_always_filters_wireguard_and_limit() {
        let query = ServerQuery {
            country_id: None,
            group: None,
            limit: 5,
        };
        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("filters[servers_technologies][identifier]", "wireguard_udp".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn query_adds_country_and_group() {
        let query = ServerQuery {
            country_id: Some(228),
            group: Some(ServerGroup::P2p),
            limit: 10,
        };
        let params = query.to_params();

        assert!(params.contains(&("filters[country_id]", "228".to_string())));
        assert!(params.contains(&("filters[servers_groups][identifier]", "legacy_p2p".to_string())));
        assert_eq!(params.last(), Some(&("limit", "10".to_string())));
    }
}
