//! Server configuration parsing.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;

use crate::{ConfigError, ConfigResult};
use kdl::{KdlDocument, KdlNode};
use url::Url;

const DEFAULT_LISTEN: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Settings for the API server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub listen: SocketAddr,
    /// The single origin allowed to call the API with credentials.
    pub cors_origin: String,
    /// Post sample deployments to the API once it is listening.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            seed: true,
        }
    }
}

/// `http://` URL for reaching a listener bound to `addr` from the same host.
///
/// Wildcard addresses are swapped for loopback.
pub fn loopback_url(addr: SocketAddr) -> String {
    let ip = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}", SocketAddr::new(ip, addr.port()))
}

/// Load server configuration from `path`, or defaults when no path is given.
pub fn load_server_config(path: Option<&Path>) -> ConfigResult<ServerConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            parse_server_config(&content)
        }
        None => Ok(ServerConfig::default()),
    }
}

/// Parse server configuration from KDL text. Omitted settings keep their
/// defaults.
pub fn parse_server_config(kdl: &str) -> ConfigResult<ServerConfig> {
    let doc: KdlDocument = kdl.parse()?;
    let mut config = ServerConfig::default();

    for node in doc.nodes() {
        match node.name().value() {
            "server" => {
                if let Some(listen) = child_string(node, "listen") {
                    config.listen = parse_listen(&listen)?;
                }
            }
            "cors" => {
                let origin = child_string(node, "origin")
                    .ok_or_else(|| ConfigError::MissingField("cors origin".to_string()))?;
                config.cors_origin = parse_origin(&origin)?;
            }
            "seed" => {
                config.seed = get_bool_prop(node, "enabled")
                    .or_else(|| get_first_bool_arg(node))
                    .ok_or_else(|| ConfigError::MissingField("seed enabled".to_string()))?;
            }
            _ => {} // Ignore unknown nodes
        }
    }

    Ok(config)
}

fn parse_listen(value: &str) -> ConfigResult<SocketAddr> {
    value.parse().map_err(|e| ConfigError::InvalidValue {
        field: "listen".to_string(),
        message: format!("{}: {}", value, e),
    })
}

fn parse_origin(value: &str) -> ConfigResult<String> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        field: "cors origin".to_string(),
        message: format!("{}: {}", value, message),
    };

    let url = Url::parse(value).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("an origin has no path, query or fragment"));
    }

    Ok(value.trim_end_matches('/').to_string())
}

fn child_string(node: &KdlNode, name: &str) -> Option<String> {
    node.children()?
        .nodes()
        .iter()
        .find(|child| child.name().value() == name)
        .and_then(get_first_string_arg)
}

fn get_first_string_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

fn get_first_bool_arg(node: &KdlNode) -> Option<bool> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_bool())
}

fn get_bool_prop(node: &KdlNode, name: &str) -> Option<bool> {
    node.get(name).and_then(|v| v.as_bool())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_server_config("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert!(config.seed);
    }

    #[test]
    fn test_parse_full_config() {
        let kdl = r#"
            server {
                listen "127.0.0.1:9090"
            }

            cors {
                origin "https://dashboard.example.com/"
            }

            seed enabled=#false
        "#;

        let config = parse_server_config(kdl).unwrap();
        assert_eq!(config.listen, "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
        assert_eq!(config.cors_origin, "https://dashboard.example.com");
        assert!(!config.seed);
    }

    #[test]
    fn test_seed_positional_flag() {
        let config = parse_server_config("seed #false").unwrap();
        assert!(!config.seed);
    }

    #[test]
    fn test_invalid_listen_address() {
        let result = parse_server_config(r#"server { listen "localhost" }"#);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue { field, .. } if field == "listen"
        ));
    }

    #[test]
    fn test_origin_must_be_bare() {
        let result = parse_server_config(r#"cors { origin "http://localhost:3000/app" }"#);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidValue { .. }));

        let result = parse_server_config(r#"cors { origin "ftp://localhost" }"#);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_cors_without_origin() {
        let result = parse_server_config("cors");
        assert!(matches!(result.unwrap_err(), ConfigError::MissingField(_)));
    }

    #[test]
    fn test_malformed_kdl() {
        let result = parse_server_config("server {");
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_loopback_url_replaces_wildcard() {
        assert_eq!(loopback_url(DEFAULT_LISTEN), "http://127.0.0.1:8080");
        assert_eq!(
            loopback_url("[::]:8081".parse().unwrap()),
            "http://[::1]:8081"
        );
        assert_eq!(
            loopback_url("10.0.0.5:80".parse().unwrap()),
            "http://10.0.0.5:80"
        );
    }

    #[test]
    fn test_shipped_example_matches_defaults() {
        let config = parse_server_config(include_str!("../../../deploytrack.kdl")).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_server_config(Some(Path::new("/nonexistent/deploytrack.kdl")));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
        assert_eq!(load_server_config(None).unwrap(), ServerConfig::default());
    }
}
