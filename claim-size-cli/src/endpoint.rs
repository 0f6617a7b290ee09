//! Lotus API endpoint discovery
//!
//! Sources, first match wins:
//! 1. `--api-url` / `--token` flags
//! 2. `FULLNODE_API_INFO` (`TOKEN:MULTIADDR` or `TOKEN:URL`)
//! 3. `[node]` section of the config file
//! 4. `api` and `token` files in the Lotus repo (`~/.lotus`)

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::NodeConfig;
use crate::error::EndpointError;

pub const API_INFO_ENV: &str = "FULLNODE_API_INFO";

const RPC_PATH: &str = "/rpc/v1";

/// Resolved HTTP JSON-RPC endpoint and optional bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    pub url: String,
    pub token: Option<String>,
}

/// Where the endpoint was found, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    Config,
    Repo,
}

/// Inputs to endpoint resolution, gathered by the caller.
#[derive(Debug, Default)]
pub struct Lookup<'a> {
    pub api_url: Option<&'a str>,
    pub token: Option<&'a str>,
    pub env_api_info: Option<&'a str>,
    pub config: Option<&'a NodeConfig>,
    pub repo: Option<&'a Path>,
}

/// Default Lotus repo (`~/.lotus`).
pub fn default_repo() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lotus")
}

/// Pick the endpoint from the first source that names one.
///
/// A `--token` flag overrides whatever token the winning source carries.
pub fn resolve(lookup: &Lookup<'_>) -> Result<(ApiInfo, Source), EndpointError> {
    let (addr, token, source) = if let Some(url) = non_empty(lookup.api_url) {
        (url.to_string(), None, Source::Flag)
    } else if let Some(info) = non_empty(lookup.env_api_info) {
        let (token, addr) = split_api_info(info);
        (addr.to_string(), token.map(str::to_string), Source::Env)
    } else if let Some(url) = lookup.config.and_then(|c| non_empty(c.api_url.as_deref())) {
        let token = lookup
            .config
            .and_then(|c| non_empty(c.token.as_deref()))
            .map(str::to_string);
        (url.to_string(), token, Source::Config)
    } else {
        let repo = lookup.repo.map(Path::to_path_buf).unwrap_or_else(default_repo);
        let (addr, token) = read_repo(&repo)?;
        (addr, token, Source::Repo)
    };

    let token = non_empty(lookup.token).map(str::to_string).or(token);
    let url = dial_url(&addr)?;
    Ok((ApiInfo { url, token }, source))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Split `TOKEN:ADDR` into its parts. A bare multiaddr or URL has no token.
pub fn split_api_info(info: &str) -> (Option<&str>, &str) {
    let info = info.trim();
    if info.starts_with('/') || has_url_scheme(info) {
        return (None, info);
    }
    match info.split_once(':') {
        Some((token, addr)) if !token.is_empty() => (Some(token), addr),
        Some((_, addr)) => (None, addr),
        None => (None, info),
    }
}

fn has_url_scheme(s: &str) -> bool {
    ["http://", "https://", "ws://", "wss://"]
        .iter()
        .any(|scheme| s.starts_with(scheme))
}

/// Convert a multiaddr or URL into the HTTP JSON-RPC URL.
pub fn dial_url(addr: &str) -> Result<String, EndpointError> {
    let addr = addr.trim();
    if addr.starts_with('/') {
        return multiaddr_to_url(addr);
    }

    let invalid = || EndpointError::InvalidEndpoint(addr.to_string());
    let (scheme, rest) = addr.split_once("://").ok_or_else(invalid)?;
    let scheme = match scheme {
        "http" | "ws" => "http",
        "https" | "wss" => "https",
        _ => return Err(invalid()),
    };
    if rest.is_empty() || rest.starts_with('/') {
        return Err(invalid());
    }

    let rest = rest.trim_end_matches('/');
    if rest.contains('/') {
        Ok(format!("{scheme}://{rest}"))
    } else {
        Ok(format!("{scheme}://{rest}{RPC_PATH}"))
    }
}

fn multiaddr_to_url(addr: &str) -> Result<String, EndpointError> {
    let invalid = || EndpointError::InvalidEndpoint(addr.to_string());
    let mut parts = addr.split('/').skip(1).filter(|p| !p.is_empty());

    let mut host = None;
    let mut port = None;
    let mut scheme = "http";
    while let Some(proto) = parts.next() {
        match proto {
            "ip4" | "dns" | "dns4" | "dns6" => {
                host = Some(parts.next().ok_or_else(invalid)?.to_string());
            }
            "ip6" => host = Some(format!("[{}]", parts.next().ok_or_else(invalid)?)),
            "tcp" => {
                let value = parts.next().ok_or_else(invalid)?;
                port = Some(value.parse::<u16>().map_err(|_| invalid())?);
            }
            "http" | "ws" => scheme = "http",
            "https" | "wss" => scheme = "https",
            _ => return Err(invalid()),
        }
    }

    match (host, port) {
        (Some(host), Some(port)) => Ok(format!("{scheme}://{host}:{port}{RPC_PATH}")),
        _ => Err(invalid()),
    }
}

fn read_repo(repo: &Path) -> Result<(String, Option<String>), EndpointError> {
    let api_path = repo.join("api");
    let addr = match std::fs::read_to_string(&api_path) {
        Ok(addr) => addr.trim().to_string(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(EndpointError::NotConfigured(repo.to_path_buf()))
        }
        Err(source) => {
            return Err(EndpointError::RepoRead {
                path: api_path,
                source,
            })
        }
    };

    let token_path = repo.join("token");
    let token = match std::fs::read_to_string(&token_path) {
        Ok(token) => non_empty(Some(&token)).map(str::to_string),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(source) => {
            return Err(EndpointError::RepoRead {
                path: token_path,
                source,
            })
        }
    };

    Ok((addr, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_multiaddr_ip4_http() {
        assert_eq!(
            dial_url("/ip4/127.0.0.1/tcp/1234/http").unwrap(),
            "http://127.0.0.1:1234/rpc/v1"
        );
    }

    #[test]
    fn test_multiaddr_without_transport_defaults_to_http() {
        assert_eq!(
            dial_url("/ip4/10.1.2.3/tcp/2345").unwrap(),
            "http://10.1.2.3:2345/rpc/v1"
        );
    }

    #[test]
    fn test_multiaddr_dns_wss_maps_to_https() {
        assert_eq!(
            dial_url("/dns/api.node.glif.io/tcp/443/wss").unwrap(),
            "https://api.node.glif.io:443/rpc/v1"
        );
    }

    #[test]
    fn test_multiaddr_ip6_is_bracketed() {
        assert_eq!(
            dial_url("/ip6/::1/tcp/1234/http").unwrap(),
            "http://[::1]:1234/rpc/v1"
        );
    }

    #[test]
    fn test_multiaddr_missing_port_is_invalid() {
        assert!(matches!(
            dial_url("/ip4/127.0.0.1/http"),
            Err(EndpointError::InvalidEndpoint(_))
        ));
        assert!(dial_url("/ip4/127.0.0.1/tcp/notaport").is_err());
        assert!(dial_url("/unix/tmp/lotus.sock").is_err());
    }

    #[test]
    fn test_url_gets_rpc_path_when_bare() {
        assert_eq!(
            dial_url("https://api.node.glif.io").unwrap(),
            "https://api.node.glif.io/rpc/v1"
        );
        assert_eq!(
            dial_url("ws://localhost:1234/").unwrap(),
            "http://localhost:1234/rpc/v1"
        );
    }

    #[test]
    fn test_url_with_path_is_kept() {
        assert_eq!(
            dial_url("http://localhost:1234/rpc/v0").unwrap(),
            "http://localhost:1234/rpc/v0"
        );
    }

    #[test]
    fn test_url_with_unknown_scheme_is_invalid() {
        assert!(dial_url("ftp://localhost").is_err());
        assert!(dial_url("localhost:1234").is_err());
    }

    #[test]
    fn test_split_api_info() {
        assert_eq!(
            split_api_info("eyJhbGc:/ip4/127.0.0.1/tcp/1234/http"),
            (Some("eyJhbGc"), "/ip4/127.0.0.1/tcp/1234/http")
        );
        assert_eq!(
            split_api_info("/ip4/127.0.0.1/tcp/1234/http"),
            (None, "/ip4/127.0.0.1/tcp/1234/http")
        );
        assert_eq!(
            split_api_info("tok:https://node.example:443"),
            (Some("tok"), "https://node.example:443")
        );
        assert_eq!(
            split_api_info("https://node.example"),
            (None, "https://node.example")
        );
    }

    #[test]
    fn test_resolve_flag_wins() {
        let config = NodeConfig {
            api_url: Some("/ip4/10.0.0.1/tcp/1/http".to_string()),
            token: Some("cfg".to_string()),
        };
        let lookup = Lookup {
            api_url: Some("http://flag:1234"),
            env_api_info: Some("env:/ip4/10.0.0.2/tcp/2/http"),
            config: Some(&config),
            ..Lookup::default()
        };
        let (info, source) = resolve(&lookup).unwrap();
        assert_eq!(source, Source::Flag);
        assert_eq!(info.url, "http://flag:1234/rpc/v1");
        assert_eq!(info.token, None);
    }

    #[test]
    fn test_resolve_env_before_config() {
        let config = NodeConfig {
            api_url: Some("/ip4/10.0.0.1/tcp/1/http".to_string()),
            token: None,
        };
        let lookup = Lookup {
            env_api_info: Some("envtoken:/ip4/10.0.0.2/tcp/2/http"),
            config: Some(&config),
            ..Lookup::default()
        };
        let (info, source) = resolve(&lookup).unwrap();
        assert_eq!(source, Source::Env);
        assert_eq!(info.url, "http://10.0.0.2:2/rpc/v1");
        assert_eq!(info.token.as_deref(), Some("envtoken"));
    }

    #[test]
    fn test_resolve_token_flag_overrides_source_token() {
        let config = NodeConfig {
            api_url: Some("/ip4/10.0.0.1/tcp/1/http".to_string()),
            token: Some("cfg".to_string()),
        };
        let lookup = Lookup {
            token: Some("flag"),
            config: Some(&config),
            ..Lookup::default()
        };
        let (info, source) = resolve(&lookup).unwrap();
        assert_eq!(source, Source::Config);
        assert_eq!(info.token.as_deref(), Some("flag"));
    }

    #[test]
    fn test_resolve_blank_values_are_skipped() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("api"), "/ip4/127.0.0.1/tcp/1234/http\n").unwrap();
        let lookup = Lookup {
            api_url: Some("  "),
            env_api_info: Some(""),
            repo: Some(tmp.path()),
            ..Lookup::default()
        };
        let (_, source) = resolve(&lookup).unwrap();
        assert_eq!(source, Source::Repo);
    }

    #[test]
    fn test_resolve_from_repo_files() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("api"), "/ip4/127.0.0.1/tcp/1234/http\n").unwrap();
        std::fs::write(tmp.path().join("token"), "repotoken\n").unwrap();

        let lookup = Lookup {
            repo: Some(tmp.path()),
            ..Lookup::default()
        };
        let (info, source) = resolve(&lookup).unwrap();
        assert_eq!(source, Source::Repo);
        assert_eq!(info.url, "http://127.0.0.1:1234/rpc/v1");
        assert_eq!(info.token.as_deref(), Some("repotoken"));
    }

    #[test]
    fn test_resolve_repo_without_token() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("api"), "/ip4/127.0.0.1/tcp/1234/http").unwrap();
        let lookup = Lookup {
            repo: Some(tmp.path()),
            ..Lookup::default()
        };
        let (info, _) = resolve(&lookup).unwrap();
        assert_eq!(info.token, None);
    }

    #[test]
    fn test_resolve_nothing_configured() {
        let tmp = TempDir::new().expect("tempdir");
        let lookup = Lookup {
            repo: Some(tmp.path()),
            ..Lookup::default()
        };
        assert!(matches!(
            resolve(&lookup),
            Err(EndpointError::NotConfigured(_))
        ));
    }
}
