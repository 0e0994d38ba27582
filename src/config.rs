use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "nimbusx.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Contents of `nimbusx.toml`. Every key is optional; CLI flags take
/// precedence and built-in defaults fill the rest.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NimbusConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved settings for `serve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub database: PathBuf,
    pub addr: SocketAddr,
}

impl NimbusConfig {
    /// Config written by `nimbusx init`
    pub fn with_defaults() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
        }
    }

    pub fn database_path(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    pub fn resolve(
        &self,
        database: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
    ) -> anyhow::Result<ServerSettings> {
        let host = host
            .or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip: IpAddr = host
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid host {host:?}: {e}"))?;
        let port = port.or(self.port).unwrap_or(DEFAULT_PORT);

        Ok(ServerSettings {
            database: self.database_path(database),
            addr: SocketAddr::new(ip, port),
        })
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("nimbusx.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<NimbusConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: NimbusConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &NimbusConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
