//! Command-line overrides for the HTTP server.

use clap::Parser;

/// HTTP service that extracts, summarizes, and answers questions about PDFs.
///
/// Host and port default to the values loaded from the environment
/// (`HOST`, `PORT`, or their profiled variants).
#[derive(Parser, Debug)]
#[command(name = "pdfqa-server", version, about)]
pub struct ServeArgs {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Resolve the bind address against the loaded server config.
    pub fn bind_addr(&self, server: &pdfqa_core::config::ServerConfig) -> String {
        let host = self.host.as_deref().unwrap_or(&server.host);
        let port = self.port.unwrap_or(server.port);
        format!("{}:{}", host, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_config() -> pdfqa_core::config::ServerConfig {
        pdfqa_core::config::ServerConfig {
            host: "0.0.0.0".into(),
            port: 5002,
            cors_origin: "*".into(),
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let args = ServeArgs::parse_from(["pdfqa-server"]);
        assert_eq!(args.bind_addr(&server_config()), "0.0.0.0:5002");
    }

    #[test]
    fn flags_override_config() {
        let args = ServeArgs::parse_from(["pdfqa-server", "--host", "127.0.0.1", "--port", "8080"]);
        assert_eq!(args.bind_addr(&server_config()), "127.0.0.1:8080");
    }
}
