use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// OpenAI-compatible gateway for z.ai image generation
#[derive(Debug, Parser)]
#[command(name = "zai2api", about = "Serve z.ai image generation behind the OpenAI chat completions API")]
pub struct Args {
    /// Path to configuration file; built-in defaults apply when omitted
    #[arg(short, long, env = "ZAI2API_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "ZAI2API_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override only the listen port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command line overrides on top of the configured address
    pub fn listen_address(&self, configured: SocketAddr) -> SocketAddr {
        let mut address = self.listen.unwrap_or(configured);

        if let Some(port) = self.port {
            address.set_port(port);
        }

        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("zai2api").chain(argv.iter().copied())).unwrap()
    }

    const CONFIGURED: SocketAddr = SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);

    #[test]
    fn no_overrides_keep_configured_address() {
        let args = Args {
            config: None,
            listen: None,
            port: None,
        };
        assert_eq!(args.listen_address(CONFIGURED), CONFIGURED);
    }

    #[test]
    fn listen_replaces_address() {
        let args = Args {
            config: None,
            listen: Some("127.0.0.1:9000".parse().unwrap()),
            port: None,
        };
        assert_eq!(args.listen_address(CONFIGURED), "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn port_overrides_only_the_port() {
        let args = parse(&["--listen", "127.0.0.1:9000", "--port", "7000"]);
        assert_eq!(args.listen_address(CONFIGURED), "127.0.0.1:7000".parse().unwrap());

        let args = parse(&["--port", "3000", "-c", "zai2api.toml"]);
        assert_eq!(args.listen_address(CONFIGURED), "0.0.0.0:3000".parse().unwrap());
        assert_eq!(args.config, Some(PathBuf::from("zai2api.toml")));
    }
}
