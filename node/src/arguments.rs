use backend::limit::{ExponentLimit, DEFAULT_EXPONENT};
use backend::message::Port;
use clap::Parser;
use std::net::IpAddr;

fn ensure_valid_port_number(port: &str) -> Result<Port, String> {
    let port: Port = port
        .parse()
        .map_err(|_| format!("invalid port number {:?}", port))?;
    if port < 1024 {
        return Err(String::from("Port number must be >= 1024"));
    }
    Ok(port)
}

/// Serve the Mersenne prime generator page and its JSON API
#[derive(Parser, Debug)]
#[command(name = "node", version)]
pub(crate) struct Arguments {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3030, value_parser = ensure_valid_port_number)]
    pub port: Port,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Name reported on /state
    #[arg(short, long, default_value = "mersenne")]
    pub name: String,

    /// Limit used when a request doesn't send one, clamped to [2, 31]
    #[arg(long, default_value_t = i64::from(DEFAULT_EXPONENT), allow_negative_numbers = true)]
    default_limit: i64,
}

impl Arguments {
    pub fn default_limit(&self) -> ExponentLimit {
        ExponentLimit::clamped(self.default_limit)
    }
}
