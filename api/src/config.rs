use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// EcoShelf waste-risk prediction server.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "ECOSHELF_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// JSON model artifact to serve predictions from
    #[arg(long, env = "ECOSHELF_MODEL_PATH", default_value = "models/retail_waste_model.json")]
    pub model_path: PathBuf,
}
