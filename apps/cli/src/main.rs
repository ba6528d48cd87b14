mod config;
mod main_lib;

use config::Config;
use main_lib::{init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let report = run(&config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
