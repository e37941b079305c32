use dockhand::runtime::{boot, gateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (state, config) = boot::boot().await?;
    gateway::run(state, config).await
}
