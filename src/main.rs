#[tokio::main]
async fn main() -> anyhow::Result<()> {
    goat_monitor::monitor::run_cli().await
}
