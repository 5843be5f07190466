use scalyr_log_forwarder::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::main().await.map_err(|e| anyhow::anyhow!(e))
}
