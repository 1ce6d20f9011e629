#[tokio::main]
async fn main() -> anyhow::Result<()> {
    libris_app::run().await
}
