#[tokio::main]
async fn main() -> anyhow::Result<()> {
    declension_trainer::run().await
}
