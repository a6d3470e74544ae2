#[tokio::main]
async fn main() -> anyhow::Result<()> {
    depviz_lib::main().await
}
