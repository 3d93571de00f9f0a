#[tokio::main]
async fn main() -> std::io::Result<()> {
    karma_katcher::run_with_config().await
}
