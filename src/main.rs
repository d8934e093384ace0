#[tokio::main]
async fn main() {
    wira_rankings::main().await
}
