#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if let Err(err) = github_user_search::run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
