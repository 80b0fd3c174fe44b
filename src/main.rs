use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(error) = bss::run().await {
        error!("bss exited with error: {:#}", error);
        std::process::exit(1);
    }
}
