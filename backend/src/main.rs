use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(error) = payments_backend::run().await {
        error!("Backend exited with error: {:?}", error);
        eprintln!("Backend exited with error: {error:?}");
        std::process::exit(1);
    }
}
