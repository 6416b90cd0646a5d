use mess_backend::{api::server, config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    server::start_server(Config::load()).await
}
