use std::sync::Arc;

use crate::{config::Settings, error, server::start_api_server};

pub async fn serve(settings: Settings) {
    if let Err(e) = start_api_server(Arc::new(settings)).await {
        error!("Server failed. Err: {}", e);
    }
}
