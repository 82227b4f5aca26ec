use mission::SequenceEditor;
use web::{config::ServerConfig, start_web_server, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = ServerConfig::from_env();
    let state = WebState::new(SequenceEditor::new());

    if let Err(why) = start_web_server(state, config).await {
        log::error!("web server stopped: {}", why);
    }
}
