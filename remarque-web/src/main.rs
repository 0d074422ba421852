use remarque_client::{api::COMMENTS_PATH, Config, Prompt};

mod ui;

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<ui::App>::new().render();
}

/// Reads the configuration baked in at build time
///
/// Without an endpoint url, the comment endpoint is expected on the page's own
/// origin.
fn config() -> Config {
    let mut config = Config::from_lookup(|var| {
        let val = match var {
            "REMARQUE_ENDPOINT_URL" => option_env!("REMARQUE_ENDPOINT_URL"),
            "REMARQUE_STORE_URL" => option_env!("REMARQUE_STORE_URL"),
            "REMARQUE_STORE_KEY" => option_env!("REMARQUE_STORE_KEY"),
            "REMARQUE_USERNAME" => option_env!("REMARQUE_USERNAME"),
            "REMARQUE_INSERT_ROUTE" => option_env!("REMARQUE_INSERT_ROUTE"),
            _ => None,
        };
        val.map(String::from)
    });
    if config.endpoint_url.is_empty() {
        match web_sys::window().map(|w| w.location().origin()) {
            Some(Ok(origin)) => config.endpoint_url = format!("{origin}{COMMENTS_PATH}"),
            _ => tracing::error!("could not find the page origin to reach the comment endpoint"),
        }
    }
    config
}

/// Browser dialogs
pub struct WindowPrompt;

impl Prompt for WindowPrompt {
    fn alert(&self, message: &str) {
        let res = web_sys::window().map(|w| w.alert_with_message(message));
        if !matches!(res, Some(Ok(()))) {
            tracing::error!(?res, "failed showing alert {message:?}");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        match web_sys::window().map(|w| w.confirm_with_message(message)) {
            Some(Ok(answer)) => answer,
            res => {
                tracing::error!(?res, "failed asking for confirmation");
                false
            }
        }
    }
}
