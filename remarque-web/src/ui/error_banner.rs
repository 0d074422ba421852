use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ErrorBannerProps {
    pub message: String,
}

#[function_component(ErrorBanner)]
pub fn error_banner(p: &ErrorBannerProps) -> Html {
    html! {
        <div class="alert alert-warning d-flex align-items-center" role="alert">
            <div class="bi-exclamation-triangle me-2"></div>
            <div>{ "Could not load the comments: " }{ &p.message }</div>
        </div>
    }
}
