use app::App;
use tracing_subscriber::fmt;
use tracing_subscriber_wasm::MakeConsoleWriter;

mod api;
mod app;
mod feed;
mod header;
mod link;
mod login;
mod routes;
mod storage;
mod websocket;

fn main() {
    // route the library's tracing events to the browser console
    fmt()
        .with_writer(MakeConsoleWriter::default().map_trace_level_to(tracing::Level::DEBUG))
        .without_time()
        .with_ansi(false)
        .init();
    console_error_panic_hook::set_once();

    yew::Renderer::<App>::new().render();
}
