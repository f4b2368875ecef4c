#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // Missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {}

fn main() {
    load_dotenv();
    smilebot::logging::init();
    dioxus::launch(smilebot::ui::App);
}
