use gloo::console;

fn main() {
    match livephoto::start() {
        Ok(count) => console::log!("live photo: mounted", count as u32, "players"),
        Err(err) => console::error!("live photo: mount failed", err),
    }
}
