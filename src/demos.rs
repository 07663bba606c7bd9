use rust_embed::RustEmbed;
use std::borrow::Cow;

/// Demo maneuver sequences compiled into the binary.
#[derive(RustEmbed)]
#[folder = "demos/"]
pub struct Demo;

pub fn get_demo_bytes(name: &str) -> Option<Cow<'static, [u8]>> {
    Demo::get(name).map(|f| f.data)
}

pub fn demo_names() -> impl Iterator<Item = Cow<'static, str>> {
    Demo::iter()
}
