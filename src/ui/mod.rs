// Terminal rendering for the mint workflow

mod animations;
mod ascii_arts;
mod connect_view;
mod draw;
mod main_view;
mod preview;
mod utils;

pub use draw::draw;
