mod compare;
mod web;

pub use compare::{cmd_compare, render_text};
pub use web::cmd_web;
