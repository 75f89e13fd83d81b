// SnipStash services
// Stateless building blocks: format detection, pretty-printing, rendering.

pub mod detector;
pub mod json_formatter;
pub mod renderer;
pub mod xml_formatter;
