mod layout;
mod settings;
#[cfg(test)]
mod tests;

pub use layout::*;
pub use settings::*;
