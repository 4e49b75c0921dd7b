mod faulty_registry;
mod key_pairs;

pub use faulty_registry::*;
pub use key_pairs::*;
