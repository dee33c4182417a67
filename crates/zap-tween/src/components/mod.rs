pub mod binding;
pub mod node;
