mod mem_meta_tree;

pub use mem_meta_tree::*;
