pub mod hash;

pub mod sync;
