extern crate self as txpool_rt;

pub mod task;
pub mod time;
