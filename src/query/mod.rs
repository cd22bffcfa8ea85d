pub mod abstract_count;
pub mod functional;
pub mod output;
pub mod stats;
