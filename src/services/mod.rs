pub mod allocation;
pub mod excel;
pub mod normalizer;
pub mod partitioner;
pub mod splitter;
