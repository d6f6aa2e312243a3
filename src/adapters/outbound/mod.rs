pub mod audit;
pub mod storage;
pub mod tasks;
