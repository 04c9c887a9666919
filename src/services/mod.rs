pub mod cache;
pub mod collector;
pub mod flatten;
pub mod report;
pub mod validator;

pub use cache::PairCache;
pub use collector::PoolCollector;
pub use report::BatchError;
