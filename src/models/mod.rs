pub mod pool;
pub mod row;
pub mod report;

pub use pool::{PairRecord, PoolAddress};
pub use report::{BarPoint, ChartData, Report, ScatterPoint, Totals, Warning, WarningKind};
pub use row::FlatRow;
