pub mod columns;
pub mod dataset;
pub mod imputation;
pub mod options;
pub mod processing;
pub mod segment;

pub use dataset::SourceTable;
pub use imputation::{ColumnImputation, ColumnKind, ImputationAction, ImputationReport};
pub use options::{AnalysisOptions, MissingPaymentPolicy};
pub use processing::{AnalysisSummary, TableShape};
pub use segment::{SpendSegment, SpendThresholds};
