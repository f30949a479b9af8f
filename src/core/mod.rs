pub mod generator;
pub mod inventory;
pub mod migrator;
pub mod normalizer;
pub mod record;
pub mod resolver;
pub mod sink;

pub use generator::{CallFragments, CallGenerator};
pub use inventory::{FieldRole, InventoryCursor, InventoryLine, InventoryParser, LineOutcome};
pub use migrator::{LogMigrator, MigrationReport};
pub use normalizer::{Annotation, CallNormalizer};
pub use record::{CallOrigin, LogCallRecord, Position};
pub use resolver::{PathResolver, ResolvedPackage};
pub use sink::{PatchPlan, RecordSink};
