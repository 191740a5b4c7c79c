pub mod project;
pub mod stats;
pub mod term;

pub use self::project::{project_all, ProjectedDocument, Projection};
pub use self::stats::{aggregate_stats, InventoryStats};
pub use self::term::SearchTerm;
