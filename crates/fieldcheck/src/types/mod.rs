mod record;
mod rule;
mod value;
mod violation;

pub use record::{AccessorFn, Accessors, Bound, Record, Validate};
pub use rule::{Constraints, FieldConstraint, Rule};
pub use value::{ToValue, Value};
pub use violation::{Violation, Violations};
