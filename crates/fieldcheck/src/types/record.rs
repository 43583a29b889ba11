use std::collections::{BTreeMap, HashMap};

use super::Value;

/// Read access to a record's fields by identifier.
///
/// The engine reads every constrained field through this trait and never
/// mutates the record. Returning `None` means the record has no such field,
/// which is an evaluation error rather than a violation; an optional field
/// that is empty should return `Some(Value::Missing)` instead.
pub trait Record {
    fn value(&self, field: &str) -> Option<Value>;
}

/// A record type with statically declared constraints.
///
/// Usually implemented with `#[derive(Validate)]`, which also implements
/// [`Record`].
///
/// ```
/// use fieldcheck::Validate;
///
/// #[derive(Validate)]
/// struct User {
///     #[validate("required", rename = "FamilyName")]
///     family_name: String,
///     #[validate("min=10", rename = "FirstName")]
///     first_name: String,
/// }
///
/// assert_eq!(
///     User::DECLARATIONS,
///     &[("FamilyName", "required"), ("FirstName", "min=10")]
/// );
/// ```
pub trait Validate: Record {
    /// `(field, constraint)` pairs in field declaration order.
    const DECLARATIONS: &'static [(&'static str, &'static str)];
}

impl Record for HashMap<String, Value> {
    fn value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl Record for BTreeMap<String, Value> {
    fn value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn value(&self, field: &str) -> Option<Value> {
        (**self).value(field)
    }
}

/// Reads one field from a record of type `T`.
pub type AccessorFn<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;

/// A table of field accessors for a record type that does not implement
/// [`Record`] itself.
///
/// ```
/// use fieldcheck::{Accessors, Record, Value};
///
/// struct User {
///     family_name: String,
/// }
///
/// let accessors = Accessors::new()
///     .field("FamilyName", |u: &User| u.family_name.as_str().into());
///
/// let user = User { family_name: "Yamada".to_string() };
/// let record = accessors.bind(&user);
/// assert_eq!(record.value("FamilyName"), Some(Value::from("Yamada")));
/// assert_eq!(record.value("Nickname"), None);
/// ```
pub struct Accessors<T> {
    fields: HashMap<String, AccessorFn<T>>,
}

impl<T> Default for Accessors<T> {
    fn default() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }
}

impl<T> Accessors<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the accessor for a field identifier, replacing any earlier one.
    pub fn field(
        mut self,
        name: impl Into<String>,
        accessor: impl Fn(&T) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.fields.insert(name.into(), Box::new(accessor));
        self
    }

    /// Whether an accessor exists for the field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Pair the accessors with one record so it can be validated.
    pub fn bind<'a>(&'a self, record: &'a T) -> Bound<'a, T> {
        Bound {
            accessors: self,
            record,
        }
    }
}

/// A record viewed through an [`Accessors`] table.
pub struct Bound<'a, T> {
    accessors: &'a Accessors<T>,
    record: &'a T,
}

impl<T> Record for Bound<'_, T> {
    fn value(&self, field: &str) -> Option<Value> {
        self.accessors
            .fields
            .get(field)
            .map(|accessor| accessor(self.record))
    }
}
