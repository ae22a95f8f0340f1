use crate::value::{Object, Val, Value};

/// A type that supports field access by name.
///
/// This is the building block of [`resolve`](crate::resolve): a path is resolved by calling
/// [`get_field`](Self::get_field) once per path segment, descending into the returned value.
///
/// # Implementation
///
/// Implementations should follow a set of conventions so that paths align with the layout of the
/// implementing type:
///
///  1. Members are referenced by the name the modeled protocol uses for them, for instance
///     `ConsistentRead` for a DynamoDB request, not by the Rust field name.
///  2. Mappings such as `BTreeMap` are exposed as [`Val::Object`] so that their keys become
///     addressable, nested structures are exposed as [`Val::Struct`].
///  3. `Option` is opaque in the path: `None` is returned as a missing member.
///
/// # Example
///
/// ```
/// use spantag_protocol::{resolve, Getter, Val};
///
/// struct Throughput {
///     read_capacity_units: u64,
/// }
///
/// impl Getter for Throughput {
///     fn get_field(&self, name: &str) -> Option<Val<'_>> {
///         match name {
///             "ReadCapacityUnits" => Some(self.read_capacity_units.into()),
///             _ => None,
///         }
///     }
/// }
///
/// struct CreateTable {
///     throughput: Option<Throughput>,
/// }
///
/// impl Getter for CreateTable {
///     fn get_field(&self, name: &str) -> Option<Val<'_>> {
///         match name {
///             "ProvisionedThroughput" => Some(Val::Struct(self.throughput.as_ref()?)),
///             _ => None,
///         }
///     }
/// }
///
/// let request = CreateTable {
///     throughput: Some(Throughput { read_capacity_units: 5 }),
/// };
///
/// assert_eq!(
///     resolve(&request, "ProvisionedThroughput.ReadCapacityUnits"),
///     Some(Val::U64(5))
/// );
/// assert_eq!(resolve(&request, "ProvisionedThroughput.WriteCapacityUnits"), None);
/// ```
pub trait Getter {
    /// Returns the member with the given name, or `None` if it does not exist or is empty.
    fn get_field(&self, name: &str) -> Option<Val<'_>>;

    /// Returns a boxed representation of the entire structure, if supported.
    ///
    /// This is used when a structure itself becomes the value of an attribute. The default
    /// implementation returns `None`, in which case such attributes are skipped.
    fn to_value(&self) -> Option<Value> {
        None
    }
}

impl Getter for Object {
    fn get_field(&self, name: &str) -> Option<Val<'_>> {
        self.get(name).map(Val::from)
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Object(self.clone()))
    }
}

impl Getter for Value {
    fn get_field(&self, name: &str) -> Option<Val<'_>> {
        match self {
            Value::Object(object) => object.get_field(name),
            _ => None,
        }
    }

    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }
}
