use uuid::Uuid;

use super::{FieldDef, FieldMap, FieldValue};

/// The contract a type must satisfy to be persisted by a repository.
///
/// A record is plain data: a [`Uuid`] identity plus zero or more declared
/// fields. The declaration replaces runtime reflection; any record type
/// works with every backend without bespoke mapping code, at the cost of
/// implementing this trait once.
///
/// # Invariants
///
/// - [`Record::fields`] returns the same slice on every call; backends rely
///   on its order matching between table creation, writes and reads.
/// - The identity is never listed in [`Record::fields`].
/// - [`Record::value`] returns a value whose variant agrees with the declared
///   [`FieldKind`](super::FieldKind) for that name (`Absent` only for the
///   optional kinds).
/// - [`Record::TYPE_NAME`] and every field name are plain identifiers; they
///   are spliced into DDL and attribute names verbatim.
pub trait Record: Clone + Send + Sync + 'static {
    /// The table/container name used for this record type.
    const TYPE_NAME: &'static str;

    /// The ordered non-identity field declarations.
    fn fields() -> &'static [FieldDef];

    /// The record's identity.
    fn id(&self) -> Uuid;

    /// The current value of one declared field.
    ///
    /// Callers only pass names present in [`Record::fields`]; implementations
    /// return [`FieldValue::Absent`] for anything else.
    fn value(&self, field: &str) -> FieldValue;

    /// Reconstructs a record from its stored fields.
    ///
    /// Names missing from `fields` are left at their unset default, so a
    /// record written before its type gained a field still reads back.
    fn from_stored(id: Uuid, fields: &FieldMap) -> Self;
}
