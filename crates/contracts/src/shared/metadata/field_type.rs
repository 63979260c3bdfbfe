//! Field type enumeration for metadata system

/// Value category of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    Decimal,
    /// Calendar date, canonical form `YYYY-MM-DD`
    Date,
    /// Closed set of values (see `FieldMetadata::enum_values`)
    Enum,
    /// Value picked from a reference list (customers, suppliers, products)
    Reference,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Enum => "enum",
            Self::Reference => "reference",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }
}

/// Role of a field inside the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldRole {
    /// Part of the record key, addresses the row for update/delete
    Identity,
    #[default]
    Business,
    /// Computed by the server, never edited client-side
    Derived,
}

impl FieldRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Business => "business",
            Self::Derived => "derived",
        }
    }
}

/// Reference list a `FieldType::Reference` field takes its options from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceList {
    Customers,
    Suppliers,
    Products,
}

impl ReferenceList {
    /// REST path segment of the list endpoint
    pub fn path(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Suppliers => "suppliers",
            Self::Products => "products",
        }
    }
}
