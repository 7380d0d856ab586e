use crate::model::Error;

/// how the receiver variable came to exist. a closed set; the kind node's
/// outcome labels are drawn from exactly these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    MethodReturn,
    New,
    Field,
    Parameter,
    This,
    Unknown,
    Any,
}

impl DefinitionKind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::MethodReturn,
            Self::New,
            Self::Field,
            Self::Parameter,
            Self::This,
            Self::Unknown,
            Self::Any,
        ]
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::MethodReturn => "METHOD_RETURN",
            Self::New => "NEW",
            Self::Field => "FIELD",
            Self::Parameter => "PARAMETER",
            Self::This => "THIS",
            Self::Unknown => "UNKNOWN",
            Self::Any => "ANY",
        }
    }
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<&str> for DefinitionKind {
    type Error = Error;

    fn try_from(label: &str) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.label() == label)
            .ok_or_else(|| Error::NotFound(label.to_string()))
    }
}
