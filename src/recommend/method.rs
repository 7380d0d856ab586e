/// a fully qualified method name: the declaring type, a dot, then the
/// method signature, e.g. "Ljava/lang/String.trim()Ljava/lang/String;"
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodName(String);

impl MethodName {
    /// rewrite the declaring type, keeping the signature. names without a
    /// type separator come back unchanged.
    pub fn rebase(&self, receiver: &str) -> Self {
        match self.0.find('.') {
            Some(dot) => Self(format!("{}{}", receiver, &self.0[dot..])),
            None => self.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MethodName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl std::fmt::Display for MethodName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
