use super::alias::AliasList;
use super::operand::SizeBuilder;
use crate::error::Error;

/// Document path operand such as `bank_details.accounts[1].bank_account_number`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NameBuilder {
    path: String,
}

/// Create a [`NameBuilder`] for a document path
pub fn name(path: impl Into<String>) -> NameBuilder {
    NameBuilder { path: path.into() }
}

impl NameBuilder {
    /// Raw document path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `size (<path>)` operand
    pub fn size(self) -> SizeBuilder {
        SizeBuilder::new(self)
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        aliases.path(&self.path)
    }
}

impl From<&str> for NameBuilder {
    fn from(path: &str) -> Self {
        name(path)
    }
}

impl From<String> for NameBuilder {
    fn from(path: String) -> Self {
        name(path)
    }
}

/// Partition or sort key operand
///
/// Unlike [`NameBuilder`], a key name is aliased as a whole and never split
/// on `.`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBuilder {
    key: String,
}

/// Create a [`KeyBuilder`] for a key attribute
pub fn key(key: impl Into<String>) -> KeyBuilder {
    KeyBuilder { key: key.into() }
}

impl KeyBuilder {
    /// Raw key attribute name
    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        if self.key.is_empty() {
            return Err(Error::UnsetParameter("KeyBuilder"));
        }
        Ok(aliases.name(&self.key))
    }
}
