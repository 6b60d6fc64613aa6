use super::alias::AliasList;
use super::name::NameBuilder;
use crate::error::Error;

/// Projection expression: the attributes to fetch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectionBuilder {
    names: Vec<NameBuilder>,
}

impl ProjectionBuilder {
    /// Create an empty projection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document path
    pub fn add_names(mut self, name: NameBuilder) -> Self {
        self.names.push(name);
        self
    }

    /// Projected paths, in insertion order
    pub fn names(&self) -> &[NameBuilder] {
        &self.names
    }

    /// No path has been added
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        if self.names.is_empty() {
            return Err(Error::UnsetParameter("ProjectionBuilder"));
        }

        let names = self
            .names
            .iter()
            .map(|name| name.render(aliases))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names.join(", "))
    }
}

/// Create a projection from a list of paths
pub fn names_list<I>(names: I) -> ProjectionBuilder
where
    I: IntoIterator<Item = NameBuilder>,
{
    ProjectionBuilder {
        names: names.into_iter().collect(),
    }
}
