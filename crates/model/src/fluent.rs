use crate::error::ModelError;
use ml::Tensor;

/// Name and flattened width of one fluent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FluentSpec {
    pub name: String,
    pub size: usize,
}

impl FluentSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self { name: name.into(), size }
    }
}

/// Ordered `name -> tensor` mapping of evaluated fluents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fluents {
    entries: Vec<(String, Tensor)>,
}

impl Fluents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `name`, keeping first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: Tensor) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Tensor, ModelError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
            .ok_or_else(|| ModelError::MissingFluent(name.to_string()))
    }

    /// Looks up `name` and checks it holds exactly `size` values.
    pub fn get_sized(&self, name: &str, size: usize) -> Result<&[f32], ModelError> {
        let t = self.get(name)?;
        if t.len() != size {
            return Err(ModelError::FluentSize { name: name.to_string(), expected: size, actual: t.len() });
        }
        Ok(t.data())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tensor)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenates the listed fluents into one flat row.
    pub fn flatten(&self, specs: &[FluentSpec]) -> Result<Vec<f32>, ModelError> {
        let mut row = Vec::with_capacity(specs.iter().map(|s| s.size).sum());
        for spec in specs {
            row.extend_from_slice(self.get_sized(&spec.name, spec.size)?);
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut f = Fluents::new();
        f.insert("a", Tensor::from_vec(vec![1], vec![1.0]));
        f.insert("b", Tensor::from_vec(vec![1], vec![2.0]));
        f.insert("a", Tensor::from_vec(vec![1], vec![3.0]));
        let names: Vec<_> = f.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(f.get("a").unwrap().data(), &[3.0]);
    }

    #[test]
    fn missing_and_missized_fluents() {
        let mut f = Fluents::new();
        f.insert("x", Tensor::from_vec(vec![2], vec![1.0, 2.0]));
        assert_eq!(f.get("y").unwrap_err(), ModelError::MissingFluent("y".into()));
        assert!(matches!(f.get_sized("x", 3), Err(ModelError::FluentSize { .. })));
        assert_eq!(f.flatten(&[FluentSpec::new("x", 2)]).unwrap(), vec![1.0, 2.0]);
    }
}
