use crate::error::ReplabError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Table of action values `Q(s, a)`, initialised to zero.
///
/// Indexing with a state or an action out of range panics.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QTable {
    n_states: usize,
    n_actions: usize,
    values: Vec<f32>,
}

impl QTable {
    /// Creates a table filled with zeros.
    pub fn new(n_states: usize, n_actions: usize) -> Self {
        Self {
            n_states,
            n_actions,
            values: vec![0.0; n_states * n_actions],
        }
    }

    /// Returns the number of states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Returns the number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    #[inline]
    fn ix(&self, s: usize, a: usize) -> usize {
        assert!(a < self.n_actions, "action {} out of range", a);
        s * self.n_actions + a
    }

    /// Returns `Q(s, a)`.
    pub fn get(&self, s: usize, a: usize) -> f32 {
        self.values[self.ix(s, a)]
    }

    /// Sets `Q(s, a)`.
    pub fn set(&mut self, s: usize, a: usize, v: f32) {
        let ix = self.ix(s, a);
        self.values[ix] = v;
    }

    /// Adds `delta` to `Q(s, a)`.
    pub fn add(&mut self, s: usize, a: usize, delta: f32) {
        let ix = self.ix(s, a);
        self.values[ix] += delta;
    }

    /// Returns the action values of state `s`.
    pub fn row(&self, s: usize) -> &[f32] {
        &self.values[s * self.n_actions..(s + 1) * self.n_actions]
    }

    /// Returns the action with the largest value in state `s`.
    ///
    /// Ties are broken towards the smallest action.
    pub fn argmax(&self, s: usize) -> usize {
        argmax(self.row(s))
    }

    /// Returns the largest action value in state `s`.
    pub fn max(&self, s: usize) -> f32 {
        self.row(s).iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Returns the greedy action of every state.
    pub fn greedy_policy(&self) -> Vec<usize> {
        (0..self.n_states).map(|s| self.argmax(s)).collect()
    }

    /// Loads a table from a YAML file.
    ///
    /// Fails if the number of values is not `n_states * n_actions`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        if b.values.len() != b.n_states * b.n_actions {
            return Err(ReplabError::InvalidConfig(format!(
                "table of {} x {} has {} values",
                b.n_states,
                b.n_actions,
                b.values.len()
            ))
            .into());
        }
        Ok(b)
    }

    /// Replaces the values with those of a table saved with [`QTable::save`].
    ///
    /// The saved table must have the same numbers of states and actions,
    /// otherwise `self` is left unchanged.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded = Self::load(path)?;
        if (loaded.n_states, loaded.n_actions) != (self.n_states, self.n_actions) {
            return Err(ReplabError::InvalidConfig(format!(
                "expected a table of {} x {}, found {} x {}",
                self.n_states, self.n_actions, loaded.n_states, loaded.n_actions
            ))
            .into());
        }
        *self = loaded;
        Ok(())
    }

    /// Saves the table to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

pub(super) fn argmax(xs: &[f32]) -> usize {
    let mut best = 0;
    for (i, x) in xs.iter().enumerate() {
        if *x > xs[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_argmax_first_on_ties() {
        let mut q = QTable::new(2, 4);
        assert_eq!(q.argmax(0), 0);

        q.set(1, 2, 1.0);
        q.set(1, 3, 1.0);
        assert_eq!(q.argmax(1), 2);
        assert_eq!(q.max(1), 1.0);
        assert_eq!(q.greedy_policy(), vec![0, 2]);
    }

    #[test]
    fn test_add_and_row() {
        let mut q = QTable::new(3, 2);
        q.add(2, 1, -0.5);
        q.add(2, 1, -0.5);
        assert_eq!(q.get(2, 1), -1.0);
        assert_eq!(q.row(2), &[0.0, -1.0]);
        assert_eq!(q.row(1), &[0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn test_action_out_of_range() {
        let q = QTable::new(3, 2);
        q.get(0, 2);
    }

    #[test]
    fn test_save_load() -> Result<()> {
        let mut q = QTable::new(4, 3);
        q.set(3, 1, 2.5);

        let dir = TempDir::new("q_table")?;
        let path = dir.path().join("q_table.yaml");
        q.save(&path)?;
        assert_eq!(QTable::load(&path)?, q);
        Ok(())
    }

    #[test]
    fn test_load_rejects_inconsistent_values() -> Result<()> {
        let dir = TempDir::new("q_table")?;
        let path = dir.path().join("q_table.yaml");
        std::fs::write(&path, "n_states: 2\nn_actions: 2\nvalues: [0.0, 1.0, 2.0]\n")?;

        let err = QTable::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReplabError>(),
            Some(ReplabError::InvalidConfig(_))
        ));
        Ok(())
    }

    #[test]
    fn test_reload_checks_shape() -> Result<()> {
        let dir = TempDir::new("q_table")?;
        let path = dir.path().join("q_table.yaml");
        let mut saved = QTable::new(3, 4);
        saved.set(2, 3, 1.5);
        saved.save(&path)?;

        let mut q = QTable::new(48, 4);
        assert!(q.reload(&path).is_err());
        assert_eq!(q, QTable::new(48, 4));

        let mut q = QTable::new(3, 4);
        q.reload(&path)?;
        assert_eq!(q, saved);
        Ok(())
    }
}
