//! In-memory gesture library.
//!
//! Gestures live only for the lifetime of the process. Names are unique and
//! listed in the order they were first saved, which is the order of the
//! numbered selection menu.

use super::sequence::Gesture;
use crate::error::{Error, Result};

/// Name-keyed collection of recorded gestures.
#[derive(Debug, Clone, Default)]
pub struct GestureLibrary {
    entries: Vec<(String, Gesture)>,
}

impl GestureLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `gesture` under `name`, replacing any gesture already saved there.
    ///
    /// An overwritten entry keeps its position in the listing. Names are
    /// trimmed; a blank name is rejected.
    pub fn save(&mut self, name: &str, gesture: Gesture) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "gesture name must not be empty".to_string(),
            ));
        }

        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                log::info!("Gesture '{}' overwritten ({} steps)", name, gesture.len());
                *existing = gesture;
            }
            None => {
                log::info!("Gesture '{}' saved ({} steps)", name, gesture.len());
                self.entries.push((name.to_string(), gesture));
            }
        }
        Ok(())
    }

    /// Look up a gesture by name.
    pub fn get(&self, name: &str) -> Result<&Gesture> {
        self.entries
            .iter()
            .find(|(n, _)| n == name.trim())
            .map(|(_, g)| g)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Entry at 0-based position `index` in listing order.
    pub fn get_index(&self, index: usize) -> Result<(&str, &Gesture)> {
        self.entries
            .get(index)
            .map(|(n, g)| (n.as_str(), g))
            .ok_or_else(|| Error::NotFound(format!("#{}", index + 1)))
    }

    /// True when a gesture is saved under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Gesture names in listing order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Iterate over `(name, gesture)` pairs in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Gesture)> {
        self.entries.iter().map(|(n, g)| (n.as_str(), g))
    }

    /// Number of saved gestures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Waypoint;

    fn gesture(steps: &[(u8, u8, u8)]) -> Gesture {
        steps.iter().map(|&s| Waypoint::from(s)).collect()
    }

    #[test]
    fn test_save_and_get() {
        let mut lib = GestureLibrary::new();
        lib.save("wave", gesture(&[(5, 5, 5)])).unwrap();

        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get("wave").unwrap().len(), 1);
        assert!(matches!(lib.get("curl"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut lib = GestureLibrary::new();
        assert!(matches!(
            lib.save("   ", Gesture::default()),
            Err(Error::InvalidInput(_))
        ));
        assert!(lib.is_empty());
    }

    #[test]
    fn test_insertion_order_kept_on_overwrite() {
        let mut lib = GestureLibrary::new();
        lib.save("curl", gesture(&[(1, 1, 1)])).unwrap();
        lib.save("wave", gesture(&[(2, 2, 2)])).unwrap();
        lib.save("curl", gesture(&[(3, 3, 3), (4, 4, 4)])).unwrap();

        assert_eq!(lib.names(), vec!["curl", "wave"]);
        assert_eq!(lib.get("curl").unwrap().len(), 2);

        let (name, g) = lib.get_index(1).unwrap();
        assert_eq!(name, "wave");
        assert_eq!(g[0], Waypoint::new(2, 2, 2));
        assert!(lib.get_index(2).is_err());
    }
}
