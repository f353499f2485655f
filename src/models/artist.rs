//! Artist model

use std::collections::{BTreeSet, HashMap, HashSet};

use super::CatalogArtist;

/// A seed artist and everything the catalog told us about it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistRecord {
    /// Main artist name, the unique key of the graph
    pub name: String,
    /// Catalog genres, in catalog order
    pub genres: Vec<String>,
    /// Catalog follower total, `None` until resolved
    pub followers: Option<u64>,
    /// Related artists that are also seeds
    pub related_artists: BTreeSet<String>,
}

impl ArtistRecord {
    /// Create an empty record
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Copy genres and followers off a resolved catalog entity
    pub fn apply_attributes(&mut self, entity: &CatalogArtist) {
        self.genres = entity.genres.clone();
        self.followers = entity.followers.total;
    }

    /// Keep only related names present in the seed set
    pub fn set_related<'a, I>(&mut self, related: I, seeds: &HashSet<String>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.related_artists = related
            .into_iter()
            .filter(|name| seeds.contains(*name))
            .map(str::to_string)
            .collect();
    }

    /// Genres as a single cell value
    pub fn genres_joined(&self) -> String {
        self.genres.join(", ")
    }

    /// Related artists as a single cell value
    pub fn related_joined(&self) -> String {
        self.related_artists
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Seed artists keyed by main artist name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet {
    records: HashMap<String, ArtistRecord>,
}

impl SeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty record, merging silently if the name was already seen.
    /// Returns true when the name is new.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.records.contains_key(name) {
            return false;
        }
        self.records
            .insert(name.to_string(), ArtistRecord::new(name.to_string()));
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ArtistRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ArtistRecord> {
        self.records.get_mut(name)
    }

    /// Snapshot of all seed names, used as the closed-graph filter
    pub fn names(&self) -> HashSet<String> {
        self.records.keys().cloned().collect()
    }

    /// All names in lexicographic order
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: AsRef<str>> FromIterator<S> for SeedSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut seeds = SeedSet::new();
        for name in iter {
            seeds.insert(name.as_ref());
        }
        seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Followers;

    #[test]
    fn test_seed_set_merges_duplicates() {
        let mut seeds = SeedSet::new();
        assert!(seeds.insert("A"));
        assert!(seeds.insert("C"));
        assert!(!seeds.insert("A"));
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds.sorted_names(), vec!["A", "C"]);
    }

    #[test]
    fn test_set_related_drops_outsiders() {
        let seeds: HashSet<String> = ["A", "C"].iter().map(|s| s.to_string()).collect();
        let mut record = ArtistRecord::new("A".into());
        record.set_related(["C", "X"], &seeds);

        assert_eq!(record.related_artists.len(), 1);
        assert!(record.related_artists.contains("C"));
        assert_eq!(record.related_joined(), "C");
    }

    #[test]
    fn test_apply_attributes() {
        let entity = CatalogArtist {
            id: "1".into(),
            name: "A".into(),
            uri: "spotify:artist:1".into(),
            genres: vec!["pop".into(), "dance pop".into()],
            followers: Followers { total: Some(42) },
        };
        let mut record = ArtistRecord::new("A".into());
        record.apply_attributes(&entity);

        assert_eq!(record.followers, Some(42));
        assert_eq!(record.genres_joined(), "pop, dance pop");
    }
}
